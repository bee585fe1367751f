//! Pearson correlation between two series and across a labelled set of series.

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, warn};

use crate::{
    config::CorrelationConfig,
    error::CorrelationError,
    matrix::{CorrelationMatrix, CorrelationRow},
    statistics::mean,
};

/// Pearson product-moment correlation coefficient.
///
/// Returns a value from -1.0 to +1.0. Both series must have the same length and at least two
/// observations, and neither may be constant.
pub fn pearson_correlation(series_x: &[f64], series_y: &[f64]) -> Result<f64, CorrelationError> {
    pearson_correlation_with(series_x, series_y, &CorrelationConfig::default())
}

/// [`pearson_correlation`] with explicit minimum observations and clamping behaviour.
pub fn pearson_correlation_with(
    series_x: &[f64],
    series_y: &[f64],
    config: &CorrelationConfig,
) -> Result<f64, CorrelationError> {
    if series_x.len() != series_y.len() || series_x.len() < config.min_observations {
        return Err(CorrelationError::LengthMismatch {
            left: series_x.len(),
            right: series_y.len(),
        });
    }

    let mean_x = mean(series_x)?;
    let mean_y = mean(series_y)?;

    // Independent sums of squares per side, accumulated left-to-right
    let mut numerator = 0.0;
    let mut sum_squares_x = 0.0;
    let mut sum_squares_y = 0.0;

    for (x, y) in series_x.iter().zip(series_y) {
        let diff_x = x - mean_x;
        let diff_y = y - mean_y;
        numerator += diff_x * diff_y;
        sum_squares_x += diff_x * diff_x;
        sum_squares_y += diff_y * diff_y;
    }

    if !numerator.is_finite() || !sum_squares_x.is_finite() || !sum_squares_y.is_finite() {
        return Err(CorrelationError::Overflow);
    }

    let denominator_x = sum_squares_x.sqrt();
    let denominator_y = sum_squares_y.sqrt();

    if denominator_x == 0.0 || denominator_y == 0.0 {
        return Err(CorrelationError::DegenerateSeries);
    }

    let correlation = numerator / (denominator_x * denominator_y);

    // Denominator product can still underflow for tiny magnitudes
    if !correlation.is_finite() {
        return Err(CorrelationError::DegenerateSeries);
    }

    if config.clamp {
        Ok(correlation.clamp(-1.0, 1.0))
    } else {
        Ok(correlation)
    }
}

/// Build a square correlation matrix across every pair of labelled series.
///
/// Rows and columns follow the iteration order of `series`. The upper triangle is computed and
/// mirrored, so the result is exactly symmetric. The first failing pair aborts the build and is
/// reported as [`CorrelationError::SeriesPair`].
pub fn correlation_matrix(
    series: &IndexMap<String, Vec<f64>>,
    config: &CorrelationConfig,
) -> Result<CorrelationMatrix, CorrelationError> {
    let size = series.len();
    let mut values = vec![vec![0.0; size]; size];

    let correlate = |left: &str, x: &[f64], right: &str, y: &[f64]| {
        pearson_correlation_with(x, y, config).map_err(|source| {
            warn!(%left, %right, %source, "failed to correlate series pair");
            CorrelationError::SeriesPair {
                left: left.to_string(),
                right: right.to_string(),
                source: Box::new(source),
            }
        })
    };

    for (index, (label, observations)) in series.iter().enumerate() {
        values[index][index] = correlate(label, observations, label, observations)?;
    }

    for ((i, (left, x)), (j, (right, y))) in series.iter().enumerate().tuple_combinations() {
        let correlation = correlate(left, x, right, y)?;
        values[i][j] = correlation;
        values[j][i] = correlation;
    }

    debug!(series = size, "built correlation matrix from raw series");

    let rows = series
        .keys()
        .zip(values)
        .map(|(label, row)| CorrelationRow::new(label.clone(), row))
        .collect();

    Ok(CorrelationMatrix::new(rows))
}
