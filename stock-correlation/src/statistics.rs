//! Mean and standard deviation over a numeric series.
//!
//! Reductions are folded left-to-right so results are bit-reproducible for the same input order.

use crate::error::CorrelationError;

/// Arithmetic mean of a non-empty series.
pub fn mean(series: &[f64]) -> Result<f64, CorrelationError> {
    if series.is_empty() {
        return Err(CorrelationError::EmptyInput);
    }
    ensure_finite(series)?;

    let total = series.iter().fold(0.0, |acc, value| acc + value);
    if !total.is_finite() {
        return Err(CorrelationError::Overflow);
    }

    Ok(total / series.len() as f64)
}

/// Population standard deviation (denominator `n`, not `n - 1`).
pub fn standard_deviation(series: &[f64]) -> Result<f64, CorrelationError> {
    let average = mean(series)?;
    let sum_squared_diffs = series
        .iter()
        .fold(0.0, |acc, value| acc + (value - average).powi(2));

    if !sum_squared_diffs.is_finite() {
        return Err(CorrelationError::Overflow);
    }

    Ok((sum_squared_diffs / series.len() as f64).sqrt())
}

/// Reject NaN and infinite observations before they can leak into a result.
pub(crate) fn ensure_finite(series: &[f64]) -> Result<(), CorrelationError> {
    match series.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(CorrelationError::NonFiniteValue { index }),
        None => Ok(()),
    }
}
