//! Uniform correlation matrix, shape normalisation of raw payloads, and per-cell classification.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    band::CorrelationBand,
    error::CorrelationError,
    payload::RawCorrelationPayload,
    statistics::ensure_finite,
    types::CorrelationPair,
};

/// One labelled row of a correlation matrix.
///
/// `values[j]` holds the correlation of `label` against the series at column `j`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CorrelationRow {
    pub label: String,
    pub values: Vec<f64>,
}

impl CorrelationRow {
    pub fn new(label: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            label: label.into(),
            values: values.into(),
        }
    }
}

/// Ordered rows of correlation values.
///
/// Conventionally square with column labels equal to the row labels, but any shape supplied
/// upstream is preserved as-is.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    rows: Vec<CorrelationRow>,
}

impl CorrelationMatrix {
    pub fn new(rows: Vec<CorrelationRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CorrelationRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<CorrelationRow> {
        self.rows
    }

    /// Row labels in order, which double as column labels for a square matrix.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row has exactly one value per row.
    pub fn is_square(&self) -> bool {
        self.rows.iter().all(|row| row.values.len() == self.rows.len())
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row)?.values.get(column).copied()
    }

    /// Look up a cell by row and column label, using row order as column order.
    pub fn value_for(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let row = self.rows.iter().position(|row| row.label == row_label)?;
        let column = self.rows.iter().position(|row| row.label == column_label)?;
        self.value(row, column)
    }

    /// Classify every cell into its [`CorrelationBand`].
    pub fn classify(&self) -> ClassifiedMatrix {
        let rows = self
            .rows
            .iter()
            .map(|row| ClassifiedRow {
                label: row.label.clone(),
                cells: row.values.iter().copied().map(ClassifiedCell::from).collect(),
            })
            .collect();

        ClassifiedMatrix { rows }
    }
}

impl TryFrom<&RawCorrelationPayload> for CorrelationMatrix {
    type Error = CorrelationError;

    fn try_from(payload: &RawCorrelationPayload) -> Result<Self, Self::Error> {
        assemble_matrix(payload)
    }
}

/// Normalise any [`RawCorrelationPayload`] shape into a [`CorrelationMatrix`].
///
/// Values are copied unchanged, never recomputed. Keyed payloads keep their key order, row
/// payloads are copied structurally as-is, and pairwise payloads are expanded into a square
/// symmetric matrix. Any non-finite value is rejected.
pub fn assemble_matrix(
    payload: &RawCorrelationPayload,
) -> Result<CorrelationMatrix, CorrelationError> {
    let rows = match payload {
        RawCorrelationPayload::Keyed(entries) => entries
            .iter()
            .map(|(label, values)| -> Result<CorrelationRow, CorrelationError> {
                ensure_finite_row(label, values)?;
                Ok(CorrelationRow::new(label.clone(), values.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?,
        RawCorrelationPayload::Rows(rows) => {
            for row in rows {
                ensure_finite_row(&row.label, &row.values)?;
            }
            rows.clone()
        }
        RawCorrelationPayload::Pairs(pairs) => assemble_pairs(pairs)?,
    };

    let matrix = CorrelationMatrix::new(rows);

    debug!(
        rows = matrix.len(),
        shape = payload.shape(),
        is_square = matrix.is_square(),
        "assembled correlation matrix"
    );

    Ok(matrix)
}

fn ensure_finite_row(label: &str, values: &[f64]) -> Result<(), CorrelationError> {
    ensure_finite(values).map_err(|error| match error {
        CorrelationError::NonFiniteValue { index } => CorrelationError::MalformedPayload(format!(
            "row `{label}` has a non-finite value at column {index}"
        )),
        other => other,
    })
}

/// Expand pairwise correlations into a square matrix.
///
/// Labels are ordered by first appearance (`stock1` before `stock2`). Each pair fills both
/// `(a, b)` and `(b, a)`, and the diagonal defaults to 1.0 unless supplied explicitly.
fn assemble_pairs(pairs: &[CorrelationPair]) -> Result<Vec<CorrelationRow>, CorrelationError> {
    let mut labels: IndexSet<&str> = IndexSet::new();
    let mut cells = Vec::with_capacity(pairs.len());

    for pair in pairs {
        if !pair.correlation.is_finite() {
            return Err(CorrelationError::MalformedPayload(format!(
                "pair `{}`/`{}` has a non-finite correlation",
                pair.stock1, pair.stock2
            )));
        }
        let (row, _) = labels.insert_full(pair.stock1.as_str());
        let (column, _) = labels.insert_full(pair.stock2.as_str());
        cells.push((row, column, pair.correlation));
    }

    let size = labels.len();
    let mut grid: Vec<Vec<Option<f64>>> = vec![vec![None; size]; size];

    for (row, column, correlation) in cells {
        for (i, j) in [(row, column), (column, row)] {
            match grid[i][j] {
                Some(existing) if existing != correlation => {
                    warn!(
                        left = labels[i],
                        right = labels[j],
                        existing,
                        correlation,
                        "conflicting pairwise correlations"
                    );
                    return Err(CorrelationError::MalformedPayload(format!(
                        "conflicting correlations for `{}`/`{}`: {existing} vs {correlation}",
                        labels[i], labels[j]
                    )));
                }
                _ => grid[i][j] = Some(correlation),
            }
        }
    }

    labels
        .iter()
        .zip(grid)
        .enumerate()
        .map(|(i, (label, row))| -> Result<CorrelationRow, CorrelationError> {
            let values = row
                .into_iter()
                .enumerate()
                .map(|(j, cell)| match cell {
                    Some(correlation) => Ok(correlation),
                    None if i == j => Ok(1.0),
                    None => Err(CorrelationError::MalformedPayload(format!(
                        "missing correlation for `{label}`/`{}`",
                        labels[j]
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CorrelationRow::new(*label, values))
        })
        .collect()
}

/// A single correlation value paired with its band.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ClassifiedCell {
    pub value: f64,
    pub band: CorrelationBand,
}

impl From<f64> for ClassifiedCell {
    fn from(value: f64) -> Self {
        Self {
            value,
            band: CorrelationBand::classify(value),
        }
    }
}

/// Two decimal places, as shown in heatmap cells.
impl fmt::Display for ClassifiedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassifiedRow {
    pub label: String,
    pub cells: Vec<ClassifiedCell>,
}

/// [`CorrelationMatrix`] with every cell classified, ready for display.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ClassifiedMatrix {
    rows: Vec<ClassifiedRow>,
}

impl ClassifiedMatrix {
    pub fn rows(&self) -> &[ClassifiedRow] {
        &self.rows
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn band(&self, row: usize, column: usize) -> Option<CorrelationBand> {
        self.rows.get(row)?.cells.get(column).map(|cell| cell.band)
    }
}
