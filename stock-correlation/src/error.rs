use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated in `stock-correlation`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Error)]
pub enum CorrelationError {
    #[error("cannot compute a statistic over an empty series")]
    EmptyInput,

    #[error(
        "\
        LengthMismatch: series of lengths {left} and {right} cannot be correlated, \
        equal lengths of at least 2 observations are required \
    "
    )]
    LengthMismatch { left: usize, right: usize },

    #[error("correlation undefined: at least one series is constant")]
    DegenerateSeries,

    #[error("intermediate sum overflowed the f64 range, rescale the series")]
    Overflow,

    #[error("series contains a non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    #[error("cannot derive a return from non-positive price at index {index}")]
    NonPositivePrice { index: usize },

    #[error("malformed correlation payload: {0}")]
    MalformedPayload(String),

    #[error("failed to correlate {left} against {right}: {source}")]
    SeriesPair {
        left: String,
        right: String,
        #[source]
        source: Box<CorrelationError>,
    },
}

impl CorrelationError {
    /// Determine if an error was caused by the shape of the input rather than by the numbers in it.
    ///
    /// Shape errors indicate a bad upstream payload, whereas numeric errors (eg/ a constant
    /// series) are expected for some inputs and are usually handled by skipping the offending
    /// row or pair.
    pub fn is_input_shape(&self) -> bool {
        match self {
            CorrelationError::MalformedPayload(_) | CorrelationError::LengthMismatch { .. } => true,
            CorrelationError::SeriesPair { source, .. } => source.is_input_shape(),
            _ => false,
        }
    }
}
