//! # Stock Correlation
//! Statistics and correlation matrix core for stock correlation heatmaps.
//!
//! The library provides:
//! - Statistics primitives: [`mean`] and population [`standard_deviation`]
//! - Pairwise [`pearson_correlation`], plus [`correlation_matrix`] for a labelled set of series
//! - Shape normalisation of upstream correlation payloads via [`assemble_matrix`]
//! - Banded classification of correlation values via [`classify`]
//!
//! Everything here is synchronous and pure: inputs are only read and every call allocates its
//! own output, so functions may be called concurrently without coordination.
//!
//! ## Example
//! ```
//! use stock_correlation::{
//!     CorrelationBand, RawCorrelationPayload, assemble_matrix, classify, pearson_correlation,
//! };
//!
//! let correlation = pearson_correlation(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0])
//!     .unwrap();
//! assert_eq!(classify(correlation), CorrelationBand::StrongPositive);
//!
//! let payload = RawCorrelationPayload::from_json(r#"{"A": [1, 0.5], "B": [0.5, 1]}"#).unwrap();
//! let matrix = assemble_matrix(&payload).unwrap();
//! assert_eq!(matrix.labels().collect::<Vec<_>>(), vec!["A", "B"]);
//! ```

/// Banded classification of correlation values.
pub mod band;

/// Environment-backed tuning for correlation calculations.
pub mod config;

/// Pearson correlation.
pub mod correlation;

/// All [`Error`](std::error::Error)s generated in `stock-correlation`.
pub mod error;

/// Correlation matrix assembly and classification.
pub mod matrix;

/// Upstream correlation payload shapes.
pub mod payload;

/// Series preparation from price histories.
pub mod series;

/// Mean and standard deviation.
pub mod statistics;

/// Upstream market data models.
pub mod types;

pub use band::{CorrelationBand, classify};
pub use config::CorrelationConfig;
pub use correlation::{correlation_matrix, pearson_correlation, pearson_correlation_with};
pub use error::CorrelationError;
pub use matrix::{
    ClassifiedCell, ClassifiedMatrix, ClassifiedRow, CorrelationMatrix, CorrelationRow,
    assemble_matrix,
};
pub use payload::RawCorrelationPayload;
pub use series::{SeriesKind, series_from_histories, simple_returns};
pub use statistics::{mean, standard_deviation};
pub use types::{
    CorrelationPair, CorrelationResponse, Stock, StockPriceHistory, StockPriceResponse,
    StockResponse,
};
