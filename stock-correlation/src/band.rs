use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lower bound (exclusive) of the strong bands.
pub const STRONG_THRESHOLD: f64 = 0.7;

/// Lower bound (exclusive) of the weak bands.
pub const WEAK_THRESHOLD: f64 = 0.3;

/// Discrete band summarising the strength and sign of a correlation value.
///
/// Variants are ordered from most positive to most negative.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize, Display,
)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationBand {
    #[display("Strong Positive")]
    StrongPositive,
    #[display("Weak Positive")]
    WeakPositive,
    #[display("Negligible")]
    Negligible,
    #[display("Weak Negative")]
    WeakNegative,
    #[display("Strong Negative")]
    StrongNegative,
}

impl CorrelationBand {
    /// Every band, most positive first.
    pub const ALL: [Self; 5] = [
        Self::StrongPositive,
        Self::WeakPositive,
        Self::Negligible,
        Self::WeakNegative,
        Self::StrongNegative,
    ];

    /// Map any value to a band. Never fails.
    ///
    /// Thresholds are tested in descending order with strict `>`, so a value sitting exactly on
    /// a threshold lands in the lower band, and values outside [-1, 1] saturate into the outer
    /// bands. NaN satisfies no threshold and falls through to [`CorrelationBand::StrongNegative`].
    pub fn classify(value: f64) -> Self {
        if value > STRONG_THRESHOLD {
            Self::StrongPositive
        } else if value > WEAK_THRESHOLD {
            Self::WeakPositive
        } else if value > -WEAK_THRESHOLD {
            Self::Negligible
        } else if value > -STRONG_THRESHOLD {
            Self::WeakNegative
        } else {
            Self::StrongNegative
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::StrongPositive | Self::WeakPositive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::WeakNegative | Self::StrongNegative)
    }
}

/// Shorthand for [`CorrelationBand::classify`].
pub fn classify(value: f64) -> CorrelationBand {
    CorrelationBand::classify(value)
}
