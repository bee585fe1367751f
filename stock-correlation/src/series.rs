//! Preparation of numeric series from stock price histories.
//!
//! No alignment or resampling happens here: histories are assumed to cover the same dates in
//! the same order.

use indexmap::{IndexMap, map::Entry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::CorrelationError, statistics::ensure_finite, types::StockPriceResponse};

/// Which series to derive from a price history before correlating.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Raw prices
    Prices,
    /// Bar-to-bar simple returns
    #[default]
    Returns,
}

/// Bar-to-bar simple returns: `(p[i] - p[i-1]) / p[i-1]`.
///
/// Returns N-1 values for N prices, or an empty series for fewer than two prices.
pub fn simple_returns(prices: &[f64]) -> Result<Vec<f64>, CorrelationError> {
    ensure_finite(prices)?;

    prices
        .windows(2)
        .enumerate()
        .map(|(index, window)| {
            if window[0] <= 0.0 {
                return Err(CorrelationError::NonPositivePrice { index });
            }
            let change = (window[1] - window[0]) / window[0];
            if !change.is_finite() {
                return Err(CorrelationError::Overflow);
            }
            Ok(change)
        })
        .collect()
}

/// Collect one series per symbol, keyed in response order.
pub fn series_from_histories(
    histories: &[StockPriceResponse],
    kind: SeriesKind,
) -> Result<IndexMap<String, Vec<f64>>, CorrelationError> {
    let mut series = IndexMap::with_capacity(histories.len());

    for response in histories {
        let prices = response.prices();
        let observations = match kind {
            SeriesKind::Prices => {
                ensure_finite(&prices)?;
                prices
            }
            SeriesKind::Returns => simple_returns(&prices)?,
        };

        match series.entry(response.symbol.clone()) {
            Entry::Occupied(_) => {
                return Err(CorrelationError::MalformedPayload(format!(
                    "duplicate price history for `{}`",
                    response.symbol
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(observations);
            }
        }
    }

    debug!(symbols = series.len(), ?kind, "prepared series from price histories");

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StockPriceHistory;

    fn history(symbol: &str, prices: &[f64]) -> StockPriceResponse {
        StockPriceResponse::new(
            symbol.to_string(),
            prices
                .iter()
                .enumerate()
                .map(|(day, price)| StockPriceHistory::new(format!("2024-01-{:02}", day + 1), *price))
                .collect(),
        )
    }

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[100.0, 101.0, 102.0]).unwrap();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.01).abs() < 0.0001); // 1% return
        assert!((returns[1] - 0.0099).abs() < 0.001); // ~0.99% return
    }

    #[test]
    fn test_simple_returns_edge_cases() {
        struct TestCase {
            input: Vec<f64>,
            expected: Result<Vec<f64>, CorrelationError>,
        }

        let tests = vec![
            TestCase {
                // TC0: no prices
                input: vec![],
                expected: Ok(vec![]),
            },
            TestCase {
                // TC1: single price
                input: vec![10.0],
                expected: Ok(vec![]),
            },
            TestCase {
                // TC2: halving then doubling
                input: vec![10.0, 5.0, 10.0],
                expected: Ok(vec![-0.5, 1.0]),
            },
            TestCase {
                // TC3: zero base price
                input: vec![10.0, 0.0, 5.0],
                expected: Err(CorrelationError::NonPositivePrice { index: 1 }),
            },
            TestCase {
                // TC4: NaN price
                input: vec![10.0, f64::NAN],
                expected: Err(CorrelationError::NonFiniteValue { index: 1 }),
            },
            TestCase {
                // TC5: return from a tiny base price overflows
                input: vec![1e-300, 1e300],
                expected: Err(CorrelationError::Overflow),
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = simple_returns(&test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_series_from_histories() {
        let histories = vec![
            history("MSFT", &[10.0, 20.0, 10.0]),
            history("AAPL", &[4.0, 5.0, 6.0]),
        ];

        let prices = series_from_histories(&histories, SeriesKind::Prices).unwrap();
        assert_eq!(prices.keys().collect::<Vec<_>>(), vec!["MSFT", "AAPL"]);
        assert_eq!(prices["AAPL"], vec![4.0, 5.0, 6.0]);

        let returns = series_from_histories(&histories, SeriesKind::Returns).unwrap();
        assert_eq!(returns["MSFT"], vec![1.0, -0.5]);
        assert_eq!(returns["AAPL"], vec![0.25, 0.2]);
    }

    #[test]
    fn test_series_from_histories_rejects_duplicates() {
        let histories = vec![history("MSFT", &[1.0, 2.0]), history("MSFT", &[3.0, 4.0])];

        assert!(matches!(
            series_from_histories(&histories, SeriesKind::Prices),
            Err(CorrelationError::MalformedPayload(message)) if message.contains("MSFT")
        ));
    }
}
