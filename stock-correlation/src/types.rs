//! Market data models
//!
//! These types match the JSON payloads served by the upstream stock API.

use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Stock quote summary
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Stock {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,
    /// Company name
    pub name: String,
    /// Last traded price
    pub price: f64,
    /// Price change since previous close
    pub change: f64,
    /// Traded volume
    pub volume: f64,
}

/// Response envelope for the stock listing endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StockResponse {
    pub stocks: Vec<Stock>,
}

/// A single dated price observation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct StockPriceHistory {
    /// Observation date as supplied by the API (not parsed)
    pub date: String,
    pub price: f64,
}

/// Price history for one symbol, oldest observation first
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct StockPriceResponse {
    pub symbol: String,
    pub history: Vec<StockPriceHistory>,
}

impl StockPriceResponse {
    /// Prices in history order
    pub fn prices(&self) -> Vec<f64> {
        self.history.iter().map(|point| point.price).collect()
    }
}

/// Precomputed correlation between two symbols
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct CorrelationPair {
    pub stock1: String,
    pub stock2: String,
    pub correlation: f64,
}

/// Response envelope for the pairwise correlation endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CorrelationResponse {
    pub correlations: Vec<CorrelationPair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_price_response_prices() {
        let json = r#"{
            "symbol": "AAPL",
            "history": [
                {"date": "2024-01-02", "price": 185.64},
                {"date": "2024-01-03", "price": 184.25},
                {"date": "2024-01-04", "price": 181.91}
            ]
        }"#;

        let response: StockPriceResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.symbol, "AAPL");
        assert_eq!(response.prices(), vec![185.64, 184.25, 181.91]);
    }

    #[test]
    fn test_stock_response_deserialise() {
        let json = r#"{"stocks": [
            {"symbol": "MSFT", "name": "Microsoft", "price": 370.6, "change": -1.2, "volume": 25000000}
        ]}"#;

        let response: StockResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.stocks.len(), 1);
        assert_eq!(response.stocks[0].name, "Microsoft");
        assert_eq!(response.stocks[0].volume, 25_000_000.0);
    }
}
