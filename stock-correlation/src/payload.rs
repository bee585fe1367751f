//! Raw correlation payloads as served by the upstream API.
//!
//! Depending on endpoint and version the API answers with one of three shapes:
//! - an object keyed by label: `{"AAPL": [1.0, 0.42], "MSFT": [0.42, 1.0]}`
//! - an array of rows: `[{"label": "AAPL", "values": [1.0, 0.42]}, ..]`
//! - a pairwise list: `{"correlations": [{"stock1": "AAPL", "stock2": "MSFT", "correlation": 0.42}]}`

use std::str::FromStr;

use derive_more::From;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    error::CorrelationError,
    matrix::CorrelationRow,
    types::{CorrelationPair, CorrelationResponse},
};

/// Unnormalised correlation payload, one variant per upstream shape.
#[derive(Debug, Clone, PartialEq, From)]
pub enum RawCorrelationPayload {
    /// Label to row values, in insertion order
    Keyed(IndexMap<String, Vec<f64>>),
    /// Already tabular rows
    Rows(Vec<CorrelationRow>),
    /// Individual symbol pairs
    Pairs(Vec<CorrelationPair>),
}

impl RawCorrelationPayload {
    /// Parse a JSON document into the matching payload shape.
    pub fn from_json(json: &str) -> Result<Self, CorrelationError> {
        let value = serde_json::from_str::<Value>(json)
            .map_err(|error| CorrelationError::MalformedPayload(error.to_string()))?;
        Self::try_from(value)
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Self::Keyed(_) => "keyed",
            Self::Rows(_) => "rows",
            Self::Pairs(_) => "pairs",
        }
    }
}

impl From<CorrelationResponse> for RawCorrelationPayload {
    fn from(response: CorrelationResponse) -> Self {
        Self::Pairs(response.correlations)
    }
}

impl FromStr for RawCorrelationPayload {
    type Err = CorrelationError;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Self::from_json(json)
    }
}

impl TryFrom<Value> for RawCorrelationPayload {
    type Error = CorrelationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| parse_row(index, entry))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Rows),
            Value::Object(object) if is_pairwise(&object) => parse_pairs(object).map(Self::Pairs),
            Value::Object(object) => object
                .into_iter()
                .map(|(label, entry)| parse_values(&label, entry).map(|values| (label, values)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Self::Keyed),
            other => Err(CorrelationError::MalformedPayload(format!(
                "expected an object keyed by label or an array of rows, found {}",
                kind(&other)
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for RawCorrelationPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// `{"correlations": [{..}, ..]}` with only object entries.
fn is_pairwise(object: &Map<String, Value>) -> bool {
    if object.len() != 1 {
        return false;
    }
    match object.get("correlations") {
        Some(Value::Array(entries)) => entries.iter().all(Value::is_object),
        _ => false,
    }
}

fn parse_pairs(object: Map<String, Value>) -> Result<Vec<CorrelationPair>, CorrelationError> {
    let response = serde_json::from_value::<CorrelationResponse>(Value::Object(object))
        .map_err(|error| CorrelationError::MalformedPayload(format!("pairwise list: {error}")))?;
    Ok(response.correlations)
}

fn parse_row(index: usize, entry: Value) -> Result<CorrelationRow, CorrelationError> {
    if !entry.is_object() {
        return Err(CorrelationError::MalformedPayload(format!(
            "row {index} is not a {{label, values}} record, found {}",
            kind(&entry)
        )));
    }
    serde_json::from_value::<CorrelationRow>(entry)
        .map_err(|error| CorrelationError::MalformedPayload(format!("row {index}: {error}")))
}

fn parse_values(label: &str, entry: Value) -> Result<Vec<f64>, CorrelationError> {
    let items = match entry {
        Value::Array(items) => items,
        other => {
            return Err(CorrelationError::MalformedPayload(format!(
                "entry `{label}` is not a numeric sequence, found {}",
                kind(&other)
            )));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            item.as_f64().ok_or_else(|| {
                CorrelationError::MalformedPayload(format!(
                    "entry `{label}` has a non-numeric {} at position {position}",
                    kind(item)
                ))
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
