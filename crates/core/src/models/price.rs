use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Which date field of a [`PriceRecord`] drives grouping and merging.
/// Stock listings carry `date`, sold lots carry `date_ordered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Date,
    DateOrdered,
}

/// One raw sale or stock-listing entry from the price guide.
///
/// Only the fields the pipeline interprets are typed; everything else the
/// API sends (quantity, seller country, lot id, ...) is preserved in
/// `extra` so merge and persistence round-trip entries intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Listing date (stock guide), ISO-8601-like, may end in "Z".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Order date (sold guide), ISO-8601-like, may end in "Z".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_ordered: Option<String>,

    /// Unit price: a JSON number or a numeric string ("8.8000").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PriceRecord {
    /// The selected date field, with empty strings treated as missing.
    pub fn date_value(&self, field: DateField) -> Option<&str> {
        let raw = match field {
            DateField::Date => self.date.as_deref(),
            DateField::DateOrdered => self.date_ordered.as_deref(),
        };
        raw.filter(|s| !s.trim().is_empty())
    }
}

/// "YYYY-MM" → arithmetic mean of unit prices observed in that month.
/// `BTreeMap` keeps keys in ascending (= chronological) order.
pub type MonthlyAverage = BTreeMap<String, f64>;

/// The `data` object of a successful price-guide response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceGuideData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<Value>,

    /// Quantity-weighted average (average per lot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_avg_price: Option<Value>,

    #[serde(default)]
    pub price_detail: Vec<PriceRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PriceGuideData {
    /// Extract the single average price from the payload.
    ///
    /// Prefers `avg_price` when present and truthy, falling back to
    /// `qty_avg_price`. The fallback order (truthiness included) is a
    /// black-box contract with the upstream API — do not "fix" it.
    pub fn average_price(&self) -> Result<f64, CoreError> {
        let candidate = match &self.avg_price {
            Some(value) if !is_falsy(value) => Some(value),
            _ => self.qty_avg_price.as_ref(),
        };
        candidate.and_then(coerce_number).ok_or_else(|| {
            CoreError::UnexpectedFormat(
                "response carries neither a numeric avg_price nor qty_avg_price".into(),
            )
        })
    }
}

/// Mirrors the truthiness the upstream contract is defined against:
/// null, "", 0 and false all fall through to the fallback field.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
