use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::price::{DateField, MonthlyAverage, PriceRecord};

/// Reduce raw sale/listing records to one unweighted arithmetic-mean price
/// per calendar month, keyed "YYYY-MM" in ascending order.
///
/// Records with a missing or unparseable date or price are skipped, never
/// errored: the feed routinely contains partial entries, and a degraded
/// monthly series beats no series. Empty input yields an empty map.
pub fn monthly_averages(records: &[PriceRecord], date_field: DateField) -> MonthlyAverage {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for record in records {
        let Some(raw_date) = record.date_value(date_field) else {
            continue;
        };
        let Some(price) = record.unit_price.as_ref().and_then(parse_price) else {
            continue;
        };
        let Some(month) = month_key(raw_date) else {
            continue;
        };
        let entry = sums.entry(month).or_insert((0.0, 0));
        entry.0 += price;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(month, (sum, count))| (month, sum / count as f64))
        .collect()
}

/// "2024-01-05T10:20:30Z", "2024-01-05T10:20:30+02:00", "2024-01-05T10:20:30"
/// and "2024-01-05" all truncate to "2024-01". A trailing literal "Z" is
/// rewritten to an explicit zero offset before parsing.
fn month_key(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.format("%Y-%m").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.format("%Y-%m").to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Some(date.format("%Y-%m").to_string());
    }
    None
}

/// JSON number, or numeric string; a comma decimal separator is accepted
/// ("12,50" → 12.5).
fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse()
                .ok()
                .or_else(|| s.replace(',', ".").parse().ok())
        }
        _ => None,
    }
}
