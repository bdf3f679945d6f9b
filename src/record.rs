//! Defensive field extraction for heterogeneous property records.
//!
//! Listing data reaches this crate from several upstream feeds (Repliers,
//! MLS Grid, internal DB exports) that disagree on field names for the same
//! concept. Each concept gets exactly one extraction function here that
//! encodes the known names in priority order; the rest of the crate never
//! reads raw fields directly.

use serde_json::Value;

use crate::error::{CmaError, Result};

/// Raw property data as delivered by upstream listing feeds.
pub type RawPropertyRecord = serde_json::Value;

/// Sale price: list price, falling back to close price for sold comps.
pub fn price(record: &RawPropertyRecord) -> Option<f64> {
    positive_field(record, &["listPrice", "closePrice"])
}

/// Finished living area in square feet.
pub fn living_area(record: &RawPropertyRecord) -> Option<f64> {
    positive_field(record, &["livingArea", "sqft", "squareFeet"])
}

pub fn bedrooms(record: &RawPropertyRecord) -> Option<f64> {
    positive_field(record, &["bedroomsTotal", "bedrooms", "beds"])
}

pub fn bathrooms(record: &RawPropertyRecord) -> Option<f64> {
    positive_field(
        record,
        &[
            "bathroomsTotalInteger",
            "bathroomsTotal",
            "bathrooms",
            "bathroomsFull",
        ],
    )
}

pub fn year_built(record: &RawPropertyRecord) -> Option<i32> {
    positive_field(record, &["yearBuilt"]).map(|year| year as i32)
}

pub fn days_on_market(record: &RawPropertyRecord) -> Option<f64> {
    positive_field(record, &["daysOnMarket", "dom", "cdom"])
}

pub fn lot_acres(record: &RawPropertyRecord) -> Option<f64> {
    positive_field(record, &["lotAcres", "lotSizeAcres"])
}

/// Raw listing status string prior to normalization.
pub fn raw_status(record: &RawPropertyRecord) -> Option<&str> {
    ["standardStatus", "status", "lastStatus"]
        .iter()
        .find_map(|name| record.get(*name).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Listing identifier; some feeds deliver MLS numbers as bare numbers.
pub fn listing_id(record: &RawPropertyRecord) -> Option<String> {
    ["id", "listingId", "mlsNumber"]
        .iter()
        .find_map(|name| match record.get(*name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
}

/// Ordered photo URLs. MLS Grid wraps each URL in a media object.
pub fn photos(record: &RawPropertyRecord) -> Vec<String> {
    ["photos", "media"]
        .iter()
        .find_map(|name| record.get(*name).and_then(|v| v.as_array()))
        .map(|entries| entries.iter().filter_map(photo_url).collect())
        .unwrap_or_default()
}

fn photo_url(entry: &Value) -> Option<String> {
    match entry {
        Value::String(url) => Some(url.clone()),
        Value::Object(_) => entry
            .get("MediaURL")
            .or_else(|| entry.get("url"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

/// Unwraps the property record list from a feed response payload: a bare
/// array, an object with a `listings`/`properties` array, or a single
/// record object.
pub fn records_from_value(payload: Value) -> Result<Vec<RawPropertyRecord>> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(map) => {
            for key in ["listings", "properties"] {
                if let Some(Value::Array(records)) = map.get(key) {
                    return Ok(records.clone());
                }
            }
            Ok(vec![Value::Object(map)])
        }
        other => Err(CmaError::Input(format!(
            "expected an array of property records, got {}",
            json_type_name(&other)
        ))),
    }
}

/// First field in priority order that holds a usable positive number.
/// Zero, negative, and non-numeric values never count as present; a comp
/// with no living area must not contribute a 0 to any average.
fn positive_field(record: &RawPropertyRecord, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| record.get(*name).and_then(value_as_f64).and_then(positive))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // Some feeds deliver numerics as strings ("450000")
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
