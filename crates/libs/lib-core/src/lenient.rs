//! # Lenient Deserialization
//!
//! `deserialize_with` helpers for third-party payloads whose schemas are not
//! versioned against this application. A field with the wrong type decodes as
//! `None` instead of failing the whole document.
//!
//! Pair every helper with `#[serde(default)]` so a missing field also decodes
//! as `None`:
//!
//! ```rust
//! use lib_core::lenient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Pair {
//!     #[serde(default, deserialize_with = "lenient::number")]
//!     price_usd: Option<f64>,
//! }
//!
//! let pair: Pair = serde_json::from_str(r#"{ "price_usd": "1.25" }"#).unwrap();
//! assert_eq!(pair.price_usd, Some(1.25));
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite number.
///
/// Numbers pass through, numeric strings are parsed, everything else
/// (including `NaN`/`inf` strings) is `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Decode a number that upstream may send as a number or a numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Decode any value, yielding `None` when it has the wrong shape.
pub fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode an array, dropping elements that fail to decode.
///
/// A non-array value decodes as `None`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Like [`number`], but anything non-numeric decodes as `0.0`.
pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.unwrap_or(0.0))
}

/// A non-negative count, see [`to_count`].
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_count(number(deserializer)?))
}

/// Like [`value`], but a wrong shape decodes as `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(value(deserializer)?.unwrap_or_default())
}

/// Like [`list`], but a non-array decodes as an empty `Vec`.
pub fn list_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(list(deserializer)?.unwrap_or_default())
}

/// Convert a coerced number into a count, clamping negatives and garbage to 0.
pub fn to_count(n: Option<f64>) -> u64 {
    match n {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_f64(&json!(" 2.25 ")), Some(2.25));
        assert_eq!(coerce_f64(&json!("abc")), None);
        assert_eq!(coerce_f64(&json!("NaN")), None);
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!(true)), None);
        assert_eq!(coerce_f64(&json!({ "usd": 1 })), None);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "number")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "value")]
        label: Option<String>,
        #[serde(default, deserialize_with = "list")]
        tags: Option<Vec<String>>,
    }

    #[test]
    fn test_wrong_types_decode_as_none() {
        let payload: Payload =
            serde_json::from_value(json!({ "amount": [1], "label": 5, "tags": "x" })).unwrap();
        assert_eq!(payload.amount, None);
        assert_eq!(payload.label, None);
        assert_eq!(payload.tags, None);
    }

    #[test]
    fn test_list_drops_bad_elements() {
        let payload: Payload = serde_json::from_value(json!({ "tags": ["a", 1, "b"] })).unwrap();
        assert_eq!(payload.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(payload.amount, None);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Defaults {
        #[serde(default, deserialize_with = "number_or_zero")]
        price: f64,
        #[serde(default, deserialize_with = "count")]
        holders: u64,
        #[serde(default, deserialize_with = "or_default")]
        name: String,
        #[serde(default, deserialize_with = "list_or_empty")]
        tags: Vec<String>,
    }

    #[test]
    fn test_defaulting_helpers() {
        let d: Defaults = serde_json::from_value(json!({
            "price": "0.5",
            "holders": "12",
            "name": null,
            "tags": { "a": 1 }
        }))
        .unwrap();
        assert_eq!(d.price, 0.5);
        assert_eq!(d.holders, 12);
        assert_eq!(d.name, "");
        assert!(d.tags.is_empty());

        let d: Defaults =
            serde_json::from_value(json!({ "price": "n/a", "holders": -4, "name": 7 })).unwrap();
        assert_eq!(d.price, 0.0);
        assert_eq!(d.holders, 0);
        assert_eq!(d.name, "");
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(Some(12.0)), 12);
        assert_eq!(to_count(Some(-3.0)), 0);
        assert_eq!(to_count(None), 0);
    }
}
