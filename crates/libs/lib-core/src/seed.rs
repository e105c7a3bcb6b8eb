//! # Seed Loading
//!
//! The tracker starts from a seed list. A seed file holds either a JSON array
//! of canonical token records, or a raw discovery payload that goes through
//! the normalizer.

use crate::error::{AppError, Result};
use crate::model::TokenRecord;
use crate::normalize::parse_discovery;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Parse seed text. A JSON array is read as records, anything else as a
/// discovery payload.
///
/// Bad fields inside a record fall back to defaults. Only array elements
/// that are not records at all are dropped.
pub fn parse_seed(body: &str) -> Vec<TokenRecord> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => decode_records(items),
        _ => parse_discovery(body),
    }
}

fn decode_records(items: Vec<Value>) -> Vec<TokenRecord> {
    let total = items.len();
    let records: Vec<TokenRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping seed entry {}: {}", i, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!("Kept {} of {} seed entries", records.len(), total);
    }
    records
}

/// Read and parse a seed file.
///
/// # Errors
///
/// Returns [`AppError::Config`] when the file cannot be read.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<TokenRecord>> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("Failed to read seed {}: {}", path.display(), e)))?;

    let records = parse_seed(&body);
    info!("Loaded {} seed tokens from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_array_seed() {
        let body = r#"[
            { "mintadd": "AAA", "ticker": "A", "tokenomics": { "holder": 12 }, "watchlist": true },
            { "mintadd": "BBB", "ticker": "B" }
        ]"#;
        let records = parse_seed(body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mint, "AAA");
        assert_eq!(records[0].tokenomics.holder, 12);
        assert!(records[0].watchlist);
        assert!(!records[1].watchlist);
    }

    #[test]
    fn test_malformed_entries_keep_the_rest() {
        let body = r#"[
            { "mintadd": "AAA", "price": 1.0 },
            { "mintadd": "BBB", "price": "0.5" },
            { "mintadd": null, "ticker": "C" },
            "not a record",
            { "mintadd": "DDD", "tokenomics": { "holder": "many" } }
        ]"#;
        let records = parse_seed(body);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].price, 1.0);
        assert_eq!(records[1].mint, "BBB");
        assert_eq!(records[1].price, 0.5);
        assert!(!records[2].has_id());
        assert_eq!(records[2].ticker, "C");
        assert_eq!(records[3].mint, "DDD");
        assert_eq!(records[3].tokenomics.holder, 0);
    }

    #[test]
    fn test_discovery_seed() {
        let body = r#"{ "data": { "featured": [{ "mintAddress": "F1", "ticker": "F" }] } }"#;
        let records = parse_seed(body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mint, "F1");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let res = load_seed("/definitely/not/here/seed.json");
        assert!(matches!(res, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("tracker-seed-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{ "mintadd": "X" }]"#).unwrap();
        let records = load_seed(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mint, "X");
    }
}
