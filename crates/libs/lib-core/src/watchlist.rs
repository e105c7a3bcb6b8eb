//! # Watchlist
//!
//! The watched flag is user state. Refresh cycles never set or clear it.

use crate::model::{normalize_id, TokenRecord};

/// Records the user is watching, in collection order.
pub fn watched(records: &[TokenRecord]) -> Vec<&TokenRecord> {
    records.iter().filter(|r| r.watchlist).collect()
}

/// Flip the watched flag of the record matching `mint`.
///
/// Returns the new flag, or `None` when no record matches.
pub fn toggle(records: &mut [TokenRecord], mint: &str) -> Option<bool> {
    let key = normalize_id(mint);
    let record = records.iter_mut().find(|r| r.normalized_id() == key)?;
    record.watchlist = !record.watchlist;
    Some(record.watchlist)
}

/// Set the watched flag of the record matching `mint`.
///
/// Returns `false` when no record matches.
pub fn set(records: &mut [TokenRecord], mint: &str, watched: bool) -> bool {
    let key = normalize_id(mint);
    match records.iter_mut().find(|r| r.normalized_id() == key) {
        Some(record) => {
            record.watchlist = watched;
            true
        }
        None => false,
    }
}
