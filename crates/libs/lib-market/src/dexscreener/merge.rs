//! # Record Merger
//!
//! Folds fetched pairs into the token list.
//!
//! A record matches a pair when their identifiers are equal after
//! [`normalize_id`]. When several pairs price the same token the first one
//! returned wins. Matched records take every market field from the pair;
//! holder count, watch flag, descriptive text and media are kept. Unmatched
//! records pass through untouched.

use super::types::DexPair;
use lib_core::lenient::to_count;
use lib_core::model::{TokenImages, TxnCounts, Windows};
use lib_core::{normalize_id, TokenRecord};
use std::collections::HashMap;

/// Merge `pairs` into `records`, keeping record order.
pub fn merge_pairs(records: &[TokenRecord], pairs: &[DexPair]) -> Vec<TokenRecord> {
    let mut index: HashMap<String, &DexPair> = HashMap::with_capacity(pairs.len());
    for pair in pairs {
        if let Some(address) = pair.base_address() {
            index.entry(normalize_id(address)).or_insert(pair);
        }
    }

    records
        .iter()
        .map(|record| match index.get(&record.normalized_id()) {
            Some(pair) if record.has_id() => apply_pair(record, pair),
            _ => record.clone(),
        })
        .collect()
}

/// Overwrite the market fields of `record` with what `pair` reports.
pub fn apply_pair(record: &TokenRecord, pair: &DexPair) -> TokenRecord {
    let price = pair.price_usd.unwrap_or(0.0);
    let info = pair.info.clone().unwrap_or_default();
    let volume = pair.volume.clone().unwrap_or_default();
    let change = pair.price_change.clone().unwrap_or_default();
    let txns = pair
        .txns
        .as_ref()
        .and_then(|t| t.h24.clone())
        .unwrap_or_default();

    let mut merged = record.clone();
    merged.price = price;
    merged.price_native = pair.price_native.unwrap_or(0.0);
    merged.dex_id = pair.dex_id.clone().unwrap_or_default();
    merged.img = TokenImages {
        logo: info.image_url.unwrap_or_default(),
        banner: info.header.unwrap_or_default(),
    };
    merged.price_change = Windows {
        short: change.h6.unwrap_or(0.0),
        day: change.h24.unwrap_or(0.0),
    };
    merged.txn = TxnCounts {
        buys: to_count(txns.buys),
        sells: to_count(txns.sells),
    };
    merged.tokenomics.market_cap = pair.market_cap.unwrap_or(0.0);
    merged.tokenomics.volume = Windows {
        short: volume.h6.unwrap_or(0.0),
        day: volume.h24.unwrap_or(0.0),
    };
    merged.tokenomics.liquidity = pair
        .liquidity
        .as_ref()
        .and_then(|l| l.usd)
        .unwrap_or(0.0);
    merged.tokenomics.price = price;
    merged
}
