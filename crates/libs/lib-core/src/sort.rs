//! # Sort Engine
//!
//! Orders token records by a ranking key, highest first.
//!
//! Sorting is stable: records with equal keys keep their relative input
//! order. A `NaN` key ranks below every number.

use crate::model::TokenRecord;
use std::fmt;
use std::str::FromStr;

/// Ranking key for a token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Current USD price.
    Price,
    /// 24h trading volume.
    Volume,
    /// Market capitalization.
    MarketCap,
    /// USD liquidity.
    Liquidity,
    /// 24h buys + sells.
    Transactions,
    /// Holder count.
    Holders,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Price,
        SortKey::Volume,
        SortKey::MarketCap,
        SortKey::Liquidity,
        SortKey::Transactions,
        SortKey::Holders,
    ];

    /// Short tab label (`PRICE`, `VOL`, `MCAP`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Price => "PRICE",
            SortKey::Volume => "VOL",
            SortKey::MarketCap => "MCAP",
            SortKey::Liquidity => "LIQ",
            SortKey::Transactions => "TXNS",
            SortKey::Holders => "HOLDER",
        }
    }

    /// The numeric field this key ranks by.
    pub fn value_of(&self, record: &TokenRecord) -> f64 {
        match self {
            SortKey::Price => record.price,
            SortKey::Volume => record.tokenomics.volume.day,
            SortKey::MarketCap => record.tokenomics.market_cap,
            SortKey::Liquidity => record.tokenomics.liquidity,
            SortKey::Transactions => record.total_txns() as f64,
            SortKey::Holders => record.tokenomics.holder as f64,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "vol" | "volume" => Ok(SortKey::Volume),
            "mcap" | "market-cap" | "marketcap" | "market_cap" => Ok(SortKey::MarketCap),
            "liq" | "liquidity" => Ok(SortKey::Liquidity),
            "txns" | "transactions" => Ok(SortKey::Transactions),
            "holder" | "holders" => Ok(SortKey::Holders),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Return a copy of `records` in descending order of `key`.
pub fn sort_records(records: &[TokenRecord], key: SortKey) -> Vec<TokenRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| rank(key.value_of(b)).total_cmp(&rank(key.value_of(a))));
    sorted
}

// NaN sinks to the bottom; -0.0 and 0.0 tie.
fn rank(value: f64) -> f64 {
    if value.is_nan() {
        f64::NEG_INFINITY
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Sort by a key given as text. An unrecognized key keeps the input order.
pub fn sort_token_list(records: &[TokenRecord], key: &str) -> Vec<TokenRecord> {
    match key.parse::<SortKey>() {
        Ok(key) => sort_records(records, key),
        Err(_) => records.to_vec(),
    }
}
