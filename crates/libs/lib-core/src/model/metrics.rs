//! # Market Metrics
//!
//! Aggregate dashboard figures for the whole launch platform.
//!
//! A [`MarketMetrics`] value is an atomic snapshot supplied from outside the
//! refresh core. It is replaced wholesale on every fetch; nothing merges into
//! it field by field.

use serde::{Deserialize, Serialize};

/// A figure split by coin category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryBreakdown {
    pub total: f64,
    pub creator_coins: f64,
    pub launch_coin: f64,
}

/// Dashboard snapshot. Defaults to all zeros until the first fetch lands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketMetrics {
    pub lifetime_volume: f64,
    pub coin_launches: u64,
    pub active_coins: u64,
    pub total_market_cap: CategoryBreakdown,
    #[serde(rename = "volume24h")]
    pub volume_24h: CategoryBreakdown,
    #[serde(rename = "transactions24h")]
    pub transactions_24h: CategoryBreakdown,
    pub total_liquidity: CategoryBreakdown,
}

impl MarketMetrics {
    /// Replace this snapshot with a newer one.
    pub fn replace(&mut self, fresh: MarketMetrics) {
        *self = fresh;
    }
}
