//! # Market Library
//!
//! Upstream market-data clients and the live refresh machinery built on them.

pub mod dexscreener;
pub mod discovery;
pub mod error;
pub mod holders;
pub mod portfolio;
pub mod refresh;
pub mod retry;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use dexscreener::{refresh_records, BatchConfig, DexScreenerClient, PairSource};
pub use discovery::DiscoveryClient;
pub use holders::{HolderClient, HolderStats};
pub use portfolio::{summarize_portfolio, PortfolioClient, PortfolioSummary};
pub use refresh::{
    CollectionUpdate, RefreshHandle, RefreshLoop, TokenCollection, DETAIL_REFRESH_INTERVAL,
    LIST_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL,
};
pub use retry::{retry_with_backoff, RetryPolicy};
