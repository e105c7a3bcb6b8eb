//! # DexScreener Aggregation Client
//!
//! Live market data for token lists: batched pair lookups and merging of the
//! results back into canonical records.

// region: --- Modules
pub mod batch;
pub mod client;
pub mod merge;
pub mod types;
// endregion: --- Modules

// region: --- Main Client
use async_trait::async_trait;
use client::DexScreenerHttpClient;
use lib_core::config::{Config, DEFAULT_DEXSCREENER_API_BASE};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for configuring DexScreenerClient.
#[derive(Debug, Clone)]
pub struct DexScreenerClientBuilder {
    timeout: Option<Duration>,
    api_base: Option<String>,
}

impl Default for DexScreenerClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            api_base: Some(DEFAULT_DEXSCREENER_API_BASE.to_string()),
        }
    }
}

impl DexScreenerClientBuilder {
    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the token-pairs endpoint base URL.
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Build the DexScreenerClient with configured settings.
    pub fn build(self) -> anyhow::Result<DexScreenerClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let inner = DexScreenerHttpClient {
            http,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_DEXSCREENER_API_BASE.to_string()),
        };

        Ok(DexScreenerClient { inner })
    }
}

/// Client for the DexScreener token-pairs API.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    inner: DexScreenerHttpClient,
}

impl DexScreenerClient {
    /// Create a client with default settings.
    pub fn new() -> anyhow::Result<Self> {
        Self::builder().build()
    }

    /// Create a client using a builder for configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lib_market::dexscreener::DexScreenerClient;
    ///
    /// let client = DexScreenerClient::builder()
    ///     .timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn builder() -> DexScreenerClientBuilder {
        DexScreenerClientBuilder::default()
    }

    /// Create a client pointed at the configured endpoint.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::builder()
            .api_base(config.dexscreener_api_base.clone())
            .build()
    }

    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }
}

#[async_trait]
impl batch::PairSource for DexScreenerClient {
    async fn fetch_pairs(&self, ids: &[String]) -> anyhow::Result<Vec<types::DexPair>> {
        self.inner.get_pairs(ids).await
    }
}
// endregion: --- Main Client

// Re-export commonly used types
pub use batch::{collect_pairs, partition_ids, refresh_records, BatchConfig, PairSource};
pub use merge::merge_pairs;
pub use types::*;
