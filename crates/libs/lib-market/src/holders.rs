//! # Token Holder Client
//!
//! Top-holder lookups against the Moralis Solana gateway, plus the holder
//! concentration stats shown next to the list.
//!
//! HTTP 500 from the gateway is common under load and is retried up to three
//! times with 1s, 2s and 4s pauses. Any other failure is returned at once.

use crate::error::{Error, Result as MarketResult};
use crate::retry::{retry_with_backoff, RetryPolicy};
use lib_core::lenient;
use lib_core::{AppError, Result};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_MORALIS_API_BASE: &str = "https://solana-gateway.moralis.io";

/// Holders requested by the detail screen.
pub const DEFAULT_HOLDER_LIMIT: usize = 30;

/// Top-10 share (percent) above which supply counts as concentrated.
pub const CONCENTRATION_THRESHOLD: f64 = 25.0;

const MAX_HOLDER_LIMIT: usize = 100;

// region: --- Types
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderPage {
    #[serde(default, deserialize_with = "lenient::value")]
    pub cursor: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub page: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub page_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub result: Option<Vec<TokenHolder>>,
}

impl HolderPage {
    pub fn holders(&self) -> &[TokenHolder] {
        self.result.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenHolder {
    pub owner_address: String,
    pub balance: String,
    pub balance_formatted: String,
    pub is_contract: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub usd_value: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub percentage_relative_to_total_supply: Option<f64>,
}

impl TokenHolder {
    pub fn share(&self) -> f64 {
        self.percentage_relative_to_total_supply.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolderStats {
    pub total_holders: u64,
    /// Percent of supply held by the first ten holders of the page.
    pub top10_percentage: f64,
    /// Holders owning more than 1% of supply.
    pub holders_above_1_percent: usize,
}

impl HolderStats {
    /// Compute stats for a page. `total_holders` comes from the token record
    /// since the gateway does not report it.
    pub fn from_page(page: &HolderPage, total_holders: u64) -> Self {
        let holders = page.holders();
        Self {
            total_holders,
            top10_percentage: holders.iter().take(10).map(TokenHolder::share).sum(),
            holders_above_1_percent: holders.iter().filter(|h| h.share() > 1.0).count(),
        }
    }

    pub fn is_concentrated(&self) -> bool {
        self.top10_percentage > CONCENTRATION_THRESHOLD
    }
}
// endregion: --- Types

// region: --- Client
#[derive(Debug, Clone)]
pub struct HolderClientBuilder {
    api_key: Option<String>,
    api_base: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for HolderClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_MORALIS_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::new(3, Duration::from_secs(1)),
        }
    }
}

impl HolderClientBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry policy for HTTP 500 responses.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<HolderClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey("MORALIS_API_KEY"))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HolderClient {
            http,
            api_key,
            api_base: self.api_base.trim_end_matches('/').to_string(),
            retry: self.retry,
        })
    }
}

/// Client for token holder lookups.
#[derive(Debug, Clone)]
pub struct HolderClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    retry: RetryPolicy,
}

impl HolderClient {
    pub fn builder() -> HolderClientBuilder {
        HolderClientBuilder::default()
    }

    /// Create a client from the configured API key.
    pub fn from_config(config: &lib_core::Config) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(key) = &config.moralis_api_key {
            builder = builder.api_key(key.clone());
        }
        builder.build()
    }

    pub fn top_holders_url(&self, mint: &str, limit: usize) -> String {
        format!(
            "{}/token/mainnet/{}/top-holders?limit={}",
            self.api_base,
            mint.trim(),
            limit
        )
    }

    /// Fetch the largest holders of `mint`, biggest first.
    #[instrument(skip(self))]
    pub async fn top_holders(&self, mint: &str, limit: usize) -> Result<HolderPage> {
        if mint.trim().is_empty() {
            return Err(AppError::InvalidInput("mint address is empty".to_string()));
        }
        if limit == 0 || limit > MAX_HOLDER_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_HOLDER_LIMIT}"
            )));
        }

        let url = self.top_holders_url(mint, limit);
        let page = retry_with_backoff(self.retry, Error::is_server_error, || self.get_page(&url)).await?;

        debug!("Fetched {} holders for {}", page.holders().len(), mint);
        Ok(page)
    }

    async fn get_page(&self, url: &str) -> MarketResult<HolderPage> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}
// endregion: --- Client

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;

    const PAGE: &str = r#"{
        "cursor": "abc",
        "page": 1,
        "pageSize": 3,
        "totalSupply": "1000000000",
        "result": [
            { "ownerAddress": "W1", "balance": "300", "balanceFormatted": "300", "isContract": false, "usdValue": "12.5", "percentageRelativeToTotalSupply": 20.5 },
            { "ownerAddress": "W2", "balance": "80", "balanceFormatted": "80", "isContract": true, "usdValue": "3", "percentageRelativeToTotalSupply": 6 },
            { "ownerAddress": "W3", "balance": "5", "balanceFormatted": "5", "isContract": false, "usdValue": "0.2", "percentageRelativeToTotalSupply": 0.5 }
        ]
    }"#;

    fn client(base: &str) -> HolderClient {
        HolderClient::builder()
            .api_key("test-key")
            .api_base(base)
            .retry(RetryPolicy::new(3, Duration::from_millis(5)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_stats_from_page() {
        let page: HolderPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.total_supply, Some(1_000_000_000.0));

        let stats = HolderStats::from_page(&page, 4200);
        assert_eq!(stats.total_holders, 4200);
        assert!((stats.top10_percentage - 27.0).abs() < 1e-9);
        assert_eq!(stats.holders_above_1_percent, 2);
        assert!(stats.is_concentrated());
    }

    #[test]
    fn test_stats_only_count_first_ten() {
        let holders: Vec<TokenHolder> = (0..12)
            .map(|_| TokenHolder {
                percentage_relative_to_total_supply: Some(2.0),
                ..Default::default()
            })
            .collect();
        let page = HolderPage {
            result: Some(holders),
            ..Default::default()
        };
        let stats = HolderStats::from_page(&page, 0);
        assert_eq!(stats.top10_percentage, 20.0);
        assert_eq!(stats.holders_above_1_percent, 12);
        assert!(!stats.is_concentrated());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let res = HolderClient::builder().api_key("  ").build();
        assert!(matches!(res, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_request_shape() {
        let server = serve(vec![(200, PAGE)]).await;
        let page = client(&server.base_url).top_holders(" MintX ", 30).await.unwrap();
        assert_eq!(page.holders().len(), 3);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].line(),
            "GET /token/mainnet/MintX/top-holders?limit=30 HTTP/1.1"
        );
        assert_eq!(requests[0].header("x-api-key").as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let server = serve(vec![(500, "{}"), (500, "{}"), (200, PAGE)]).await;
        let page = client(&server.base_url).top_holders("MintX", 30).await.unwrap();
        assert_eq!(page.holders()[0].owner_address, "W1");
        assert_eq!(server.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_three_retries() {
        let server = serve(vec![(500, "{}")]).await;
        let res = client(&server.base_url).top_holders("MintX", 30).await;
        assert!(matches!(res, Err(AppError::Upstream(_))));
        assert_eq!(server.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_other_statuses_are_not_retried() {
        let server = serve(vec![(401, r#"{"message":"bad key"}"#)]).await;
        let res = client(&server.base_url).top_holders("MintX", 30).await;
        assert!(matches!(res, Err(AppError::Upstream(ref m)) if m.contains("401")));
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let c = client("http://127.0.0.1:9");
        assert!(matches!(c.top_holders("", 30).await, Err(AppError::InvalidInput(_))));
        assert!(matches!(c.top_holders("MintX", 0).await, Err(AppError::InvalidInput(_))));
    }
}
