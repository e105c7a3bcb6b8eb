//! # Discovery Client
//!
//! Pulls the curated token lists (token of the day, featured, new) and
//! normalizes them into canonical records. Any failure yields an empty list.

use lib_core::{parse_discovery, TokenRecord};
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    url: String,
}

impl DiscoveryClient {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Create a client when a discovery endpoint is configured.
    pub fn from_config(config: &lib_core::Config) -> anyhow::Result<Option<Self>> {
        config
            .discovery_api_url
            .as_deref()
            .map(Self::new)
            .transpose()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_tokens(&self) -> Vec<TokenRecord> {
        let body = match self.fetch_body().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Discovery request failed: {}", e);
                return Vec::new();
            }
        };

        let records = parse_discovery(&body);
        info!("Discovered {} tokens", records.len());
        records
    }

    async fn fetch_body(&self) -> anyhow::Result<String> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {}", status);
        }
        Ok(response.text().await?)
    }
}
