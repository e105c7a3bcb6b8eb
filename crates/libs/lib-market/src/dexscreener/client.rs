//! # DexScreener HTTP Client
//!
//! One request per call against the token-pairs endpoint.

use super::types::{DexPair, DexPairsResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, instrument};

/// HTTP client wrapper for DexScreener.
#[derive(Debug, Clone)]
pub struct DexScreenerHttpClient {
    pub http: Client,
    pub api_base: String,
}

impl DexScreenerHttpClient {
    /// Build the request URL: identifiers are comma-joined into the path.
    pub fn pairs_url(&self, ids: &[String]) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), ids.join(","))
    }

    /// Fetch every pair the aggregator knows for `ids`.
    ///
    /// Fails on transport errors, non-2xx status, a body that is not JSON,
    /// or a body without a `pairs` array.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn get_pairs(&self, ids: &[String]) -> anyhow::Result<Vec<DexPair>> {
        let url = self.pairs_url(ids);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "*/*")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("DexScreener request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("DexScreener returned HTTP {}", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("DexScreener body read failed: {}", e))?;

        let pairs = parse_pairs(&body)?;
        debug!("DexScreener returned {} pairs", pairs.len());
        Ok(pairs)
    }
}

/// Decode a token-pairs response body.
pub fn parse_pairs(body: &str) -> anyhow::Result<Vec<DexPair>> {
    let response: DexPairsResponse = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("DexScreener parse failed: {}", e))?;

    response
        .pairs
        .ok_or_else(|| anyhow::anyhow!("DexScreener response has no pairs array"))
}
