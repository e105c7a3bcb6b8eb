//! # Wallet Portfolio
//!
//! Looks up a wallet's fungible assets through the Helius DAS
//! `getAssetsByOwner` JSON-RPC method and summarizes the part of the wallet
//! that is made of tracked tokens.
//!
//! Unlike the refresh path, portfolio lookups report failures to the caller.

use crate::error::{Error, Result as MarketResult};
use lib_core::lenient;
use lib_core::{normalize_id, AppError, Result, TokenRecord};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_HELIUS_RPC_URL: &str = "https://mainnet.helius-rpc.com/";

/// Assets requested per lookup. Wallets beyond this are truncated.
pub const ASSET_PAGE_LIMIT: u32 = 1000;

// region: --- Types
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetPage {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub limit: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub page: Option<f64>,
    #[serde(default)]
    pub items: Vec<Asset>,
}

/// One asset held by the wallet. Only the fields the portfolio view uses
/// are decoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub content: Option<AssetContent>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub token_info: Option<AssetTokenInfo>,
}

impl Asset {
    pub fn image(&self) -> &str {
        self.content
            .as_ref()
            .and_then(|c| c.links.as_ref())
            .and_then(|l| l.image.as_deref())
            .unwrap_or_default()
    }

    /// USD value of the whole position, 0 when unpriced.
    pub fn total_price(&self) -> f64 {
        self.token_info
            .as_ref()
            .and_then(|t| t.price_info.as_ref())
            .and_then(|p| p.total_price)
            .unwrap_or(0.0)
    }

    fn set_image(&mut self, image: String) {
        let content = self.content.get_or_insert_with(Default::default);
        content.links.get_or_insert_with(Default::default).image = Some(image);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetContent {
    #[serde(default, deserialize_with = "lenient::value")]
    pub links: Option<AssetLinks>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub metadata: Option<AssetMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetLinks {
    #[serde(default, deserialize_with = "lenient::value")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetMetadata {
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetTokenInfo {
    #[serde(default, deserialize_with = "lenient::value")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub decimals: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub price_info: Option<AssetPriceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetPriceInfo {
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_per_token: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSummary {
    /// Tracked assets, in wallet order, with the tracked logo applied.
    pub holdings: Vec<Asset>,
    /// USD value of the tracked assets.
    pub tracked_total: f64,
    /// USD value of every priced asset in the wallet.
    pub wallet_total: f64,
}

impl PortfolioSummary {
    pub fn untracked_total(&self) -> f64 {
        (self.wallet_total - self.tracked_total).max(0.0)
    }
}
// endregion: --- Types

/// Keep the assets that belong to tracked tokens and total their value.
///
/// Identifiers are compared after [`normalize_id`]. A matched asset shows the
/// tracked token's logo when it has one.
pub fn summarize_portfolio(items: &[Asset], records: &[TokenRecord]) -> PortfolioSummary {
    let tracked: HashMap<String, &TokenRecord> = records
        .iter()
        .filter(|r| r.has_id())
        .map(|r| (r.normalized_id(), r))
        .collect();

    let holdings: Vec<Asset> = items
        .iter()
        .filter_map(|item| {
            let record = tracked.get(&normalize_id(&item.id))?;
            let mut holding = item.clone();
            if !record.img.logo.is_empty() {
                holding.set_image(record.img.logo.clone());
            }
            Some(holding)
        })
        .collect();

    PortfolioSummary {
        tracked_total: holdings.iter().map(Asset::total_price).sum(),
        wallet_total: items.iter().map(Asset::total_price).sum(),
        holdings,
    }
}

// region: --- Client
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: reqwest::Client,
    rpc_url: String,
    api_key: String,
}

impl PortfolioClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_rpc_url(api_key, DEFAULT_HELIUS_RPC_URL)
    }

    pub fn with_rpc_url(api_key: impl Into<String>, rpc_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("HELIUS_API_KEY").into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            api_key,
        })
    }

    pub fn from_config(config: &lib_core::Config) -> Result<Self> {
        Self::new(config.helius_api_key.clone().unwrap_or_default())
    }

    /// Fetch the first page of fungible assets held by `owner`.
    #[instrument(skip(self))]
    pub async fn assets_by_owner(&self, owner: &str) -> Result<AssetPage> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(AppError::InvalidInput("wallet address is empty".to_string()));
        }

        let page = self.request_assets(owner).await?;
        info!("Wallet {} holds {} assets", owner, page.items.len());
        Ok(page)
    }

    /// Fetch a wallet and summarize it against the tracked tokens.
    pub async fn portfolio(&self, owner: &str, records: &[TokenRecord]) -> Result<PortfolioSummary> {
        let page = self.assets_by_owner(owner).await?;
        let summary = summarize_portfolio(&page.items, records);
        debug!(
            "Portfolio {}: {} tracked holdings, ${:.2} of ${:.2}",
            owner,
            summary.holdings.len(),
            summary.tracked_total,
            summary.wallet_total
        );
        Ok(summary)
    }

    async fn request_assets(&self, owner: &str) -> MarketResult<AssetPage> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "1",
            "method": "getAssetsByOwner",
            "params": {
                "ownerAddress": owner,
                "page": 1,
                "limit": ASSET_PAGE_LIMIT,
                "sortBy": { "sortBy": "created", "sortDirection": "asc" },
                "options": {
                    "showUnverifiedCollections": false,
                    "showCollectionMetadata": false,
                    "showGrandTotal": true,
                    "showFungible": true,
                    "showNativeBalance": true,
                    "showInscription": false,
                    "showZeroBalance": false
                }
            }
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .query(&[("api-key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let text = response.text().await?;
        parse_assets_response(&text)
    }
}

fn parse_assets_response(text: &str) -> MarketResult<AssetPage> {
    let rpc: RpcResponse =
        serde_json::from_str(text).map_err(|e| Error::Decode(e.to_string()))?;

    if let Some(err) = rpc.error {
        return Err(Error::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    let result = rpc
        .result
        .ok_or_else(|| Error::Decode("response has no result".to_string()))?;
    if !result.get("items").is_some_and(|items| items.is_array()) {
        return Err(Error::Decode("result has no items array".to_string()));
    }

    serde_json::from_value(result).map_err(|e| Error::Decode(e.to_string()))
}
// endregion: --- Client

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;

    const RESPONSE: &str = r#"{
        "jsonrpc": "2.0",
        "id": "1",
        "result": {
            "total": 3, "limit": 1000, "page": 1,
            "items": [
                { "id": "MintA", "content": { "links": { "image": "https://helius/a.png" } },
                  "token_info": { "symbol": "A", "balance": 10, "price_info": { "price_per_token": 1.5, "total_price": 15.0, "currency": "USDC" } } },
                { "id": "Other", "content": { "links": { "image": "https://helius/o.png" } },
                  "token_info": { "symbol": "O", "price_info": { "total_price": 85.0 } } },
                { "id": "mintb ", "content": { "links": {} } }
            ]
        }
    }"#;

    fn tracked() -> Vec<TokenRecord> {
        let mut a = TokenRecord {
            mint: "minta".to_string(),
            ..Default::default()
        };
        a.img.logo = "https://tracked/a.png".to_string();
        let b = TokenRecord {
            mint: "MintB".to_string(),
            ..Default::default()
        };
        vec![a, b]
    }

    #[test]
    fn test_summarize_filters_and_totals() {
        let page = parse_assets_response(RESPONSE).unwrap();
        let summary = summarize_portfolio(&page.items, &tracked());

        let ids: Vec<&str> = summary.holdings.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["MintA", "mintb "]);
        assert_eq!(summary.holdings[0].image(), "https://tracked/a.png");
        assert_eq!(summary.holdings[1].image(), "");
        assert_eq!(summary.tracked_total, 15.0);
        assert_eq!(summary.wallet_total, 100.0);
        assert_eq!(summary.untracked_total(), 85.0);
    }

    #[test]
    fn test_rpc_error_and_bad_shapes() {
        let err = parse_assets_response(r#"{ "error": { "code": -32602, "message": "bad owner" } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Rpc { code: -32602, .. }));

        assert!(matches!(parse_assets_response(r#"{ "result": {} }"#), Err(Error::Decode(_))));
        assert!(matches!(parse_assets_response("nope"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(PortfolioClient::new(""), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_request_shape() {
        let server = serve(vec![(200, RESPONSE)]).await;
        let client = PortfolioClient::with_rpc_url("k123", format!("{}/", server.base_url)).unwrap();

        let summary = client.portfolio("Wallet1", &tracked()).await.unwrap();
        assert_eq!(summary.holdings.len(), 2);

        let requests = server.requests();
        assert_eq!(requests[0].line(), "POST /?api-key=k123 HTTP/1.1");
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["method"], "getAssetsByOwner");
        assert_eq!(body["params"]["ownerAddress"], "Wallet1");
        assert_eq!(body["params"]["limit"], 1000);
        assert_eq!(body["params"]["options"]["showFungible"], true);
        assert_eq!(body["params"]["options"]["showZeroBalance"], false);
    }

    #[tokio::test]
    async fn test_http_failure_surfaces() {
        let server = serve(vec![(503, "{}")]).await;
        let client = PortfolioClient::with_rpc_url("k", server.base_url.clone()).unwrap();
        let res = client.assets_by_owner("Wallet1").await;
        assert!(matches!(res, Err(AppError::Upstream(_))));
    }
}
