//! # DexScreener API Types
//!
//! Type definitions for the `/latest/dex/tokens/{ids}` response.
//!
//! Every field is optional and decoded leniently: upstream sends prices as
//! strings, omits `info` for unlisted tokens and occasionally returns `null`
//! windows. A bad field degrades to `None`; only a missing `pairs` array fails
//! the response.

use lib_core::lenient;
use serde::Deserialize;

/// Response from the token-pairs endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexPairsResponse {
    #[serde(default, deserialize_with = "lenient::list")]
    pub pairs: Option<Vec<DexPair>>,
}

/// One trading pair for a token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default, deserialize_with = "lenient::value")]
    pub chain_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub dex_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub pair_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub base_token: Option<DexToken>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub quote_token: Option<DexToken>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_native: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub txns: Option<DexTxns>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub volume: Option<DexWindows>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub price_change: Option<DexWindows>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub liquidity: Option<DexLiquidity>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fdv: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub info: Option<DexInfo>,
}

impl DexPair {
    /// Address of the token this pair prices, if present.
    pub fn base_address(&self) -> Option<&str> {
        self.base_token.as_ref()?.address.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexToken {
    #[serde(default, deserialize_with = "lenient::value")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub symbol: Option<String>,
}

/// A metric reported per lookback window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexWindows {
    #[serde(default, deserialize_with = "lenient::number")]
    pub m5: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub h1: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub h6: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexTxns {
    #[serde(default, deserialize_with = "lenient::value")]
    pub m5: Option<DexTxnCount>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub h1: Option<DexTxnCount>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub h6: Option<DexTxnCount>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub h24: Option<DexTxnCount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexTxnCount {
    #[serde(default, deserialize_with = "lenient::number")]
    pub buys: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sells: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexLiquidity {
    #[serde(default, deserialize_with = "lenient::number")]
    pub usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub base: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexInfo {
    #[serde(default, deserialize_with = "lenient::value")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub header: Option<String>,
}
