//! # Record Normalizer
//!
//! Converts raw token-discovery payloads into canonical [`TokenRecord`]s.
//!
//! The discovery API is third-party and unversioned, so normalization never
//! fails: absent or malformed fields degrade to `""`, `0` or an empty list.
//!
//! ## Payload Shape
//!
//! ```text
//! { "data": { "tokenOfTheDay": {..}, "featured": [..], "newTokens": [..] } }
//! ```
//!
//! Output order is token of the day, then featured, then new tokens.

use crate::lenient::{self, to_count};
use crate::model::{MediaItem, TokenImages, TokenRecord, Tokenomics};
use serde::Deserialize;
use tracing::{debug, warn};

// region: --- Raw Types
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDiscoveryResponse {
    #[serde(default, deserialize_with = "lenient::value")]
    pub data: Option<RawDiscoveryData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiscoveryData {
    #[serde(default, deserialize_with = "lenient::value")]
    pub token_of_the_day: Option<RawToken>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub featured: Option<Vec<RawToken>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub new_tokens: Option<Vec<RawToken>>,
}

/// A token as the discovery API reports it. Only the fields the canonical
/// record needs are decoded; the rest of the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToken {
    #[serde(default, deserialize_with = "lenient::value")]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub avatar_img: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub mint_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub token_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub market_summary: Option<RawMarketSummary>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub media: Option<Vec<RawMedia>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarketSummary {
    #[serde(default, deserialize_with = "lenient::number")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub holder: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub liquidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    #[serde(rename = "type", default, deserialize_with = "lenient::value")]
    pub kind: Option<String>,
    #[serde(rename = "mediaURL", default, deserialize_with = "lenient::value")]
    pub media_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub position: Option<f64>,
}
// endregion: --- Raw Types

// region: --- Normalization
/// Map one raw discovery token onto the canonical record shape.
pub fn normalize_token(raw: &RawToken) -> TokenRecord {
    let summary = raw.market_summary.clone().unwrap_or_default();

    TokenRecord {
        mint: raw.mint_address.clone().unwrap_or_default(),
        ticker: raw.ticker.clone().unwrap_or_default(),
        name: raw.name.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        img: TokenImages {
            logo: raw.avatar_img.clone().unwrap_or_default(),
            banner: String::new(),
        },
        price: raw.token_price.unwrap_or(0.0),
        tokenomics: Tokenomics {
            market_cap: summary.market_cap.unwrap_or(0.0),
            holder: to_count(summary.holder),
            liquidity: summary.liquidity.unwrap_or(0.0),
            price: summary.price.unwrap_or(0.0),
            ..Default::default()
        },
        media: raw
            .media
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|m| MediaItem {
                kind: m.kind.clone().unwrap_or_default(),
                media_url: m.media_url.clone().unwrap_or_default(),
                position: m.position.map(|p| p as i64).unwrap_or(0),
            })
            .collect(),
        ..Default::default()
    }
}

/// Normalize every token in a discovery payload.
pub fn normalize_discovery(raw: &RawDiscoveryResponse) -> Vec<TokenRecord> {
    let Some(data) = raw.data.as_ref() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    if let Some(totd) = &data.token_of_the_day {
        records.push(normalize_token(totd));
    }
    for raw in data.featured.iter().flatten() {
        records.push(normalize_token(raw));
    }
    for raw in data.new_tokens.iter().flatten() {
        records.push(normalize_token(raw));
    }

    debug!("Normalized {} discovery tokens", records.len());
    records
}

/// Parse and normalize a discovery response body.
///
/// Never fails: a body that is not JSON yields an empty list.
pub fn parse_discovery(body: &str) -> Vec<TokenRecord> {
    match serde_json::from_str::<RawDiscoveryResponse>(body) {
        Ok(raw) => normalize_discovery(&raw),
        Err(e) => {
            warn!("Discovery payload is not valid JSON: {}", e);
            Vec::new()
        }
    }
}
// endregion: --- Normalization
