// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coin records as supplied by the watchlist API.
//!
//! The API describes coins in several shapes (saved cryptos, market data,
//! list entries) with overlapping field names. Everything is read through
//! [`RawCoin`] and normalized into a [`CoinSnapshot`].

use serde::{Deserialize, Serialize};

/// Normalized display snapshot of one coin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinSnapshot {
    pub crypto_id: String,
    pub name: String,
    pub symbol: String,
    pub price: Option<f64>,
    /// 24h change, in percent
    pub change_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
    pub thumbnail: Option<String>,
}

impl CoinSnapshot {
    /// A snapshot that only knows its id (list entries stored as bare ids).
    pub fn from_id(crypto_id: impl Into<String>) -> Self {
        Self {
            crypto_id: crypto_id.into(),
            name: String::new(),
            symbol: String::new(),
            price: None,
            change_24h: None,
            market_cap: None,
            volume: None,
            thumbnail: None,
        }
    }

    /// Case-insensitive substring match on name or symbol.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.symbol.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinImages {
    #[serde(default)]
    pub thumb: Option<String>,
}

/// Any coin-shaped object the API returns.
///
/// Aliased fields are kept separate so a payload carrying both spellings
/// (e.g. `cryptoId` and a document `_id`) still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoin {
    #[serde(default, rename = "cryptoId")]
    pub crypto_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub document_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default, rename = "marketCap")]
    pub market_cap_camel: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub images: Option<CoinImages>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<RawCoin> for CoinSnapshot {
    fn from(raw: RawCoin) -> Self {
        Self {
            crypto_id: raw
                .crypto_id
                .or(raw.id)
                .or(raw.document_id)
                .unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            symbol: raw.symbol.unwrap_or_default(),
            price: raw.current_price,
            // Market data carries both; the percentage is what tables show.
            change_24h: raw.price_change_percentage_24h.or(raw.price_change_24h),
            market_cap: raw.market_cap_camel.or(raw.market_cap),
            volume: raw.total_volume,
            thumbnail: raw.images.and_then(|i| i.thumb).or(raw.image),
        }
    }
}

/// One hit from `POST /crypto/search`; only the id is used.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: String,
}

/// Body of `POST /crypto/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}
