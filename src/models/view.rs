// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View models rendered by the browser front end.
//!
//! Numbers arrive pre-formatted; failures other than an expired session are
//! carried inline as `error` text so a view never breaks.

use crate::format::{format_change, format_usd, ChangeDirection};
use crate::models::crypto::CoinSnapshot;
use crate::models::list::{CryptoList, ListSummary};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One table row describing a coin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CoinRow {
    pub crypto_id: String,
    pub name: String,
    /// Upper-cased ticker
    pub symbol: String,
    pub thumbnail: Option<String>,
    pub price: String,
    pub change_24h: String,
    pub change_direction: ChangeDirection,
    pub market_cap: String,
    pub volume: String,
}

impl From<&CoinSnapshot> for CoinRow {
    fn from(coin: &CoinSnapshot) -> Self {
        Self {
            crypto_id: coin.crypto_id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            thumbnail: coin.thumbnail.clone(),
            price: format_usd(coin.price),
            change_24h: format_change(coin.change_24h),
            change_direction: ChangeDirection::of(coin.change_24h),
            market_cap: format_usd(coin.market_cap),
            volume: format_usd(coin.volume),
        }
    }
}

/// Card on the list overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListCard {
    pub id: String,
    pub name: String,
    pub coin_count: u32,
    /// Browser path of the list's edit view
    pub href: String,
}

impl From<&ListSummary> for ListCard {
    fn from(list: &ListSummary) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            coin_count: u32::try_from(list.crypto_ids.len()).unwrap_or(u32::MAX),
            href: crate::navigation::Route::EditList(list.id.clone()).path(),
        }
    }
}

/// `/dashboard`: the user's lists.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardView {
    pub lists: Vec<ListCard>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// `/database`: one page of the saved-crypto database.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DatabaseView {
    pub rows: Vec<CoinRow>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub filter: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// `/search?q=`: search results with market data.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<CoinRow>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// A list with its coin rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListDetail {
    pub id: String,
    pub name: String,
    pub rows: Vec<CoinRow>,
}

impl From<&CryptoList> for ListDetail {
    fn from(list: &CryptoList) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            rows: list.cryptos.iter().map(CoinRow::from).collect(),
        }
    }
}

/// `/lists/{id}`: edit view of one list.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EditListView {
    pub list: Option<ListDetail>,
    pub error: Option<String>,
}
