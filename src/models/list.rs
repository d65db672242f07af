// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Watchlists: named sets of coin references.
//!
//! A list holds each `cryptoId` at most once. Ids are deduplicated before
//! they are sent and again when a list is read back (first occurrence wins).

use crate::error::AppError;
use crate::models::crypto::{CoinSnapshot, RawCoin};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A list with fully resolved coin snapshots (`GET /crypto/findListBy/:id`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoList {
    pub id: String,
    pub name: String,
    pub cryptos: Vec<CoinSnapshot>,
}

/// A list as shown on the overview (`GET /crypto/get-list`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub crypto_ids: Vec<String>,
}

/// Entry of a list's `cryptos` array: a full coin or a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Id(String),
    Coin(RawCoin),
}

impl From<RawEntry> for CoinSnapshot {
    fn from(entry: RawEntry) -> Self {
        match entry {
            RawEntry::Id(id) => CoinSnapshot::from_id(id),
            RawEntry::Coin(raw) => raw.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawList {
    #[serde(default, rename = "_id")]
    document_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "listName")]
    list_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    cryptos: Option<Vec<RawEntry>>,
}

impl RawList {
    fn id(&mut self) -> String {
        self.document_id
            .take()
            .or_else(|| self.id.take())
            .unwrap_or_default()
    }

    fn name(&mut self) -> String {
        self.list_name
            .take()
            .or_else(|| self.name.take())
            .unwrap_or_default()
    }
}

impl CryptoList {
    /// Parse a list detail payload.
    ///
    /// Fails unless the payload is an object carrying a `cryptos` array.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, AppError> {
        let mut raw: RawList = serde_json::from_value(payload)
            .map_err(|e| AppError::MalformedPayload(e.to_string()))?;

        let entries = raw
            .cryptos
            .take()
            .ok_or_else(|| AppError::MalformedPayload("missing `cryptos` array".to_string()))?;

        let id = raw.id();
        let mut seen = HashSet::new();
        let mut cryptos = Vec::with_capacity(entries.len());
        for coin in entries.into_iter().map(CoinSnapshot::from) {
            if seen.insert(coin.crypto_id.clone()) {
                cryptos.push(coin);
            } else {
                tracing::warn!(list_id = %id, crypto_id = %coin.crypto_id, "Duplicate coin in list payload, dropping");
            }
        }

        Ok(Self {
            name: raw.name(),
            id,
            cryptos,
        })
    }

    pub fn contains(&self, crypto_id: &str) -> bool {
        self.cryptos.iter().any(|c| c.crypto_id == crypto_id)
    }
}

impl ListSummary {
    /// Parse one list object leniently; a missing `cryptos` array means no coins.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, AppError> {
        let mut raw: RawList = serde_json::from_value(payload)
            .map_err(|e| AppError::MalformedPayload(e.to_string()))?;

        let crypto_ids = dedup_ids(
            raw.cryptos
                .take()
                .unwrap_or_default()
                .into_iter()
                .map(|entry| CoinSnapshot::from(entry).crypto_id),
        );

        Ok(Self {
            id: raw.id(),
            name: raw.name(),
            crypto_ids,
        })
    }
}

/// The user's lists, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListCollection {
    lists: Vec<ListSummary>,
}

impl ListCollection {
    pub fn new(lists: Vec<ListSummary>) -> Self {
        Self { lists }
    }

    /// Parse `GET /crypto/get-list`; an empty body is an empty collection.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, AppError> {
        let items = match payload {
            serde_json::Value::Null => Vec::new(),
            serde_json::Value::Array(items) => items,
            other => {
                return Err(AppError::MalformedPayload(format!(
                    "expected an array of lists, got {}",
                    json_kind(&other)
                )))
            }
        };

        let lists = items
            .into_iter()
            .map(ListSummary::from_payload)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lists })
    }

    /// Remove the list whose id equals `list_id`, leaving all others in place.
    pub fn remove(&mut self, list_id: &str) -> Option<ListSummary> {
        let index = self.lists.iter().position(|l| l.id == list_id)?;
        Some(self.lists.remove(index))
    }

    pub fn get(&self, list_id: &str) -> Option<&ListSummary> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListSummary> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn into_inner(self) -> Vec<ListSummary> {
        self.lists
    }
}

/// Body of `POST /crypto/create-list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub list_name: String,
    #[serde(default)]
    pub crypto_ids: Vec<String>,
}

/// Body of `POST /crypto/add-to-list/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCryptosRequest {
    pub crypto_ids: Vec<String>,
}

/// Drop blank and repeated ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
