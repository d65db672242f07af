// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Watchlist CRUD against the remote API.
//!
//! Handles:
//! - Creating lists (name checked before anything is sent)
//! - Fetching one list with coin snapshots, or all of the user's lists
//! - Adding and removing coins
//! - Deleting lists
//!
//! Membership is owned by the API. Within one request, a fetched list is
//! kept in the request's [`ListCache`] so repeated reads agree; every
//! mutation invalidates the affected entry explicitly, so the next read goes
//! back to the API. Nothing outlives the request.

use crate::error::AppError;
use crate::models::list::{dedup_ids, AddCryptosRequest, CreateListRequest};
use crate::models::{CryptoList, ListCollection, ListSummary};
use crate::navigation::Route;
use crate::services::api_client::{segment, ApiClient};
use crate::session::SessionContext;
use dashmap::DashMap;

/// Lists fetched during one request, keyed by list id.
#[derive(Debug, Default)]
pub struct ListCache {
    entries: DashMap<String, CryptoList>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, list_id: &str) -> Option<CryptoList> {
        self.entries.get(list_id).map(|entry| entry.clone())
    }

    pub fn insert(&self, list: CryptoList) {
        self.entries.insert(list.id.clone(), list);
    }

    /// Drop one cached list. Returns whether an entry was present.
    pub fn invalidate(&self, list_id: &str) -> bool {
        self.entries.remove(list_id).is_some()
    }

    /// Drop everything (logout, rejected token).
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn contains(&self, list_id: &str) -> bool {
        self.entries.contains_key(list_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// List CRUD service.
#[derive(Clone)]
pub struct ListService {
    api: ApiClient,
}

impl ListService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create a list from `name` and the selected coin ids.
    ///
    /// Without a session the browser is sent to login; a blank name is
    /// rejected. Neither case reaches the API. On success the browser
    /// continues to the list overview.
    pub async fn create(
        &self,
        ctx: &SessionContext,
        name: &str,
        crypto_ids: Vec<String>,
    ) -> Result<ListSummary, AppError> {
        if ctx.token().is_none() {
            ctx.navigator().redirect_to_login();
            return Err(AppError::Unauthorized);
        }

        if name.trim().is_empty() {
            return Err(AppError::Validation("List name is required".to_string()));
        }

        let body = CreateListRequest {
            list_name: name.to_string(),
            crypto_ids: dedup_ids(crypto_ids),
        };

        let created: serde_json::Value =
            self.api.post(ctx, "/crypto/create-list", &body).await?;

        let summary = if created.is_object() {
            ListSummary::from_payload(created)?
        } else {
            ListSummary {
                id: String::new(),
                name: body.list_name.clone(),
                crypto_ids: body.crypto_ids.clone(),
            }
        };

        tracing::info!(list_id = %summary.id, coins = body.crypto_ids.len(), "List created");
        ctx.navigator().navigate(Route::Home);
        Ok(summary)
    }

    /// All of the user's lists.
    pub async fn lists(&self, ctx: &SessionContext) -> Result<ListCollection, AppError> {
        let payload: serde_json::Value = self.api.get(ctx, "/crypto/get-list").await?;
        ListCollection::from_payload(payload)
    }

    /// One list with its coin snapshots.
    pub async fn find_by_id(&self, ctx: &SessionContext, list_id: &str) -> Result<CryptoList, AppError> {
        if ctx.token().is_none() {
            ctx.navigator().redirect_to_login();
            return Err(AppError::Unauthorized);
        }

        if let Some(list) = ctx.list_cache().get(list_id) {
            tracing::debug!(list_id, "List already fetched in this request");
            return Ok(list);
        }

        let path = format!("/crypto/findListBy/{}", segment(list_id));
        let payload: serde_json::Value = self.api.get(ctx, &path).await?;
        let mut list = CryptoList::from_payload(payload)?;
        if list.id.is_empty() {
            list.id = list_id.to_string();
        }

        ctx.list_cache().insert(list.clone());
        Ok(list)
    }

    /// Add coins to a list.
    pub async fn add_cryptos(
        &self,
        ctx: &SessionContext,
        list_id: &str,
        crypto_ids: Vec<String>,
    ) -> Result<(), AppError> {
        let crypto_ids = dedup_ids(crypto_ids);
        if crypto_ids.is_empty() {
            return Err(AppError::Validation(
                "Select at least one cryptocurrency".to_string(),
            ));
        }

        let path = format!("/crypto/add-to-list/{}", segment(list_id));
        let _: serde_json::Value = self
            .api
            .post(ctx, &path, &AddCryptosRequest { crypto_ids })
            .await?;
        ctx.list_cache().invalidate(list_id);
        Ok(())
    }

    /// Remove one coin from a list. Callers re-fetch the list afterwards.
    pub async fn remove_crypto(
        &self,
        ctx: &SessionContext,
        list_id: &str,
        crypto_id: &str,
    ) -> Result<(), AppError> {
        let path = format!(
            "/crypto/remove-from-list/{}/{}",
            segment(list_id),
            segment(crypto_id)
        );
        let _: serde_json::Value = self.api.delete(ctx, &path).await?;
        ctx.list_cache().invalidate(list_id);
        tracing::info!(list_id, crypto_id, "Coin removed from list");
        Ok(())
    }

    /// Delete a list, then drop it from the caller's collection by id.
    pub async fn delete(
        &self,
        ctx: &SessionContext,
        lists: &mut ListCollection,
        list_id: &str,
    ) -> Result<Option<ListSummary>, AppError> {
        let path = format!("/crypto/delete-list/{}", segment(list_id));
        let _: serde_json::Value = self.api.delete(ctx, &path).await?;
        ctx.list_cache().invalidate(list_id);
        tracing::info!(list_id, "List deleted");
        Ok(lists.remove(list_id))
    }
}
