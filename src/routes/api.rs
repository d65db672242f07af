// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes for logged-in users.

use crate::error::Result;
use crate::models::list::{AddCryptosRequest, CreateListRequest};
use crate::models::{CoinSnapshot, CryptoList, ListCollection, ListSummary};
use crate::navigation::Route;
use crate::pagination::{paginate, PageQuery, DEFAULT_PER_PAGE};
use crate::session::SessionContext;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes (require a session).
/// The session gate is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/cryptos", get(get_cryptos))
        .route("/api/search", get(search))
        .route("/api/lists", get(get_lists).post(create_list))
        .route("/api/lists/{id}", get(get_list).delete(delete_list))
        .route("/api/lists/{id}/cryptos", post(add_cryptos))
        .route(
            "/api/lists/{id}/cryptos/{crypto_id}",
            delete(remove_crypto),
        )
}

// ─── Crypto Database ─────────────────────────────────────────

/// Query parameters for the saved-crypto database.
#[derive(Debug, Deserialize)]
pub struct CryptosParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Case-insensitive match on name or symbol
    pub filter: Option<String>,
}

impl CryptosParams {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page.unwrap_or(1),
            per_page: self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }
}

#[derive(Serialize)]
pub struct CryptosResponse {
    pub cryptos: Vec<CoinSnapshot>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
}

async fn get_cryptos(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Query(params): Query<CryptosParams>,
) -> Result<Json<CryptosResponse>> {
    // Reject a bad page before calling the API.
    let query = params.page_query();
    query.validate()?;

    let coins = state
        .crypto_service
        .filtered_cryptos(&ctx, params.filter())
        .await?;
    let page = paginate(coins, query)?;

    Ok(Json(CryptosResponse {
        cryptos: page.items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
    }))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<CoinSnapshot>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let results = state.crypto_service.search(&ctx, &params.q).await?;
    Ok(Json(SearchResponse {
        query: params.q.trim().to_string(),
        results,
    }))
}

// ─── Lists ───────────────────────────────────────────────────

async fn get_lists(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<ListCollection>> {
    Ok(Json(state.list_service.lists(&ctx).await?))
}

#[derive(Serialize)]
pub struct CreateListResponse {
    pub list: ListSummary,
    pub redirect: String,
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<CreateListResponse>)> {
    let list = state
        .list_service
        .create(&ctx, &req.list_name, req.crypto_ids)
        .await?;
    let redirect = ctx
        .navigator()
        .pending_redirect()
        .unwrap_or(Route::Home)
        .path();

    Ok((StatusCode::CREATED, Json(CreateListResponse { list, redirect })))
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<CryptoList>> {
    Ok(Json(state.list_service.find_by_id(&ctx, &id).await?))
}

/// Delete a list and answer with the lists that remain.
async fn delete_list(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<ListCollection>> {
    let mut lists = state.list_service.lists(&ctx).await?;
    let removed = state.list_service.delete(&ctx, &mut lists, &id).await?;
    if removed.is_none() {
        tracing::debug!(list_id = %id, "Deleted list was not in the user's collection");
    }
    Ok(Json(lists))
}

/// Add coins, then answer with the refreshed list.
async fn add_cryptos(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(req): Json<AddCryptosRequest>,
) -> Result<Json<CryptoList>> {
    state
        .list_service
        .add_cryptos(&ctx, &id, req.crypto_ids)
        .await?;
    Ok(Json(state.list_service.find_by_id(&ctx, &id).await?))
}

/// Remove one coin, then answer with the refreshed list.
async fn remove_crypto(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path((id, crypto_id)): Path<(String, String)>,
) -> Result<Json<CryptoList>> {
    state
        .list_service
        .remove_crypto(&ctx, &id, &crypto_id)
        .await?;
    Ok(Json(state.list_service.find_by_id(&ctx, &id).await?))
}
