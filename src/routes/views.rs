// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View routes: ready-to-render models for the protected pages.
//!
//! A failed API call never fails the view. The error becomes inline text
//! in the view model and the response stays 200. An expired session is the
//! exception: it propagates, and the session layer turns it into a redirect
//! to login.

use crate::error::{AppError, Result};
use crate::models::view::{
    CoinRow, DashboardView, DatabaseView, EditListView, ListCard, ListDetail, SearchView,
};
use crate::pagination::paginate;
use crate::routes::api::{CryptosParams, SearchParams};
use crate::session::SessionContext;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use std::sync::Arc;

/// View routes (require a session).
/// The view gate is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/views/dashboard", get(dashboard))
        .route("/views/database", get(database))
        .route("/views/search", get(search))
        .route("/views/lists/{id}", get(edit_list))
        .route(
            "/views/lists/{id}/cryptos/{crypto_id}",
            delete(remove_from_list),
        )
}

/// Split a result into data or inline error text; 401 still propagates.
fn inline<T>(result: Result<T>, fallback: &str) -> Result<std::result::Result<T, String>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            tracing::warn!(error = %e, "View data unavailable");
            Ok(Err(e.user_message(fallback)))
        }
    }
}

// ─── Dashboard ───────────────────────────────────────────────

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<DashboardView>> {
    let view = match inline(state.list_service.lists(&ctx).await, "Failed to load lists")? {
        Ok(lists) => {
            let lists: Vec<ListCard> = lists.iter().map(ListCard::from).collect();
            let message = lists
                .is_empty()
                .then(|| "You have no lists yet".to_string());
            DashboardView {
                lists,
                message,
                error: None,
            }
        }
        Err(error) => DashboardView {
            error: Some(error),
            ..DashboardView::default()
        },
    };
    Ok(Json(view))
}

// ─── Database ────────────────────────────────────────────────

async fn database(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Query(params): Query<CryptosParams>,
) -> Result<Json<DatabaseView>> {
    let query = params.page_query();
    query.validate()?;
    let filter = params.filter().map(str::to_string);

    let coins = state
        .crypto_service
        .filtered_cryptos(&ctx, filter.as_deref())
        .await;
    let view = match inline(coins, "Failed to fetch cryptocurrencies")? {
        Ok(coins) => {
            let page = paginate(coins, query)?;
            let message = (page.total == 0).then(|| "No cryptocurrencies found".to_string());
            DatabaseView {
                rows: page.items.iter().map(CoinRow::from).collect(),
                page: page.page,
                per_page: page.per_page,
                total: page.total,
                total_pages: page.total_pages,
                filter,
                message,
                error: None,
            }
        }
        Err(error) => DatabaseView {
            page: query.page,
            per_page: query.per_page,
            filter,
            error: Some(error),
            ..DatabaseView::default()
        },
    };
    Ok(Json(view))
}

// ─── Search ──────────────────────────────────────────────────

async fn search(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchView>> {
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Ok(Json(SearchView::default()));
    }

    let results = state.crypto_service.search(&ctx, &query).await;
    let view = match inline(results, "Failed to fetch search results")? {
        Ok(coins) => {
            let message = coins.is_empty().then(|| "No results found".to_string());
            SearchView {
                query,
                results: coins.iter().map(CoinRow::from).collect(),
                message,
                error: None,
            }
        }
        Err(_) => SearchView {
            query,
            error: Some("Failed to fetch search results".to_string()),
            ..SearchView::default()
        },
    };
    Ok(Json(view))
}

// ─── Edit List ───────────────────────────────────────────────

async fn load_list(state: &AppState, ctx: &SessionContext, id: &str) -> Result<EditListView> {
    let list = state.list_service.find_by_id(ctx, id).await;
    Ok(match inline(list, "Failed to load list details")? {
        Ok(list) => EditListView {
            list: Some(ListDetail::from(&list)),
            error: None,
        },
        Err(error) => EditListView {
            list: None,
            error: Some(error),
        },
    })
}

async fn edit_list(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<EditListView>> {
    Ok(Json(load_list(&state, &ctx, &id).await?))
}

/// Remove a coin from the list being edited and show the refreshed list.
async fn remove_from_list(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Path((id, crypto_id)): Path<(String, String)>,
) -> Result<Json<EditListView>> {
    let removed = state.list_service.remove_crypto(&ctx, &id, &crypto_id).await;
    let removal_error = match inline(removed, "Failed to remove cryptocurrency")? {
        Ok(()) => None,
        Err(_) => Some("Failed to remove cryptocurrency".to_string()),
    };

    let mut view = load_list(&state, &ctx, &id).await?;
    if removal_error.is_some() {
        view.error = removal_error;
    }
    Ok(Json(view))
}
