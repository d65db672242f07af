// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-request session lifecycle.
//!
//! Before the handler runs, the token is loaded from the browser into a
//! fresh [`SessionContext`] and the user state is resolved. Afterwards, any
//! change to the token is written back as a `Set-Cookie`, and a login
//! redirect issued during the request becomes the response.

use crate::error::ErrorResponse;
use crate::navigation::{Navigator, Route};
use crate::session::cookie::{removal_cookie, session_cookie, token_from_request};
use crate::session::{MemorySessionStore, SessionContext};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Header the front end uses to report which view is showing.
pub const CURRENT_VIEW_HEADER: &str = "x-current-view";

/// View the browser is on: the `X-Current-View` header, else the request path.
fn current_view(request: &Request) -> Route {
    request
        .headers()
        .get(CURRENT_VIEW_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(Route::from_path)
        .or_else(|| Route::from_path(request.uri().path()))
        .unwrap_or(Route::Landing)
}

/// Build the request's [`SessionContext`] and write it back afterwards.
pub async fn session_layer(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let initial_token = token_from_request(&jar, request.headers());
    let from_cookie = jar.get(crate::session::cookie::TOKEN_COOKIE).is_some();
    let is_view = request.uri().path().starts_with("/views");

    let store = Arc::new(MemorySessionStore::with_token(initial_token.clone()));
    let ctx = SessionContext::new(store, Navigator::new(current_view(&request)));
    ctx.init();
    request.extensions_mut().insert(ctx.clone());

    let response = next.run(request).await;

    let navigator = ctx.navigator();
    let mut response = if navigator.redirected_to_login() {
        if is_view {
            Redirect::to(&Route::Login.path()).into_response()
        } else if response.status() == StatusCode::UNAUTHORIZED {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized(Some(&Route::Login.path()))),
            )
                .into_response()
        } else {
            response
        }
    } else {
        response
    };

    let final_token = ctx.token();
    if final_token != initial_token {
        let secure = state.config.secure_cookies();
        let cookie = match &final_token {
            Some(token) => Some(session_cookie(token, secure)),
            // A bearer-header session has no cookie to remove.
            None if from_cookie => Some(removal_cookie(secure)),
            None => None,
        };
        if let Some(cookie) = cookie {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header"),
            }
        }
    }

    response
}
