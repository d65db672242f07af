// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication gate for protected views and API routes.

use crate::error::ErrorResponse;
use crate::navigation::Route;
use crate::session::{SessionContext, UserState};
use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};

/// Outcome of checking a navigation against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// No token: go to login before anything renders.
    RedirectToLogin,
    /// Token present but the user is not resolved yet.
    Loading,
    Render,
}

/// Decides whether a view may render for the current session.
pub struct AuthGate;

impl AuthGate {
    pub fn check(route: &Route, ctx: &SessionContext) -> GateDecision {
        if !route.is_protected() {
            return GateDecision::Render;
        }
        if ctx.token().is_none() {
            return GateDecision::RedirectToLogin;
        }
        match ctx.user_state() {
            UserState::Unresolved => GateDecision::Loading,
            UserState::Authenticated(_) => GateDecision::Render,
            // Token appeared after init; resolve on the next request.
            UserState::Anonymous => GateDecision::Loading,
        }
    }
}

fn loading_response() -> Response {
    let mut response = (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "loading".to_string(),
            details: None,
            redirect: None,
        }),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
    response
}

fn session_of(request: &Request) -> Option<SessionContext> {
    request.extensions().get::<SessionContext>().cloned()
}

/// Gate for JSON API routes: a missing session answers 401.
pub async fn require_session(request: Request, next: Next) -> Response {
    let Some(ctx) = session_of(&request) else {
        tracing::error!("Session layer missing in front of protected API route");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    // API routes have no view of their own; gate them like any protected view.
    match AuthGate::check(&Route::Dashboard, &ctx) {
        GateDecision::Render => next.run(request).await,
        GateDecision::Loading => loading_response(),
        GateDecision::RedirectToLogin => {
            tracing::debug!(path = %request.uri().path(), "API request without session");
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized(Some(&Route::Login.path()))),
            )
                .into_response()
        }
    }
}

/// Gate for view routes: a missing session redirects to login.
pub async fn require_view_session(request: Request, next: Next) -> Response {
    let Some(ctx) = session_of(&request) else {
        tracing::error!("Session layer missing in front of protected view");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let route = Route::from_path(request.uri().path()).unwrap_or(Route::Dashboard);
    match AuthGate::check(&route, &ctx) {
        GateDecision::Render => next.run(request).await,
        GateDecision::Loading => loading_response(),
        GateDecision::RedirectToLogin => {
            tracing::debug!(view = %route.path(), "Protected view without session");
            ctx.navigator().redirect_to_login();
            Redirect::to(&Route::Login.path()).into_response()
        }
    }
}
