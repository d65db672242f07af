// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: login, registration, email verification, logout.
//!
//! These are public. The session token never appears in a response body;
//! the session layer persists it as an HttpOnly cookie.

use crate::error::{AppError, ErrorResponse};
use crate::models::{ForgotPasswordRequest, LoginRequest, RegisterRequest, User};
use crate::navigation::Route;
use crate::session::SessionContext;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/verify-email", get(verify_email))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/logout", post(logout))
}

/// Failed form submission: the error's status with a message fit for the form.
fn form_error(err: AppError, fallback: &str) -> Response {
    let status = err.status_code();
    tracing::info!(status = status.as_u16(), error = %err, "Account request failed");
    let body = ErrorResponse {
        error: fallback.to_string(),
        details: Some(err.user_message(fallback)),
        redirect: None,
    };
    (status, Json(body)).into_response()
}

/// Where the browser should go after a completed account action.
fn next_path(ctx: &SessionContext, default: Route) -> String {
    ctx.navigator().pending_redirect().unwrap_or(default).path()
}

// ─── Login ───────────────────────────────────────────────────

/// Profile of the logged-in user, without the token.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_name: user.user_name,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub redirect: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.auth_service.login(&ctx, &req).await {
        Ok(user) => Json(LoginResponse {
            user: user.into(),
            redirect: next_path(&ctx, Route::Dashboard),
        })
        .into_response(),
        Err(e) => form_error(e, "Login failed"),
    }
}

// ─── Registration ────────────────────────────────────────────

/// Outcome of an account action that leads somewhere else.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActionResponse {
    pub message: String,
    pub redirect: Option<String>,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    match state.auth_service.register(&ctx, &req).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ActionResponse {
                message: "Registration successful. Please check your email to verify your account."
                    .to_string(),
                redirect: Some(next_path(&ctx, Route::Login)),
            }),
        )
            .into_response(),
        Err(e) => form_error(e, "Registration failed"),
    }
}

// ─── Email Verification ──────────────────────────────────────

#[derive(Deserialize)]
struct VerifyEmailParams {
    #[serde(default)]
    token: Option<String>,
}

/// Verification status shown on the verify-email view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum VerifyStatus {
    Success,
    Error,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerifyEmailResponse {
    pub status: VerifyStatus,
    pub message: String,
    pub redirect: Option<String>,
}

async fn verify_email(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Query(params): Query<VerifyEmailParams>,
) -> Response {
    let token = params.token.unwrap_or_default();
    match state.auth_service.verify_email(&ctx, &token).await {
        Ok(()) => Json(VerifyEmailResponse {
            status: VerifyStatus::Success,
            message: "Email verified successfully!".to_string(),
            redirect: Some(next_path(&ctx, Route::Login)),
        })
        .into_response(),
        Err(e) => {
            tracing::info!(error = %e, "Email verification failed");
            (
                e.status_code(),
                Json(VerifyEmailResponse {
                    status: VerifyStatus::Error,
                    message: "Failed to verify email. Please try again.".to_string(),
                    redirect: None,
                }),
            )
                .into_response()
        }
    }
}

// ─── Password Reset ──────────────────────────────────────────

async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Response {
    match state.auth_service.forgot_password(&ctx, &req).await {
        Ok(()) => Json(ActionResponse {
            message: "If the address is registered, a reset link is on its way.".to_string(),
            redirect: None,
        })
        .into_response(),
        Err(e) => form_error(e, "Password reset failed"),
    }
}

// ─── Logout ──────────────────────────────────────────────────

/// End the session; the session layer clears the token cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<SessionContext>,
) -> StatusCode {
    state.auth_service.logout(&ctx);
    tracing::info!("User logged out");
    StatusCode::NO_CONTENT
}
