// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the remote watchlist API.
//!
//! Every call:
//! - attaches the session token as a bearer credential, if there is one
//! - on HTTP 401, clears the session and sends the browser to login
//!   (skipped when the browser is already on login)
//! - surfaces every other error status unchanged, with the API's `message`

use crate::error::AppError;
use crate::session::SessionContext;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Error body shape used by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Watchlist API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &SessionContext,
        path: &str,
    ) -> Result<T, AppError> {
        self.send(ctx, self.request(ctx, Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ctx: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.send(ctx, self.request(ctx, Method::POST, path).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        ctx: &SessionContext,
        path: &str,
    ) -> Result<T, AppError> {
        self.send(ctx, self.request(ctx, Method::DELETE, path)).await
    }

    /// Build a request with the session's bearer token attached.
    fn request(&self, ctx: &SessionContext, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match ctx.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        ctx: &SessionContext,
        builder: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let url = response.url().path().to_string();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            let redirected = ctx.handle_unauthorized();
            tracing::warn!(path = %url, redirected, "API rejected session (401), session cleared");
            return Err(AppError::Unauthorized);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::debug!(path = %url, status = status.as_u16(), message = ?message, "API error response");
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        parse_body(&body)
    }
}

/// Parse a success body; an empty body reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    result.map_err(|e| AppError::MalformedPayload(format!("JSON parse error: {}", e)))
}

/// Percent-encode one path segment.
pub fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
