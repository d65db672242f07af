// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message shown when the API returns data in an unexpected shape.
pub const MALFORMED_PAYLOAD_MESSAGE: &str = "Invalid data format received from server";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The API rejected the session (HTTP 401) or no token is stored.
    #[error("Authentication required")]
    Unauthorized,

    /// Input rejected before anything was sent to the API.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The API answered, but not with the shape we expect.
    #[error("Invalid data format received from server: {0}")]
    MalformedPayload(String),

    /// Any other non-success answer from the API, surfaced unchanged.
    #[error("API error (HTTP {status})")]
    Upstream { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Text a view shows inline for this error.
    ///
    /// Prefers the API's own `message`, then our validation text, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Upstream {
                message: Some(message),
                ..
            } => message.clone(),
            AppError::Validation(message) => message.clone(),
            AppError::MalformedPayload(_) => MALFORMED_PAYLOAD_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status this error is answered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedPayload(_) | AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Where the browser should navigate next, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ErrorResponse {
    pub fn unauthorized(redirect: Option<&str>) -> Self {
        Self {
            error: "unauthorized".to_string(),
            details: None,
            redirect: redirect.map(str::to_string),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, details) = match &self {
            AppError::Unauthorized => ("unauthorized", None),
            AppError::Validation(msg) => ("validation_error", Some(msg.clone())),
            AppError::MalformedPayload(msg) => {
                tracing::error!(error = %msg, "Malformed payload from API");
                (
                    "malformed_payload",
                    Some(MALFORMED_PAYLOAD_MESSAGE.to_string()),
                )
            }
            AppError::Upstream { message, .. } => ("upstream_error", message.clone()),
            AppError::Transport(msg) => {
                tracing::warn!(error = %msg, "API unreachable");
                ("network_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ("internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            redirect: None,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_api_message() {
        let err = AppError::Upstream {
            status: 409,
            message: Some("List name already taken".to_string()),
        };
        assert_eq!(err.user_message("Failed to create list"), "List name already taken");

        let err = AppError::Upstream {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Failed to create list"), "Failed to create list");

        let err = AppError::Transport("connection refused".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_upstream_status_is_preserved() {
        let response = AppError::Upstream {
            status: 404,
            message: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Upstream {
            status: 1000,
            message: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_malformed_payload_hides_details() {
        let err = AppError::MalformedPayload("missing field `cryptos`".to_string());
        assert_eq!(err.user_message("x"), MALFORMED_PAYLOAD_MESSAGE);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
