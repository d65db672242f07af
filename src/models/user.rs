// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account payloads exchanged with the watchlist API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Authenticated user as returned by login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Bearer token for the session
    pub token: String,
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub user_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Password reset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_login_response() {
        let user: User = serde_json::from_value(serde_json::json!({
            "token": "abc",
            "userName": "alice",
            "email": "alice@example.com",
            "firstName": "Alice",
            "lastName": "Liddell",
            "_id": "ignored"
        }))
        .unwrap();

        assert_eq!(user.token, "abc");
        assert_eq!(user.user_name.as_deref(), Some("alice"));
        assert_eq!(user.last_name.as_deref(), Some("Liddell"));
    }

    #[test]
    fn test_login_response_without_token_is_rejected() {
        let result: Result<User, _> =
            serde_json::from_value(serde_json::json!({ "userName": "alice" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_register_validation() {
        let mut req = RegisterRequest {
            user_name: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "hunter2".to_string(),
            first_name: "Bob".to_string(),
            last_name: String::new(),
        };
        assert!(req.validate().is_ok());

        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());

        req.email = "bob@example.com".to_string();
        req.user_name = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_wire_names() {
        let req = RegisterRequest {
            user_name: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "pw".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Builder".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["userName"], "bob");
        assert_eq!(value["firstName"], "Bob");
        assert_eq!(value["lastName"], "Builder");
    }
}
