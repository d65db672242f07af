// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account flows: login, registration, email verification, password reset.

use crate::error::AppError;
use crate::models::{ForgotPasswordRequest, LoginRequest, RegisterRequest, User};
use crate::navigation::Route;
use crate::services::api_client::ApiClient;
use crate::session::SessionContext;
use validator::Validate;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in and start a session; the browser continues to the dashboard.
    pub async fn login(&self, ctx: &SessionContext, req: &LoginRequest) -> Result<User, AppError> {
        req.validate()?;

        let user: User = self.api.post(ctx, "/user/login", req).await?;
        if user.token.trim().is_empty() {
            return Err(AppError::MalformedPayload(
                "login response carried an empty token".to_string(),
            ));
        }

        ctx.login(user.clone());
        ctx.navigator().navigate(Route::Dashboard);
        tracing::info!(user_name = ?user.user_name, "User logged in");
        Ok(user)
    }

    /// Create an account; the browser continues to login.
    pub async fn register(&self, ctx: &SessionContext, req: &RegisterRequest) -> Result<(), AppError> {
        req.validate()?;

        let _: serde_json::Value = self.api.post(ctx, "/user/register", req).await?;
        ctx.navigator().navigate(Route::Login);
        tracing::info!(user_name = %req.user_name, "Account registered");
        Ok(())
    }

    /// Confirm an email address with the token from the verification link.
    pub async fn verify_email(&self, ctx: &SessionContext, token: &str) -> Result<(), AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Validation(
                "Verification token is required".to_string(),
            ));
        }

        let path = format!("/user/verify-email?token={}", urlencoding::encode(token));
        let _: serde_json::Value = self.api.get(ctx, &path).await?;
        ctx.navigator().navigate(Route::Login);
        Ok(())
    }

    pub async fn forgot_password(
        &self,
        ctx: &SessionContext,
        req: &ForgotPasswordRequest,
    ) -> Result<(), AppError> {
        req.validate()?;

        let _: serde_json::Value = self.api.post(ctx, "/user/forgot-password", req).await?;
        Ok(())
    }

    /// End the session locally; the API keeps no logout endpoint.
    pub fn logout(&self, ctx: &SessionContext) {
        ctx.logout();
        ctx.navigator().navigate(Route::Login);
    }
}
