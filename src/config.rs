// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default base URL of the remote watchlist API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote watchlist API (no trailing slash)
    pub api_base_url: String,
    /// Frontend URL, used for CORS and cookie security attributes
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Maximum number of market-data requests in flight for one search
    pub search_concurrency: usize,
    /// Timeout applied to every outbound API request
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let search_concurrency: usize = parse_var("SEARCH_CONCURRENCY", 4)?;
        if search_concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: "SEARCH_CONCURRENCY",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
            search_concurrency,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 15)?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            search_concurrency: 4,
            request_timeout_secs: 5,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Session cookies get the `Secure` attribute when the frontend is served over https.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
