// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Crypto-Tracker: personal cryptocurrency watchlists
//!
//! This crate provides the browser-facing gateway for the watchlist API:
//! session handling, the login gate, list CRUD, coin search and the
//! formatted view models the front end renders.

pub mod config;
pub mod error;
pub mod format;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod session;

use config::Config;
use error::AppError;
use services::{ApiClient, AuthService, CryptoService, ListService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub crypto_service: CryptoService,
    pub list_service: ListService,
}

impl AppState {
    /// Wire up the API client and services from `config`.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let api = ApiClient::new(config.api_base_url.clone(), config.request_timeout())?;

        Ok(Self {
            auth_service: AuthService::new(api.clone()),
            crypto_service: CryptoService::new(api.clone(), config.search_concurrency),
            list_service: ListService::new(api),
            config,
        })
    }
}
