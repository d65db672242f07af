// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod api_client;
pub mod auth;
pub mod crypto;
pub mod lists;

pub use api_client::ApiClient;
pub use auth::AuthService;
pub use crypto::CryptoService;
pub use lists::{ListCache, ListService};
