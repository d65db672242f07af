// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod crypto;
pub mod list;
pub mod user;
pub mod view;

pub use crypto::{CoinSnapshot, RawCoin, SearchHit};
pub use list::{CryptoList, ListCollection, ListSummary};
pub use user::{ForgotPasswordRequest, LoginRequest, RegisterRequest, User};
