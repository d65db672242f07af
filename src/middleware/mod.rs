// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session lifecycle, auth gate, security headers).

pub mod auth;
pub mod security;
pub mod session;

pub use auth::{require_session, require_view_session, AuthGate, GateDecision};
pub use session::session_layer;
