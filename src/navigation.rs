// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser views and per-request navigation.
//!
//! A [`Navigator`] remembers which view the browser is on and where it
//! should go next. Redirects to login are recorded at most once, and never
//! while the browser already sits on the login view.

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// A view of the browser application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum Route {
    Landing,
    Login,
    Register,
    VerifyEmail,
    Dashboard,
    Home,
    Database,
    Search,
    EditList(String),
}

impl Route {
    /// Browser path of this view.
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::VerifyEmail => "/verify-email".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Home => "/home".to_string(),
            Route::Database => "/database".to_string(),
            Route::Search => "/search".to_string(),
            Route::EditList(id) => format!("/lists/{}", urlencoding::encode(id)),
        }
    }

    /// Views that only render for a logged-in user.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Home | Route::Database | Route::Search | Route::EditList(_)
        )
    }

    /// Resolve a browser path (or the gateway path serving it) to a view.
    ///
    /// `/views/...` and `/auth/...` prefixes are stripped, as are query strings.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path
            .strip_prefix("/views")
            .or_else(|| path.strip_prefix("/auth"))
            .unwrap_or(path);
        let path = path.trim_end_matches('/');

        let route = match path {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/verify-email" => Route::VerifyEmail,
            "/dashboard" => Route::Dashboard,
            "/home" => Route::Home,
            "/database" => Route::Database,
            "/search" => Route::Search,
            other => {
                let id = other.strip_prefix("/lists/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let id = urlencoding::decode(id).ok()?.into_owned();
                Route::EditList(id)
            }
        };
        Some(route)
    }
}

#[derive(Debug)]
struct NavState {
    current: Route,
    target: Option<Route>,
    login_redirects: u32,
}

/// Navigation state for one browser request.
///
/// Cloning shares the state, so every service handling the request sees
/// the same pending redirect.
#[derive(Debug, Clone)]
pub struct Navigator {
    inner: Arc<Mutex<NavState>>,
}

impl Navigator {
    pub fn new(current: Route) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NavState {
                current,
                target: None,
                login_redirects: 0,
            })),
        }
    }

    pub fn current(&self) -> Route {
        self.with_state(|state| state.current.clone())
    }

    /// Replace the current view with `route` once the request completes.
    pub fn navigate(&self, route: Route) {
        self.with_state(|state| state.target = Some(route));
    }

    /// Send the browser to the login view.
    ///
    /// Returns `false` (and changes nothing) when the browser is already on
    /// login or a login redirect was already issued for this request.
    pub fn redirect_to_login(&self) -> bool {
        self.with_state(|state| {
            if state.current == Route::Login {
                return false;
            }
            state.current = Route::Login;
            state.target = Some(Route::Login);
            state.login_redirects += 1;
            true
        })
    }

    /// Where the browser should go next, if anywhere.
    pub fn pending_redirect(&self) -> Option<Route> {
        self.with_state(|state| state.target.clone())
    }

    pub fn redirected_to_login(&self) -> bool {
        self.login_redirects() > 0
    }

    pub fn login_redirects(&self) -> u32 {
        self.with_state(|state| state.login_redirects)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut NavState) -> T) -> T {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}
