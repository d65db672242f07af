// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state for one browser.
//!
//! The browser persists a single opaque token. A [`SessionContext`] is built
//! for every request from that token, handed explicitly to each service that
//! needs it, and written back to the browser when the request finishes.

pub mod cookie;

use crate::models::User;
use crate::navigation::Navigator;
use crate::services::lists::ListCache;
use std::sync::{Arc, PoisonError, RwLock};

/// Storage for the bearer token.
///
/// No validation happens here: whether a token is still good is decided by
/// the API's response code alone.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

/// In-memory token store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Who the session belongs to, once known.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub token: String,
    /// Profile returned by login; absent when the session was restored from storage.
    pub profile: Option<User>,
}

/// Resolution state of the current user.
#[derive(Debug, Clone, PartialEq)]
pub enum UserState {
    /// `init()` has not run yet.
    Unresolved,
    Anonymous,
    Authenticated(Identity),
}

/// Per-request session: token store, resolved user, navigation and the
/// lists fetched so far.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    navigator: Navigator,
    user: Arc<RwLock<UserState>>,
    lists: Arc<ListCache>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Navigator) -> Self {
        Self {
            store,
            navigator,
            user: Arc::new(RwLock::new(UserState::Unresolved)),
            lists: Arc::new(ListCache::new()),
        }
    }

    /// Resolve the user from whatever token the store holds.
    pub fn init(&self) {
        let state = match self.store.get() {
            Some(token) => UserState::Authenticated(Identity {
                token,
                profile: None,
            }),
            None => UserState::Anonymous,
        };
        self.set_user_state(state);
    }

    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn user_state(&self) -> UserState {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Lists fetched during this request.
    pub fn list_cache(&self) -> &ListCache {
        &self.lists
    }

    /// Start a session for a freshly logged-in user.
    pub fn login(&self, user: User) {
        self.store.set(user.token.clone());
        self.set_user_state(UserState::Authenticated(Identity {
            token: user.token.clone(),
            profile: Some(user),
        }));
    }

    pub fn logout(&self) {
        self.store.clear();
        self.lists.clear();
        self.set_user_state(UserState::Anonymous);
    }

    /// Apply the authorization-failure policy: drop the session and send the
    /// browser to login. Returns whether a redirect was issued.
    pub fn handle_unauthorized(&self) -> bool {
        self.logout();
        self.navigator.redirect_to_login()
    }

    fn set_user_state(&self, state: UserState) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
