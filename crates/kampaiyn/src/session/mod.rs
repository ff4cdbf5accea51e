// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session holder: the signed-in user and their credential pair.
//!
//! One store per process. The gateway reads the access token from here on
//! every request and writes the pair back after a refresh; nothing else in
//! the gateway keeps credentials. When a persist path is configured the
//! session survives restarts as `<state-dir>/session.json`.

pub mod persist;

use std::path::PathBuf;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::model::user::User;

/// Access/refresh credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

/// Everything the store holds; also the persisted file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: User,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

pub struct SessionStore {
    inner: RwLock<SessionData>,
    persist_path: Option<PathBuf>,
}

impl SessionStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self { inner: RwLock::new(SessionData::default()), persist_path: None }
    }

    /// A store backed by a JSON file, seeded from it when present.
    pub fn persistent(path: PathBuf) -> Self {
        let data = if path.exists() {
            match persist::load(&path) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "ignoring unreadable session file: {e}");
                    SessionData::default()
                }
            }
        } else {
            SessionData::default()
        };
        Self { inner: RwLock::new(data), persist_path: Some(path) }
    }

    /// A session is active while a user is signed in.
    pub fn has_active_session(&self) -> bool {
        !self.inner.read().user.id.is_empty()
    }

    /// Current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        let inner = self.inner.read();
        if inner.access_token.is_empty() {
            None
        } else {
            Some(inner.access_token.clone())
        }
    }

    /// Access token to stamp on outgoing requests: present only for an
    /// active session. Read under one lock so the two checks agree.
    pub fn active_access_token(&self) -> Option<String> {
        let inner = self.inner.read();
        if inner.user.id.is_empty() || inner.access_token.is_empty() {
            None
        } else {
            Some(inner.access_token.clone())
        }
    }

    pub fn refresh_token(&self) -> String {
        self.inner.read().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        let inner = self.inner.read();
        if inner.user.id.is_empty() {
            None
        } else {
            Some(inner.user.clone())
        }
    }

    pub fn snapshot(&self) -> SessionData {
        self.inner.read().clone()
    }

    /// Install a freshly signed-in user with their tokens.
    pub fn set_user(&self, data: SessionData) {
        let mut inner = self.inner.write();
        *inner = data;
        self.persist(&inner);
    }

    /// Replace the credential pair, keeping the user.
    pub fn set_credentials(&self, pair: &TokenPair) {
        let mut inner = self.inner.write();
        inner.access_token = pair.access_token.clone();
        inner.refresh_token = pair.refresh_token.clone();
        self.persist(&inner);
    }

    /// Terminate the session: forget the user and both tokens.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        *inner = SessionData::default();
        if let Some(ref path) = self.persist_path {
            if let Err(e) = persist::remove(path) {
                tracing::warn!(path = %path.display(), "failed to remove session file: {e}");
            }
        }
    }

    fn persist(&self, data: &SessionData) {
        let Some(ref path) = self.persist_path else {
            return;
        };
        if let Err(e) = persist::save(path, data) {
            tracing::warn!(path = %path.display(), "failed to persist session: {e}");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
