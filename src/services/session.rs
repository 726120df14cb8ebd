// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session tracking.
//!
//! A session maps an opaque random token (carried in a cookie) to the
//! minimal identity needed to re-recognize the user on later requests.
//! Resolution never touches the user store.

use crate::models::User;
use dashmap::DashMap;
use rand::RngCore;
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "ww_session";

/// Minimal user projection stored per session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: String,
    pub username: Option<String>,
}

/// Session table shared across all requests.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionUser>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an authenticated user and return its token.
    pub fn establish(&self, user: &User) -> String {
        let token = new_token();
        self.sessions.insert(
            token.clone(),
            SessionUser {
                id: user.id.clone(),
                username: user.username.clone(),
            },
        );
        token
    }

    /// Look up the identity behind a token, if the session is live.
    pub fn resolve(&self, token: &str) -> Option<SessionUser> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// Invalidate a session. Idempotent: destroying an unknown token is
    /// logged and otherwise ignored.
    pub fn destroy(&self, token: &str) {
        if self.sessions.remove(token).is_none() {
            tracing::debug!("Logout for unknown or already-destroyed session");
        }
    }
}

/// Generate an unguessable 256-bit session token.
fn new_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new_local("alice", "$argon2id$stub".to_string())
    }

    #[test]
    fn test_establish_then_resolve() {
        let sessions = SessionManager::new();
        let user = test_user();

        let token = sessions.establish(&user);
        let resolved = sessions.resolve(&token).expect("session should resolve");

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_resolve_unknown_token_is_anonymous() {
        let sessions = SessionManager::new();
        assert!(sessions.resolve("not-a-token").is_none());
    }

    #[test]
    fn test_destroy_invalidates_and_is_idempotent() {
        let sessions = SessionManager::new();
        let token = sessions.establish(&test_user());

        sessions.destroy(&token);
        assert!(sessions.resolve(&token).is_none());

        // Second destroy of the same token must not panic or error.
        sessions.destroy(&token);
    }

    #[test]
    fn test_tokens_are_unique_per_session() {
        let sessions = SessionManager::new();
        let user = test_user();

        let a = sessions.establish(&user);
        let b = sessions.establish(&user);

        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
