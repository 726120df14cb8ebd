// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local username/password authentication.
//!
//! Passwords are hashed with Argon2id (fresh random salt per account)
//! and verified with the same primitive, which compares in constant
//! time. Plaintext passwords never reach the store or the logs.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::User;

/// Stateless credential service over the user store.
#[derive(Clone)]
pub struct CredentialService {
    db: FirestoreDb,
}

impl CredentialService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Register a new local account.
    ///
    /// Fails with `Validation` on empty input and `DuplicateUsername`
    /// when the name is already taken by a local account.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".to_string()));
        }

        if self.db.find_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let user = User::new_local(username, hash_password(password)?);
        self.db.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "Registered new local account");
        Ok(user)
    }

    /// Verify a username/password pair against the store.
    ///
    /// Unknown usernames, OAuth-only accounts, and wrong passwords all
    /// collapse into `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .db
            .find_by_username(username.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(password, stored_hash)?;
        Ok(user)
    }
}

/// Hash a password with Argon2id, returning a PHC-format string.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC-format hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored hash unparseable: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::InvalidCredentials)
}
