// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whisperwall: share a secret, anonymously.
//!
//! This crate provides a small web application where users register or
//! sign in (locally or via Google) and post a single free-text secret
//! that appears, without attribution, on a shared listing page.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{CredentialService, GoogleOAuthService, SessionManager};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sessions: SessionManager,
    pub credentials: CredentialService,
    pub google: GoogleOAuthService,
}
