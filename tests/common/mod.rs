// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use whisperwall::config::Config;
use whisperwall::db::FirestoreDb;
use whisperwall::routes::create_router;
use whisperwall::services::{CredentialService, GoogleOAuthService, SessionManager};
use whisperwall::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Build the app state and router over the given database.
#[allow(dead_code)]
pub fn create_app_with_db(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let sessions = SessionManager::new();
    let credentials = CredentialService::new(db.clone());
    let google = GoogleOAuthService::new(&config, db.clone())
        .expect("Failed to build Google OAuth service");

    let state = Arc::new(AppState {
        config,
        db,
        sessions,
        credentials,
        google,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_app_with_db(test_db_offline())
}

/// Create a test app against the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    create_app_with_db(test_db().await)
}

/// Unique name per test run; the emulator keeps state between runs.
#[allow(dead_code)]
pub fn unique(name: &str) -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 6];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    format!("{}_{}", name, hex::encode(bytes))
}
