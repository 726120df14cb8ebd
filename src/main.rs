// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whisperwall server
//!
//! Serves the anonymous-secrets web app: local and Google sign-in,
//! session cookies, and the shared secrets listing.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whisperwall::{
    config::Config,
    db::FirestoreDb,
    services::{CredentialService, GoogleOAuthService, SessionManager},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Whisperwall");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    let sessions = SessionManager::new();
    let credentials = CredentialService::new(db.clone());
    let google = GoogleOAuthService::new(&config, db.clone())
        .expect("Failed to initialize Google OAuth client");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        sessions,
        credentials,
        google,
    });

    // Build router
    let app = whisperwall::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("whisperwall=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
