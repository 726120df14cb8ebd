//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; handlers only ever see the
//! resulting `Config` through the shared application state.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Absolute URL Google redirects back to after consent
    pub google_callback_url: String,
    /// GCP project ID for Firestore
    pub gcp_project_id: String,
    /// Public base URL of this app; an https URL marks cookies `Secure`
    pub public_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local
    /// development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            google_callback_url: env::var("GOOGLE_CALLBACK_URL")
                .map_err(|_| ConfigError::Missing("GOOGLE_CALLBACK_URL"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    /// Whether session cookies should carry the `Secure` attribute.
    pub fn cookies_secure(&self) -> bool {
        self.public_url.starts_with("https://")
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_secret".to_string(),
            google_callback_url: "http://localhost:3000/auth/google/secrets".to_string(),
            gcp_project_id: "test-project".to_string(),
            public_url: "http://localhost:3000".to_string(),
            port: 3000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
