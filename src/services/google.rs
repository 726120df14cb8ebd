// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth2 client (authorization-code flow).
//!
//! Handles:
//! - Building the authorization redirect URL
//! - Exchanging the authorization code for an access token
//! - Fetching the userinfo profile and resolving it to a local user
//!   (find-or-create keyed by Google's stable `sub`)

use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::User;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// A hung provider call fails after this rather than blocking a request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Google OAuth service.
#[derive(Clone)]
pub struct GoogleOAuthService {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
    db: FirestoreDb,
}

impl GoogleOAuthService {
    /// Create the service with a bounded-timeout HTTP client.
    pub fn new(config: &Config, db: FirestoreDb) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building OAuth HTTP client")?;

        Ok(Self {
            http,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            callback_url: config.google_callback_url.clone(),
            db,
        })
    }

    /// Build the authorization URL the user agent is redirected to.
    ///
    /// `state` is the caller's anti-forgery nonce; Google echoes it back
    /// on the callback.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}&\
             state={}",
            AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.callback_url),
            urlencoding::encode("openid profile"),
            urlencoding::encode(state),
        )
    }

    /// Handle the OAuth callback: exchange the code, fetch the profile,
    /// and resolve it to a local user.
    pub async fn handle_callback(&self, code: &str) -> Result<User, AppError> {
        let token = self.exchange_code(code).await?;
        let profile = self.fetch_profile(&token.access_token).await?;

        let google_id = match profile.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub.to_string(),
            _ => {
                return Err(AppError::OAuthProfile(
                    "userinfo response carried no subject".to_string(),
                ))
            }
        };

        self.find_or_create(&google_id).await
    }

    /// Resolve a Google subject to a local user, creating one on first
    /// login. Idempotent: the same subject always maps to the same user.
    pub async fn find_or_create(&self, google_id: &str) -> Result<User, AppError> {
        if let Some(user) = self.db.find_by_google_id(google_id).await? {
            return Ok(user);
        }

        let user = User::new_google(google_id);
        self.db.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "Created account from first Google login");
        Ok(user)
    }

    /// Exchange authorization code for tokens (internal helper).
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::OAuthExchange(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::OAuthExchange(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::OAuthExchange(format!("Token response parse error: {}", e)))
    }

    /// Fetch the userinfo profile for an access token.
    async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::OAuthExchange(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::OAuthExchange(format!(
                "Userinfo request failed with status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::OAuthProfile(format!("Userinfo parse error: {}", e)))
    }
}

/// Token exchange response from Google.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Userinfo profile. Only the stable subject matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub sub: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
