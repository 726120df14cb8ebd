// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration, Google OAuth, and logout routes.
//!
//! Failures here never surface provider or store detail to the user:
//! they are logged and answered with a redirect to the page the user
//! came from.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::RngCore;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::services::SESSION_COOKIE;
use crate::AppState;

/// Name of the transient OAuth anti-forgery cookie.
pub const OAUTH_STATE_COOKIE: &str = "ww_oauth_state";

/// Callback path Google redirects back to; the state cookie is scoped to it.
const GOOGLE_CALLBACK_PATH: &str = "/auth/google/secrets";

/// How long an OAuth round trip may take before the state nonce expires.
const OAUTH_STATE_TTL: time::Duration = time::Duration::minutes(10);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/auth/google", get(google_start))
        .route(GOOGLE_CALLBACK_PATH, get(google_callback))
        .route("/logout", get(logout))
}

/// Credentials submitted by the login and registration forms.
#[derive(Deserialize)]
pub struct CredentialsForm {
    username: String,
    password: String,
}

/// Local login - verify credentials, then establish a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> (CookieJar, Redirect) {
    match state
        .credentials
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            let token = state.sessions.establish(&user);
            let jar = jar.add(session_cookie(&state.config, token));
            (jar, Redirect::to("/secrets"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            (jar, Redirect::to("/login"))
        }
    }
}

/// Local registration - create the account, then establish a session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> (CookieJar, Redirect) {
    match state
        .credentials
        .register(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            let token = state.sessions.establish(&user);
            let jar = jar.add(session_cookie(&state.config, token));
            (jar, Redirect::to("/secrets"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            (jar, Redirect::to("/register"))
        }
    }
}

/// Start the Google OAuth flow - set the anti-forgery nonce and redirect
/// to Google's authorization endpoint.
async fn google_start(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let nonce = new_state_nonce();
    let auth_url = state.google.authorize_url(&nonce);

    tracing::info!("Starting OAuth flow, redirecting to Google");

    let jar = jar.add(oauth_state_cookie(&state.config, nonce));
    (jar, Redirect::to(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - verify the state nonce, exchange the code, establish
/// a session.
async fn google_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    let expected_nonce = jar
        .get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());

    // The nonce is single-use regardless of outcome.
    let jar = jar.remove(oauth_state_cookie(&state.config, String::new()));

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return (jar, Redirect::to("/login"));
    }

    match (&params.state, &expected_nonce) {
        (Some(got), Some(expected)) if got == expected => {}
        _ => {
            tracing::warn!("OAuth state mismatch or missing, rejecting callback");
            return (jar, Redirect::to("/login"));
        }
    }

    let Some(code) = params.code else {
        tracing::warn!("OAuth callback without authorization code");
        return (jar, Redirect::to("/login"));
    };

    match state.google.handle_callback(&code).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "OAuth login successful");
            let token = state.sessions.establish(&user);
            let jar = jar.add(session_cookie(&state.config, token));
            (jar, Redirect::to("/secrets"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "OAuth callback failed");
            (jar, Redirect::to("/login"))
        }
    }
}

/// Logout - destroy the session (no-op when anonymous), clear the cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value());
    }

    let jar = jar.remove(session_cookie(&state.config, String::new()));
    (jar, Redirect::to("/"))
}

/// Build the session cookie with the app's standard attributes.
fn session_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookies_secure())
        .build()
}

/// Build the transient OAuth state cookie, scoped to the callback path.
fn oauth_state_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE, value))
        .path(GOOGLE_CALLBACK_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookies_secure())
        .max_age(OAUTH_STATE_TTL)
        .build()
}

/// Generate a random anti-forgery nonce for the OAuth state parameter.
fn new_state_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes_http() {
        let cookie = session_cookie(&Config::test_default(), "tok".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_session_cookie_secure_over_https() {
        let mut config = Config::test_default();
        config.public_url = "https://whisperwall.example".to_string();

        let cookie = session_cookie(&config, "tok".to_string());
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_oauth_state_cookie_scoped_to_callback() {
        let cookie = oauth_state_cookie(&Config::test_default(), "nonce".to_string());

        assert_eq!(cookie.path(), Some(GOOGLE_CALLBACK_PATH));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(OAUTH_STATE_TTL));
    }

    #[test]
    fn test_state_nonces_are_unique() {
        assert_ne!(new_state_nonce(), new_state_nonce());
    }
}
