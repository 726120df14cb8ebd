// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-gate middleware for protected routes.

use crate::services::SESSION_COOKIE;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Middleware that requires a live session.
///
/// Resolves the session cookie and stashes the `SessionUser` projection
/// in request extensions; anonymous requests are sent to the login page.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session_user = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.resolve(cookie.value()));

    match session_user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
