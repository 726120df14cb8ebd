// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types and their translation to HTTP responses.
//!
//! Handlers catch domain errors themselves where the flow calls for a
//! redirect back to a form; this `IntoResponse` impl is the boundary
//! backstop for everything that escapes. Nothing here ever redirects a
//! failed write to a success page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("OAuth exchange failed: {0}")]
    OAuthExchange(String),

    #[error("OAuth profile invalid: {0}")]
    OAuthProfile(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) | AppError::DuplicateUsername(msg) => {
                tracing::warn!(error = %msg, "Registration rejected");
                Redirect::to("/register").into_response()
            }
            AppError::InvalidCredentials => {
                tracing::warn!("Login rejected");
                Redirect::to("/login").into_response()
            }
            AppError::OAuthExchange(msg) | AppError::OAuthProfile(msg) => {
                tracing::warn!(error = %msg, "OAuth login failed");
                Redirect::to("/login").into_response()
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                error_page(StatusCode::SERVICE_UNAVAILABLE)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                error_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Render the generic error page. Error details stay in the logs.
fn error_page(status: StatusCode) -> Response {
    let template = ErrorTemplate {
        status: status.as_u16(),
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(_) => status.into_response(),
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
