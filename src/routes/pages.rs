// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page handlers.
//!
//! The secrets listing deliberately renders the secret text alone:
//! authorship stays anonymous, and neither usernames nor credential
//! material ever reach a template.

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::services::SessionUser;
use crate::AppState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate;

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate;

#[derive(Template)]
#[template(path = "secrets.html")]
struct SecretsTemplate {
    secrets: Vec<String>,
}

#[derive(Template)]
#[template(path = "submit.html")]
struct SubmitTemplate;

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => AppError::Internal(anyhow::anyhow!("Template render failed: {}", e))
            .into_response(),
    }
}

pub async fn home() -> Response {
    render(&HomeTemplate)
}

pub async fn login_form() -> Response {
    render(&LoginTemplate)
}

pub async fn register_form() -> Response {
    render(&RegisterTemplate)
}

/// Public listing of all submitted secrets, without attribution.
///
/// An unreachable store degrades to an empty listing rather than a
/// failed request.
pub async fn secrets_listing(State(state): State<Arc<AppState>>) -> Response {
    let secrets = match state.db.list_users_with_secrets().await {
        Ok(users) => users.into_iter().filter_map(|user| user.secret).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Listing secrets failed, rendering empty page");
            Vec::new()
        }
    };

    render(&SecretsTemplate { secrets })
}

/// Secret submission form. Session-gated by middleware.
pub async fn submit_form() -> Response {
    render(&SubmitTemplate)
}

#[derive(Deserialize)]
pub struct SecretForm {
    secret: String,
}

/// Store the submitted secret on the current user. Session-gated.
///
/// A failed save propagates as an error page; it must not redirect to
/// the listing as if it had succeeded.
pub async fn submit_secret(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Form(form): Form<SecretForm>,
) -> Result<Redirect, AppError> {
    let mut user = state
        .db
        .get_user(&session.id)
        .await?
        .ok_or_else(|| AppError::Database(format!("No user document for id {}", session.id)))?;

    user.secret = Some(form.secret);
    state.db.update_user(&user).await?;

    tracing::info!(user_id = %user.id, "Secret submitted");
    Ok(Redirect::to("/secrets"))
}
