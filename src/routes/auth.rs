// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: the local login/register proxy, logout, refresh and
//! password recovery.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Extension, Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::forms::{ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm};
use crate::models::{AuthResponse, User};
use crate::session::cookies::{self, CALLBACK_COOKIE};
use crate::session::SharedSession;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password/{token}", post(reset_password))
        .route("/api/session", get(current_session))
}

/// Log in through the API and start the browser session.
async fn login(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SharedSession>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect)> {
    form.validate()?;

    let auth = state.api.login(&form).await?;
    start_session(&session, auth).await;

    Ok(redirect_after_login(jar))
}

/// Create an account through the API; the new user is logged in right away.
async fn register(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SharedSession>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect)> {
    form.validate()?;

    let auth = state.api.register(&form).await?;
    start_session(&session, auth).await;

    Ok(redirect_after_login(jar))
}

async fn start_session(session: &SharedSession, auth: AuthResponse) {
    session
        .lock()
        .await
        .login(auth.user, auth.access_token, auth.refresh_token);
}

/// Send the user back to the page that required login, or home.
///
/// Only same-site paths are honored.
fn redirect_after_login(jar: CookieJar) -> (CookieJar, Redirect) {
    let target = jar
        .get(CALLBACK_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());

    let jar = cookies::remove(jar, CALLBACK_COOKIE);
    (jar, Redirect::to(&target))
}

/// End the session.
async fn logout(Extension(session): Extension<SharedSession>) -> StatusCode {
    session.lock().await.logout();
    StatusCode::NO_CONTENT
}

/// Mint a new access token now.
async fn refresh(Extension(session): Extension<SharedSession>) -> Result<StatusCode> {
    let mut session = session.lock().await;
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized);
    }

    session
        .refresh_access_token()
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(AppError::SessionExpired)
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ForgotPasswordForm>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    form.validate()?;
    state.api.forgot_password(&form).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "If the address is registered, a reset link is on its way".to_string(),
        }),
    ))
}

async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Json<MessageResponse>> {
    form.validate()?;
    state.api.reset_password(&token, &form).await?;

    Ok(Json(MessageResponse {
        message: "Password updated, you can now log in".to_string(),
    }))
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

/// Who is logged in, after cookie bootstrap (and refresh, if needed).
async fn current_session(
    Extension(session): Extension<SharedSession>,
) -> Json<SessionResponse> {
    let user = session.lock().await.user().cloned();
    Json(SessionResponse { user })
}
