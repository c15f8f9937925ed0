// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session middleware.
//!
//! `load_session` bootstraps the session from the request cookies once per
//! request, hands it to handlers as an `Extension<SharedSession>`, and writes
//! any session change back as `Set-Cookie` headers on the way out.

use crate::error::AppError;
use crate::session::cookies::{session_cookie, CALLBACK_COOKIE};
use crate::session::{SessionStore, SharedSession};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Load the session for every request and persist changes afterwards.
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let store = SessionStore::from_jar(state.api.clone(), &jar).await;
    let session: SharedSession = Arc::new(Mutex::new(store));
    request.extensions_mut().insert(session.clone());

    let response = next.run(request).await;

    let jar = session
        .lock()
        .await
        .persist(jar, state.config.secure_cookies());
    (jar, response).into_response()
}

/// Reject anonymous requests.
///
/// The page the user was on (the `Referer` path, or the request path for a
/// page load) is remembered in the `callback` cookie so login can send the
/// user back there.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SharedSession>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if session.lock().await.is_authenticated() {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "Anonymous request to protected route");

    let callback = request
        .headers()
        .get(header::REFERER)
        .and_then(|h| h.to_str().ok())
        .and_then(referer_path)
        .or_else(|| {
            (request.method() == Method::GET)
                .then(|| request.uri().path_and_query().map(|p| p.to_string()))
                .flatten()
        });

    match callback {
        Some(path) => {
            let jar = jar.add(session_cookie(
                CALLBACK_COOKIE,
                path,
                state.config.secure_cookies(),
            ));
            (jar, AppError::Unauthorized).into_response()
        }
        None => AppError::Unauthorized.into_response(),
    }
}

/// Path and query of an absolute referer URL.
fn referer_path(referer: &str) -> Option<String> {
    let after_scheme = referer.split_once("://")?.1;
    let path = &after_scheme[after_scheme.find('/')?..];
    Some(path.to_string())
}
