// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: one owned state object with explicit transitions.
//!
//! Transitions:
//! - `login`: anonymous → authenticated
//! - `logout`: any → anonymous
//! - `refresh_access_token`: authenticated → authenticated (new access token),
//!   or → anonymous when the API refuses the refresh token
//!
//! Changes are written back to the browser with `persist`.

use super::cookies::{self, StoredSession};
use super::token;
use crate::api::{fetch_with_auth, ApiClient, TokenRefresher};
use crate::error::AppError;
use crate::models::User;
use axum_extra::extract::cookie::CookieJar;

/// An authenticated session. Both tokens always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

impl StoredSession {
    /// The complete session, if every field is present.
    pub fn into_session(self) -> Option<Session> {
        Some(Session {
            user: self.user?,
            access_token: self.access_token?,
            refresh_token: self.refresh_token?,
        })
    }
}

/// Current session plus the API client used to refresh it.
pub struct SessionStore {
    api: ApiClient,
    session: Option<Session>,
    /// Set when the session changed and cookies must be rewritten.
    dirty: bool,
}

impl SessionStore {
    /// An anonymous store.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: None,
            dirty: false,
        }
    }

    /// Restore the session found in the request cookies.
    ///
    /// - complete with an expired access token: refresh right away
    /// - complete and fresh: hydrate as-is
    /// - incomplete: log out so stale cookies get cleared
    pub async fn bootstrap(api: ApiClient, stored: StoredSession) -> Self {
        let mut store = Self::new(api);
        let was_empty = stored.is_empty();

        match stored.into_session() {
            Some(session) => {
                let expired = token::is_token_expired(&session.access_token);
                store.session = Some(session);
                if expired {
                    tracing::debug!("Stored access token expired, refreshing");
                    store.refresh_access_token().await;
                }
            }
            None if !was_empty => {
                tracing::warn!("Incomplete session cookies, logging out");
                store.logout();
            }
            None => {}
        }

        store
    }

    /// Convenience for handlers: read the cookie jar and bootstrap.
    pub async fn from_jar(api: ApiClient, jar: &CookieJar) -> Self {
        Self::bootstrap(api, StoredSession::from_jar(jar)).await
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session with the tokens the API just issued.
    pub fn login(&mut self, user: User, access_token: String, refresh_token: String) {
        tracing::info!(user_id = %user.id, "Session started");
        self.session = Some(Session {
            user,
            access_token,
            refresh_token,
        });
        self.dirty = true;
    }

    /// Drop the session.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = %session.user.id, "Session ended");
        }
        self.dirty = true;
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Without a refresh token this is a no-op. On failure the session is
    /// ended. Returns the new access token on success.
    pub async fn refresh_access_token(&mut self) -> Option<String> {
        let Some(refresh_token) = self.session.as_ref().map(|s| s.refresh_token.clone()) else {
            tracing::warn!("No refresh token available, skipping refresh");
            return None;
        };

        match self.api.refresh_token(&refresh_token).await {
            Ok(refreshed) => {
                let session = self.session.as_mut()?;
                session.access_token = refreshed.access_token.clone();
                if let Some(rotated) = refreshed.refresh_token {
                    session.refresh_token = rotated;
                }
                self.dirty = true;
                tracing::info!(user_id = %session.user.id, "Access token refreshed");
                Some(refreshed.access_token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, logging out");
                self.logout();
                None
            }
        }
    }

    /// Refresh only when the current access token is expired.
    ///
    /// Returns true when a refresh was attempted.
    pub async fn refresh_if_expired(&mut self) -> bool {
        match self.access_token() {
            Some(access_token) if token::is_token_expired(access_token) => {
                self.refresh_access_token().await;
                true
            }
            _ => false,
        }
    }

    /// Send an authenticated request, refreshing and retrying once on 401.
    pub async fn authorized<B>(&mut self, build: B) -> Result<reqwest::Response, AppError>
    where
        B: Fn() -> reqwest::RequestBuilder,
    {
        let token = self.access_token().ok_or(AppError::Unauthorized)?.to_string();
        fetch_with_auth(build, &token, self).await
    }

    /// Write pending session changes to the response cookies.
    pub fn persist(&mut self, jar: CookieJar, secure: bool) -> CookieJar {
        if !self.dirty {
            return jar;
        }
        self.dirty = false;

        match &self.session {
            Some(session) => jar
                .add(cookies::persistent_cookie(
                    cookies::USER_COOKIE,
                    cookies::encode_user(&session.user),
                    false,
                    secure,
                ))
                .add(cookies::persistent_cookie(
                    cookies::ACCESS_TOKEN_COOKIE,
                    session.access_token.clone(),
                    true,
                    secure,
                ))
                .add(cookies::persistent_cookie(
                    cookies::REFRESH_TOKEN_COOKIE,
                    session.refresh_token.clone(),
                    true,
                    secure,
                )),
            None => {
                let jar = cookies::remove(jar, cookies::USER_COOKIE);
                let jar = cookies::remove(jar, cookies::ACCESS_TOKEN_COOKIE);
                cookies::remove(jar, cookies::REFRESH_TOKEN_COOKIE)
            }
        }
    }
}

impl TokenRefresher for SessionStore {
    async fn refresh(&mut self) -> Option<String> {
        self.refresh_access_token().await
    }
}
