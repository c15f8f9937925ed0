// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie names and (de)serialization of the session.

use crate::models::User;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const USER_COOKIE: &str = "user";
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
pub const THEME_COOKIE: &str = "theme";
/// Where to send the browser after the next successful login.
pub const CALLBACK_COOKIE: &str = "callback";

/// Max-age of persistent cookies (30 days).
pub const COOKIE_MAX_AGE_DAYS: i64 = 30;

/// Session fields as found in the request cookies, possibly incomplete.
#[derive(Debug, Clone, Default)]
pub struct StoredSession {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl StoredSession {
    /// Read the session cookies. An unreadable `user` cookie counts as absent.
    pub fn from_jar(jar: &CookieJar) -> Self {
        let user = jar.get(USER_COOKIE).and_then(|c| {
            match serde_json::from_str::<User>(c.value()) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable user cookie");
                    None
                }
            }
        });

        let token = |name: &str| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            user,
            access_token: token(ACCESS_TOKEN_COOKIE),
            refresh_token: token(REFRESH_TOKEN_COOKIE),
        }
    }

    /// Whether any session cookie was present at all.
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Build a persistent cookie (30-day max-age).
pub fn persistent_cookie(
    name: &'static str,
    value: String,
    http_only: bool,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(http_only)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(COOKIE_MAX_AGE_DAYS))
        .build()
}

/// Build a cookie that lives until the browser closes.
pub fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// The user as a cookie value. The jar percent-encodes it on the way out.
pub fn encode_user(user: &User) -> String {
    serde_json::to_string(user).unwrap_or_default()
}

/// Remove a cookie set with `path("/")`.
pub fn remove(jar: CookieJar, name: &'static str) -> CookieJar {
    jar.remove(Cookie::build(name).path("/"))
}
