// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Light/dark theme preference, kept in the `theme` cookie.

use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::session::cookies::{persistent_cookie, THEME_COOKIE};
use crate::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a cookie value; anything unknown falls back to the default.
    pub fn from_cookie(jar: &CookieJar) -> Self {
        match jar.get(THEME_COOKIE).map(|c| c.value()) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/theme", get(get_theme).put(set_theme))
}

async fn get_theme(jar: CookieJar) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: Theme::from_cookie(&jar),
    })
}

async fn set_theme(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<ThemeBody>,
) -> (CookieJar, Json<ThemeBody>) {
    let cookie = persistent_cookie(
        THEME_COOKIE,
        body.theme.as_str().to_string(),
        false,
        state.config.secure_cookies(),
    );
    (jar.add(cookie), Json(body))
}
