// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marketplace API client.
//!
//! Handles:
//! - Auth endpoints (login, register, token refresh, password recovery)
//! - Vehicle and image endpoints
//! - Error message extraction from failed responses

pub mod auth;
pub mod fetch;
pub mod vehicles;

pub use fetch::{fetch_with_auth, TokenRefresher};

use crate::config::Config;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Marketplace API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_secret: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// `api_secret` is attached only to the login and register calls the
    /// front-end proxies on behalf of the browser.
    pub fn new(base_url: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_secret: api_secret.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone(), config.api_secret.clone())
    }

    /// Absolute URL for an API path such as `/vehicles/42`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

/// Send a request, mapping transport failures.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, AppError> {
    request.send().await.map_err(AppError::transport)
}

/// Check response status and return error if not successful.
pub(crate) async fn check_response(
    response: reqwest::Response,
) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status);

    tracing::debug!(status = %status, error = %message, "Marketplace API request failed");

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Check response and parse JSON body.
pub(crate) async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    check_response(response)
        .await?
        .json()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON parse error: {}", e)))
}

#[derive(Deserialize)]
struct ErrorBody {
    message: serde_json::Value,
}

/// Extract a user-facing message from a failed response body.
///
/// Prefers the JSON `message` field (joining it when the API returns a list
/// of messages), then the raw text, then the status reason.
pub fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.message {
            serde_json::Value::String(s) if !s.is_empty() => return s,
            serde_json::Value::Array(items) if !items.is_empty() => {
                return items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
            }
            _ => {}
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
