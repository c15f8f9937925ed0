// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated request wrapper with a single refresh-and-retry on 401.

use crate::error::AppError;
use reqwest::StatusCode;
use std::future::Future;

/// Something that can mint a fresh access token.
///
/// Returns the new token, or `None` when no token could be obtained (the
/// implementation is expected to have ended the session by then).
pub trait TokenRefresher {
    fn refresh(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// Send a request with `Authorization: Bearer <token>`.
///
/// `build` is called once per attempt because request bodies (multipart in
/// particular) cannot be replayed. On a 401 the refresher is asked once for
/// a new token and the request is retried once with it. Any other status is
/// returned untouched for the caller to interpret.
pub async fn fetch_with_auth<B, R>(
    build: B,
    token: &str,
    refresher: &mut R,
) -> Result<reqwest::Response, AppError>
where
    B: Fn() -> reqwest::RequestBuilder,
    R: TokenRefresher,
{
    let response = super::send(build().bearer_auth(token)).await?;
    if response.status() != StatusCode::UNAUTHORIZED {
        return Ok(response);
    }

    tracing::info!("Access token rejected, refreshing before retry");

    let Some(fresh) = refresher.refresh().await else {
        return Err(AppError::SessionExpired);
    };

    let response = super::send(build().bearer_auth(&fresh)).await?;
    if response.status() == StatusCode::UNAUTHORIZED {
        tracing::warn!("Request still unauthorized after token refresh");
        return Err(AppError::Api {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            message: "Request failed after refreshing the session".to_string(),
        });
    }

    Ok(response)
}
