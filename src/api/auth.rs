// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth endpoints of the marketplace API.

use super::{check_response, check_response_json, send, ApiClient};
use crate::error::AppError;
use crate::forms::{ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm};
use crate::models::{AuthResponse, RefreshResponse};

impl ApiClient {
    /// Exchange credentials for a session.
    pub async fn login(&self, form: &LoginForm) -> Result<AuthResponse, AppError> {
        let response = send(
            self.http
                .post(self.url("/auth/login"))
                .bearer_auth(self.api_secret())
                .json(form),
        )
        .await?;

        let auth: AuthResponse = check_response_json(response).await?;
        tracing::info!(user_id = %auth.user.id, "Login accepted by marketplace API");
        Ok(auth)
    }

    /// Create an account; the API logs the new user in right away.
    pub async fn register(&self, form: &RegisterForm) -> Result<AuthResponse, AppError> {
        let response = send(
            self.http
                .post(self.url("/auth/register"))
                .bearer_auth(self.api_secret())
                .json(form),
        )
        .await?;

        let auth: AuthResponse = check_response_json(response).await?;
        tracing::info!(user_id = %auth.user.id, "Account registered");
        Ok(auth)
    }

    /// Mint a new access token from a refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse, AppError> {
        let response = send(
            self.http
                .post(self.url("/auth/refresh-token"))
                .json(&serde_json::json!({ "refreshToken": refresh_token })),
        )
        .await?;

        check_response_json(response).await
    }

    /// Ask the API to email a password reset link.
    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> Result<(), AppError> {
        let response = send(self.http.post(self.url("/auth/forgot-password")).json(form)).await?;
        check_response(response).await?;
        Ok(())
    }

    /// Set a new password using the token from the reset link.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        form: &ResetPasswordForm,
    ) -> Result<(), AppError> {
        let url = self.url(&format!(
            "/auth/reset-password/{}",
            urlencoding::encode(reset_token)
        ));
        let response = send(self.http.post(url).json(form)).await?;
        check_response(response).await?;
        Ok(())
    }
}
