// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schema-validated forms that produce typed API payloads.

pub mod account;
pub mod vehicle;

pub use account::{ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm};
pub use vehicle::{VehicleForm, VehicleQuery};

use validator::ValidationErrors;

/// Collapse validation errors into one user-facing message.
///
/// Fields are visited in name order so the same input always yields the
/// same message.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid value for {}", field),
            })
        })
        .unwrap_or_else(|| "Invalid form".to_string())
}
