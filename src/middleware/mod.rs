// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session loading, security, etc.).

pub mod security;
pub mod session;

pub use session::{load_session, require_auth};
