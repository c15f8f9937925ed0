// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser session: tokens, cookie persistence and refresh lifecycle.

pub mod cookies;
pub mod store;
pub mod timer;
pub mod token;

pub use cookies::StoredSession;
pub use store::{Session, SessionStore};
pub use timer::{spawn_refresh_timer, SharedSession, DEFAULT_REFRESH_PERIOD};
pub use token::is_token_expired;
