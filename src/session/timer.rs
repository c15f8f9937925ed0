// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Periodic access token refresh for long-lived clients.

use super::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often a long-lived client checks its access token.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// A session store shared between request code and the refresh timer.
pub type SharedSession = Arc<Mutex<SessionStore>>;

/// Every `period`, refresh the access token if it has expired.
///
/// The first check happens one full period after spawning; `bootstrap`
/// already covers the token state at startup. Abort the returned handle to
/// stop the timer.
pub fn spawn_refresh_timer(store: SharedSession, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let mut store = store.lock().await;
            if store.refresh_if_expired().await {
                tracing::debug!(
                    authenticated = store.is_authenticated(),
                    "Periodic token refresh ran"
                );
            }
        }
    })
}
