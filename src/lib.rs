// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Motormarket: web front-end for a vehicle marketplace
//!
//! This crate serves the browser-facing layer of the marketplace: it owns
//! the session cookies, validates forms and orchestrates calls to the
//! remote marketplace API.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use api::ApiClient;
use config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::from_config(&config);
        Self { config, api }
    }
}
