// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models exchanged with the marketplace API.

pub mod user;
pub mod vehicle;

pub use user::{AuthResponse, RefreshResponse, User};
pub use vehicle::{Seller, Vehicle, VehicleImage, VehiclePage};
