// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - form orchestration on top of the API client.

pub mod images;
pub mod vehicle_edit;

pub use images::{NewImage, MAX_UPLOAD_IMAGES};
pub use vehicle_edit::{create_vehicle, save_vehicle_edit, VehicleDraft};
