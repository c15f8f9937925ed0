// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle and image endpoints of the marketplace API.
//!
//! Browsing is public. Every mutation goes through the session's
//! authenticated fetch so an expired access token is refreshed once.

use super::{check_response, check_response_json, send, ApiClient};
use crate::error::AppError;
use crate::forms::{VehicleForm, VehicleQuery};
use crate::models::{Vehicle, VehicleImage, VehiclePage};
use crate::services::images::NewImage;
use crate::session::SessionStore;
use reqwest::multipart::{Form, Part};

/// Multipart field name the API expects for uploaded files.
pub const IMAGES_FIELD: &str = "images";

impl ApiClient {
    /// Browse listings.
    pub async fn list_vehicles(&self, query: &VehicleQuery) -> Result<VehiclePage, AppError> {
        let response = send(self.http.get(self.url("/vehicles")).query(query)).await?;
        check_response_json(response).await
    }

    /// Get a single listing.
    pub async fn get_vehicle(&self, vehicle_id: &str) -> Result<Vehicle, AppError> {
        let response = send(self.http.get(self.vehicle_url(vehicle_id))).await?;
        match check_response_json(response).await {
            Err(AppError::Api { status: 404, .. }) => {
                Err(AppError::NotFound(format!("Vehicle {}", vehicle_id)))
            }
            other => other,
        }
    }

    /// Images currently attached to a listing.
    pub async fn list_images(&self, vehicle_id: &str) -> Result<Vec<VehicleImage>, AppError> {
        let url = self.url(&format!("/images/{}", urlencoding::encode(vehicle_id)));
        let response = send(self.http.get(url)).await?;
        check_response_json(response).await
    }

    /// Create a listing without images.
    pub async fn create_vehicle(
        &self,
        session: &mut SessionStore,
        form: &VehicleForm,
    ) -> Result<Vehicle, AppError> {
        let url = self.url("/vehicles");
        let response = session
            .authorized(|| self.http.post(&url).json(form))
            .await?;

        let vehicle: Vehicle = check_response_json(response).await?;
        tracing::info!(vehicle_id = %vehicle.id, "Vehicle created");
        Ok(vehicle)
    }

    /// Replace a listing's fields.
    pub async fn update_vehicle(
        &self,
        session: &mut SessionStore,
        vehicle_id: &str,
        form: &VehicleForm,
    ) -> Result<(), AppError> {
        let url = self.vehicle_url(vehicle_id);
        let response = session
            .authorized(|| self.http.put(&url).json(form))
            .await?;

        check_response(response).await?;
        tracing::info!(vehicle_id, "Vehicle fields updated");
        Ok(())
    }

    /// Remove a listing.
    pub async fn delete_vehicle(
        &self,
        session: &mut SessionStore,
        vehicle_id: &str,
    ) -> Result<(), AppError> {
        let url = self.vehicle_url(vehicle_id);
        let response = session.authorized(|| self.http.delete(&url)).await?;

        check_response(response).await?;
        tracing::info!(vehicle_id, "Vehicle deleted");
        Ok(())
    }

    /// Upload new images to a listing as one multipart request.
    pub async fn upload_images(
        &self,
        session: &mut SessionStore,
        vehicle_id: &str,
        images: &[NewImage],
    ) -> Result<(), AppError> {
        let url = self.url(&format!("/vehicles/{}/images", urlencoding::encode(vehicle_id)));

        // Parts are consumed on send, so every attempt builds its own form.
        let response = session
            .authorized(|| self.http.post(&url).multipart(image_form(images)))
            .await?;

        check_response(response).await?;
        tracing::info!(vehicle_id, count = images.len(), "Images uploaded");
        Ok(())
    }

    /// Detach one image from a listing.
    pub async fn delete_image(
        &self,
        session: &mut SessionStore,
        vehicle_id: &str,
        image_id: &str,
    ) -> Result<(), AppError> {
        let url = self.url(&format!(
            "/vehicles/{}/images/{}",
            urlencoding::encode(vehicle_id),
            urlencoding::encode(image_id)
        ));
        let response = session.authorized(|| self.http.delete(&url)).await?;

        check_response(response).await?;
        tracing::debug!(vehicle_id, image_id, "Image deleted");
        Ok(())
    }

    fn vehicle_url(&self, vehicle_id: &str) -> String {
        self.url(&format!("/vehicles/{}", urlencoding::encode(vehicle_id)))
    }
}

fn image_form(images: &[NewImage]) -> Form {
    images.iter().fold(Form::new(), |form, image| {
        let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        // Fall back to an untyped part when the MIME type does not parse.
        let part = match part.mime_str(&image.content_type) {
            Ok(part) => part,
            Err(_) => Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
        };
        form.part(IMAGES_FIELD, part)
    })
}
