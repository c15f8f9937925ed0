// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle listing routes: browse, contact, create, edit and delete.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::api::vehicles::IMAGES_FIELD;
use crate::error::{AppError, Result};
use crate::forms::{VehicleForm, VehicleQuery};
use crate::models::{Vehicle, VehiclePage};
use crate::services::{create_vehicle, save_vehicle_edit, NewImage, VehicleDraft};
use crate::session::SharedSession;
use crate::AppState;

/// Upper bound for a listing submission (ten photos plus fields).
const MAX_SUBMISSION_BYTES: usize = 50 * 1024 * 1024;

/// Multipart field, repeated once per image the user removed.
const DELETED_IMAGE_FIELD: &str = "deletedImageIds";

/// Browse routes, open to everyone.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/{id}", get(get_vehicle))
        .route("/api/vehicles/{id}/contact", get(contact_seller))
}

/// Listing management routes.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", post(create))
        .route("/api/vehicles/{id}", put(edit).delete(delete))
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
}

// ─── Browse ──────────────────────────────────────────────────

async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<VehiclePage>> {
    query.validate()?;
    Ok(Json(state.api.list_vehicles(&query).await?))
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>> {
    Ok(Json(state.api.get_vehicle(&id).await?))
}

/// Redirect to a WhatsApp or email conversation with the seller.
async fn contact_seller(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let vehicle = state.api.get_vehicle(&id).await?;
    let url = vehicle
        .contact_url()
        .ok_or_else(|| AppError::NotFound(format!("Contact for vehicle {}", id)))?;

    tracing::info!(vehicle_id = %id, "Redirecting buyer to seller contact");
    Ok(Redirect::temporary(&url))
}

// ─── Create / Edit ───────────────────────────────────────────

/// Everything a listing form posts in one multipart body.
#[derive(Default)]
struct Submission {
    fields: HashMap<String, String>,
    deleted_image_ids: Vec<String>,
    images: Vec<NewImage>,
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGES_FIELD {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            // Browsers send an empty part when no file was picked.
            if bytes.is_empty() {
                continue;
            }
            submission
                .images
                .push(NewImage::new(file_name, content_type, bytes.to_vec())?);
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if name == DELETED_IMAGE_FIELD {
            submission.deleted_image_ids.push(text);
        } else {
            submission.fields.insert(name, text);
        }
    }

    Ok(submission)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub vehicle_id: String,
    pub deleted_images: usize,
    pub uploaded_images: usize,
}

async fn create(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SharedSession>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Vehicle>)> {
    let submission = read_submission(multipart).await?;

    let mut draft = VehicleDraft::new(VehicleForm::from_text_fields(&submission.fields)?);
    draft.add_images(submission.images);

    let mut session = session.lock().await;
    let vehicle = create_vehicle(&state.api, &mut session, &mut draft).await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn edit(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SharedSession>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<EditResponse>> {
    let submission = read_submission(multipart).await?;

    let fields = VehicleForm::from_text_fields(&submission.fields)?;

    // The image count is checked against what the API holds, not what the
    // browser claims the listing has.
    let existing_images = state.api.list_images(&id).await?;
    let mut draft = VehicleDraft::for_vehicle(fields, existing_images);
    for image_id in &submission.deleted_image_ids {
        if !draft.mark_for_deletion(image_id) {
            tracing::warn!(vehicle_id = %id, image_id = %image_id, "Ignoring unknown image id");
        }
    }
    draft.add_images(submission.images);

    let deleted_images = draft.deletion_queue().len();
    let uploaded_images = draft.new_images().len();

    let mut session = session.lock().await;
    save_vehicle_edit(&state.api, &mut session, &id, &mut draft).await?;

    Ok(Json(EditResponse {
        vehicle_id: id,
        deleted_images,
        uploaded_images,
    }))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SharedSession>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let mut session = session.lock().await;
    state.api.delete_vehicle(&mut session, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
