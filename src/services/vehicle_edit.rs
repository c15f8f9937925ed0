// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle drafts and the save workflow.
//!
//! A draft keeps the listing fields together with two image sets: images
//! already attached to the vehicle and new local files. Removing an existing
//! image only queues its id; nothing is deleted until the draft is saved.
//!
//! Saving an edit runs, in order:
//! 1. one PUT with the fields
//! 2. one DELETE per queued image id, sequentially
//! 3. one multipart POST with all new images, if any
//!
//! A failing step stops the save and nothing is rolled back. Each queued id
//! leaves the queue only once its DELETE succeeded, and new images are
//! cleared only after the upload succeeded, so saving the same draft again
//! resumes with the work that is still outstanding.

use super::images::{queue_images, NewImage};
use crate::api::ApiClient;
use crate::error::AppError;
use crate::forms::VehicleForm;
use crate::models::{Vehicle, VehicleImage};
use crate::session::SessionStore;
use validator::Validate;

pub const NO_IMAGES_MESSAGE: &str = "At least one image is required";

/// In-progress listing being created or edited.
#[derive(Debug, Clone)]
pub struct VehicleDraft {
    pub fields: VehicleForm,
    existing_images: Vec<VehicleImage>,
    deletion_queue: Vec<String>,
    new_images: Vec<NewImage>,
}

impl VehicleDraft {
    /// Draft for a new listing.
    pub fn new(fields: VehicleForm) -> Self {
        Self::for_vehicle(fields, Vec::new())
    }

    /// Draft for editing a listing that already has `existing_images`.
    pub fn for_vehicle(fields: VehicleForm, existing_images: Vec<VehicleImage>) -> Self {
        Self {
            fields,
            existing_images,
            deletion_queue: Vec::new(),
            new_images: Vec::new(),
        }
    }

    /// Existing images not marked for deletion.
    pub fn visible_images(&self) -> impl Iterator<Item = &VehicleImage> {
        self.existing_images
            .iter()
            .filter(|image| !self.deletion_queue.contains(&image.id))
    }

    pub fn deletion_queue(&self) -> &[String] {
        &self.deletion_queue
    }

    pub fn new_images(&self) -> &[NewImage] {
        &self.new_images
    }

    /// Total images the listing will have after saving.
    pub fn image_count(&self) -> usize {
        self.visible_images().count() + self.new_images.len()
    }

    /// Soft-delete an existing image. Returns false for unknown or
    /// already-queued ids.
    pub fn mark_for_deletion(&mut self, image_id: &str) -> bool {
        let known = self.existing_images.iter().any(|image| image.id == image_id);
        if !known || self.deletion_queue.iter().any(|id| id == image_id) {
            return false;
        }
        self.deletion_queue.push(image_id.to_string());
        true
    }

    /// Undo a soft delete.
    pub fn unmark_for_deletion(&mut self, image_id: &str) -> bool {
        let before = self.deletion_queue.len();
        self.deletion_queue.retain(|id| id != image_id);
        self.deletion_queue.len() != before
    }

    /// Queue new files, keeping at most ten. Returns how many were dropped.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = NewImage>) -> usize {
        queue_images(&mut self.new_images, images)
    }

    pub fn remove_new_image(&mut self, index: usize) -> Option<NewImage> {
        (index < self.new_images.len()).then(|| self.new_images.remove(index))
    }

    /// Check the fields and the image invariant. No network involved.
    pub fn validate(&self) -> Result<(), AppError> {
        self.fields.validate()?;
        if self.image_count() == 0 {
            return Err(AppError::Validation(NO_IMAGES_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Save an edited listing: fields, then deletions, then uploads.
pub async fn save_vehicle_edit(
    api: &ApiClient,
    session: &mut SessionStore,
    vehicle_id: &str,
    draft: &mut VehicleDraft,
) -> Result<(), AppError> {
    draft.validate()?;

    api.update_vehicle(session, vehicle_id, &draft.fields).await?;

    while let Some(image_id) = draft.deletion_queue.first().cloned() {
        api.delete_image(session, vehicle_id, &image_id).await?;
        draft.deletion_queue.remove(0);
        draft.existing_images.retain(|image| image.id != image_id);
    }

    if !draft.new_images.is_empty() {
        api.upload_images(session, vehicle_id, &draft.new_images)
            .await?;
        draft.new_images.clear();
    }

    tracing::info!(vehicle_id, "Vehicle edit saved");
    Ok(())
}

/// Create a listing from a draft: the vehicle first, then its images.
pub async fn create_vehicle(
    api: &ApiClient,
    session: &mut SessionStore,
    draft: &mut VehicleDraft,
) -> Result<Vehicle, AppError> {
    draft.validate()?;

    let vehicle = api.create_vehicle(session, &draft.fields).await?;
    api.upload_images(session, &vehicle.id, &draft.new_images)
        .await?;
    draft.new_images.clear();

    Ok(vehicle)
}
