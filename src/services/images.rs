// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local image files waiting to be uploaded.

use crate::error::AppError;

/// Most files accepted by one upload request.
pub const MAX_UPLOAD_IMAGES: usize = 10;

/// An image picked by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl NewImage {
    /// Accept a file only if it is a non-empty image.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, AppError> {
        let file_name = file_name.into();
        let content_type = content_type.into();

        if !content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "{} is not an image",
                file_name
            )));
        }
        if bytes.is_empty() {
            return Err(AppError::Validation(format!("{} is empty", file_name)));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Append `incoming` to `queue` without exceeding `MAX_UPLOAD_IMAGES`.
///
/// Earlier files win. Returns how many files were dropped.
pub fn queue_images(queue: &mut Vec<NewImage>, incoming: impl IntoIterator<Item = NewImage>) -> usize {
    let mut dropped = 0;
    for image in incoming {
        if queue.len() < MAX_UPLOAD_IMAGES {
            queue.push(image);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        tracing::warn!(
            dropped,
            limit = MAX_UPLOAD_IMAGES,
            "Too many images selected, extra files ignored"
        );
    }
    dropped
}
