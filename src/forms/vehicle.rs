// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle listing form and browse query.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use validator::Validate;

/// Editable listing fields. Serializes to the `/vehicles` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    #[validate(length(min = 1, max = 60, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, max = 60, message = "Model is required"))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100, message = "Invalid year"))]
    pub year: u16,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: f64,

    pub mileage: u32,

    #[validate(length(min = 1, message = "Fuel type is required"))]
    pub fuel: String,

    #[validate(length(min = 1, message = "Transmission is required"))]
    pub transmission: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl VehicleForm {
    /// Build the form from multipart text fields.
    ///
    /// Only parsing happens here; call `validate()` for the rules.
    pub fn from_text_fields(fields: &HashMap<String, String>) -> Result<Self, AppError> {
        let text = |name: &str| fields.get(name).map(|v| v.trim().to_string()).unwrap_or_default();
        let optional = |name: &str| {
            fields
                .get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            brand: text("brand"),
            model: text("model"),
            year: parse_number(fields, "year")?,
            price: parse_number(fields, "price")?,
            mileage: parse_number(fields, "mileage")?,
            fuel: text("fuel"),
            transmission: text("transmission"),
            color: optional("color"),
            description: optional("description"),
            location: optional("location"),
        })
    }
}

fn parse_number<T: FromStr>(fields: &HashMap<String, String>, name: &str) -> Result<T, AppError> {
    let raw = fields
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", name)))?;

    raw.parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number", name)))
}

/// Browse filters, forwarded to `GET /vehicles` as query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 60))]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 60))]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Search is too long"))]
    pub search: Option<String>,
}

impl Default for VehicleQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            brand: None,
            model: None,
            min_price: None,
            max_price: None,
            search: None,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    12
}
