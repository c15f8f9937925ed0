// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle listing models.

use serde::{Deserialize, Serialize};

/// An image already persisted and attached to a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleImage {
    pub id: String,
    pub url: String,
}

/// Public contact details of the listing owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Vehicle listing as returned by the marketplace API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub price: f64,
    pub mileage: u32,
    pub fuel: String,
    pub transmission: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<VehicleImage>,
    #[serde(default)]
    pub seller: Option<Seller>,
}

impl Vehicle {
    /// Human-readable title, e.g. "2019 Toyota Corolla".
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.brand, self.model)
    }

    /// Link that opens a conversation with the seller.
    ///
    /// WhatsApp when a phone number is known, email otherwise.
    pub fn contact_url(&self) -> Option<String> {
        let seller = self.seller.as_ref()?;
        let message = format!("Hi {}, I'm interested in your {}.", seller.name, self.title());

        let digits: String = seller
            .phone
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if !digits.is_empty() {
            return Some(format!(
                "https://wa.me/{}?text={}",
                digits,
                urlencoding::encode(&message)
            ));
        }

        seller.email.as_deref().map(|email| {
            format!(
                "mailto:{}?subject={}&body={}",
                email,
                urlencoding::encode(&self.title()),
                urlencoding::encode(&message)
            )
        })
    }
}

/// One page of browse results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePage {
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}
