//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use stockline_core::{Price, PriceError, ProductId};

/// A product row (domain type).
///
/// Serializes to the wire shape the browser client consumes; the price is a
/// plain JSON number and the quantity a non-negative integer.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Units currently in stock. Never below zero.
    pub quantity: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validation errors for product input.
#[derive(Debug, Error)]
pub enum ProductValidationError {
    /// The product name is empty.
    #[error("name is required")]
    EmptyName,

    /// The price is negative.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The quantity is negative.
    #[error("quantity cannot be negative")]
    NegativeQuantity,
}

/// Validated input for creating or fully overwriting a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Price,
    pub quantity: i64,
}

impl NewProduct {
    /// Validate raw field values into a `NewProduct`.
    ///
    /// Empty description/category strings are normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns `ProductValidationError` if the name is empty, the price is
    /// negative, or the quantity is negative.
    pub fn parse(
        name: &str,
        description: Option<String>,
        category: Option<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<Self, ProductValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }

        let price = Price::parse(price)?;

        if quantity < 0 {
            return Err(ProductValidationError::NegativeQuantity);
        }

        Ok(Self {
            name: name.to_owned(),
            description: normalize_optional(description),
            category: normalize_optional(category),
            price,
            quantity,
        })
    }
}

/// Treat empty or whitespace-only optional text as absent.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
