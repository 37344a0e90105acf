//! JSON API handlers for product CRUD and stock adjustment.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use stockline_core::ProductId;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::{NewProduct, Product};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Payload for creating or fully updating a product.
///
/// The original browser client posts numeric fields as strings straight from
/// form inputs, so `price` and `quantity` accept both JSON numbers and
/// numeric strings; empty strings count as missing.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_integer")]
    quantity: Option<i64>,
}

impl ProductPayload {
    fn into_new_product(self) -> Result<NewProduct, AppError> {
        let name = self.name.unwrap_or_default();
        let (Some(price), Some(quantity)) = (self.price, self.quantity) else {
            return Err(AppError::BadRequest(
                "Name, price, and quantity are required".to_string(),
            ));
        };
        if name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Name, price, and quantity are required".to_string(),
            ));
        }

        NewProduct::parse(&name, self.description, self.category, price, quantity)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Payload for stock add/deduct requests.
#[derive(Debug, Deserialize)]
pub struct StockAdjustRequest {
    #[serde(default, deserialize_with = "lenient_integer")]
    quantity: Option<i64>,
}

impl StockAdjustRequest {
    /// Extract a strictly positive delta.
    fn positive_delta(&self) -> Result<i64, AppError> {
        match self.quantity {
            Some(delta) if delta > 0 => Ok(delta),
            _ => Err(AppError::BadRequest("Invalid quantity".to_string())),
        }
    }
}

/// Response wrapper for stock adjustments, matching the browser client's
/// expected `{"product": ...}` shape.
#[derive(Debug, Serialize)]
pub struct StockAdjustResponse {
    product: Product,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /products` - List all products.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list(None).await?;

    Ok(Json(products))
}

/// `GET /products/{id}` - Fetch a single product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    Ok(Json(product))
}

/// `POST /products` - Create a product.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let new = payload.into_new_product()?;

    let repo = ProductRepository::new(state.pool());
    let product = repo.create(&new).await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}` - Overwrite all fields of a product.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    let new = payload.into_new_product()?;

    let repo = ProductRepository::new(state.pool());
    let product = repo.update(ProductId::new(id), &new).await?;

    Ok(Json(product))
}

/// `DELETE /products/{id}` - Delete a product.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let repo = ProductRepository::new(state.pool());
    repo.delete(ProductId::new(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /products/{id}/stock/add` - Increment a product's quantity.
pub async fn stock_add(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdjustRequest>,
) -> Result<Json<StockAdjustResponse>, AppError> {
    let delta = payload.positive_delta()?;

    let repo = ProductRepository::new(state.pool());
    let product = repo.adjust_quantity(ProductId::new(id), delta).await?;

    tracing::info!(product_id = %product.id, delta, quantity = product.quantity, "stock added");

    Ok(Json(StockAdjustResponse { product }))
}

/// `POST /products/{id}/stock/deduct` - Decrement a product's quantity.
///
/// Rejected when the delta exceeds the current quantity; stock never goes
/// negative.
pub async fn stock_deduct(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdjustRequest>,
) -> Result<Json<StockAdjustResponse>, AppError> {
    let delta = payload.positive_delta()?;

    let repo = ProductRepository::new(state.pool());
    let product = repo.adjust_quantity(ProductId::new(id), -delta).await?;

    tracing::info!(
        product_id = %product.id,
        delta,
        quantity = product.quantity,
        "stock deducted"
    );

    Ok(Json(StockAdjustResponse { product }))
}

// =============================================================================
// Lenient Field Deserializers
// =============================================================================

/// Accept a decimal as a JSON number or a numeric string.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Decimal),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<Decimal>()
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Accept an integer as a JSON number or a numeric string.
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}
