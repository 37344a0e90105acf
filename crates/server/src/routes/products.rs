//! Product page handlers: add-product form and the product list with
//! inline edit, delete, and stock actions.
//!
//! Mutations are plain form posts that redirect back to the originating
//! view with an `?error=` or `?success=` code; the page handler translates
//! the code into a banner message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use stockline_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, NewProduct, Product, ProductValidationError};
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Product form data. Everything arrives as text from form inputs.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    /// Validate the form into a `NewProduct`, or return a redirect error code.
    fn parse(self) -> Result<NewProduct, &'static str> {
        let price = self.price.trim().parse::<Decimal>().map_err(|_| {
            if self.price.trim().is_empty() {
                "missing_fields"
            } else {
                "invalid_price"
            }
        })?;
        let quantity = self.quantity.trim().parse::<i64>().map_err(|_| {
            if self.quantity.trim().is_empty() {
                "missing_fields"
            } else {
                "invalid_quantity"
            }
        })?;

        NewProduct::parse(
            &self.name,
            Some(self.description),
            Some(self.category),
            price,
            quantity,
        )
        .map_err(|e| match e {
            ProductValidationError::EmptyName => "missing_fields",
            ProductValidationError::Price(_) => "invalid_price",
            ProductValidationError::NegativeQuantity => "invalid_quantity",
        })
    }
}

/// Stock adjustment form data.
#[derive(Debug, Deserialize)]
pub struct StockForm {
    pub quantity: String,
}

impl StockForm {
    fn positive_delta(&self) -> Result<i64, &'static str> {
        match self.quantity.trim().parse::<i64>() {
            Ok(delta) if delta > 0 => Ok(delta),
            _ => Err("invalid_quantity"),
        }
    }
}

/// Query parameters for the product list page.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Name filter from the search box.
    pub q: Option<String>,
    /// Product ID whose inline edit form should be shown.
    pub edit: Option<i64>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Query parameters for the add-product form page.
#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Add-product form page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub current_user: CurrentUser,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/list.html")]
pub struct ProductListTemplate {
    pub current_user: CurrentUser,
    pub products: Vec<Product>,
    pub query: String,
    pub edit: Option<Product>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Add-Product Form
// =============================================================================

/// `GET /product-form` - Display the add-product form.
pub async fn form_page(
    RequireAuth(current_user): RequireAuth,
    Query(query): Query<FormQuery>,
) -> ProductFormTemplate {
    ProductFormTemplate {
        current_user,
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    }
}

/// `POST /product-form` - Create a product from the form.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_current_user): RequireAuth,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let new = match form.parse() {
        Ok(new) => new,
        Err(code) => {
            return Ok(Redirect::to(&format!("/product-form?error={code}")).into_response());
        }
    };

    let repo = ProductRepository::new(state.pool());
    let product = repo.create(&new).await?;
    tracing::info!(product_id = %product.id, "product created");

    Ok(Redirect::to("/product-form?success=created").into_response())
}

// =============================================================================
// Product List
// =============================================================================

/// `GET /product-list` - Display the product list.
///
/// Supports a case-insensitive name filter (`?q=`) and an inline edit form
/// for one product (`?edit={id}`).
pub async fn list_page(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<ProductListTemplate, AppError> {
    let repo = ProductRepository::new(state.pool());

    let filter = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let products = repo.list(filter).await?;

    let edit = match query.edit {
        Some(id) => repo.get_by_id(ProductId::new(id)).await?,
        None => None,
    };

    Ok(ProductListTemplate {
        current_user,
        products,
        query: filter.unwrap_or_default().to_owned(),
        edit,
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    })
}

/// `POST /product-list/{id}/update` - Overwrite a product from the inline
/// edit form.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_current_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let new = match form.parse() {
        Ok(new) => new,
        Err(code) => {
            return Ok(
                Redirect::to(&format!("/product-list?edit={id}&error={code}")).into_response(),
            );
        }
    };

    let repo = ProductRepository::new(state.pool());
    match repo.update(ProductId::new(id), &new).await {
        Ok(_) => Ok(Redirect::to("/product-list?success=updated").into_response()),
        Err(RepositoryError::NotFound) => {
            Ok(Redirect::to("/product-list?error=not_found").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /product-list/{id}/delete` - Delete a product.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_current_user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let repo = ProductRepository::new(state.pool());
    match repo.delete(ProductId::new(id)).await {
        Ok(()) => Ok(Redirect::to("/product-list?success=deleted").into_response()),
        Err(RepositoryError::NotFound) => {
            Ok(Redirect::to("/product-list?error=not_found").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /product-list/{id}/stock/add` - Add stock to a product.
pub async fn stock_add(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<StockForm>,
) -> Result<Response, AppError> {
    adjust(state, current_user, id, &form, 1).await
}

/// `POST /product-list/{id}/stock/deduct` - Deduct stock from a product.
pub async fn stock_deduct(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(id): Path<i64>,
    Form(form): Form<StockForm>,
) -> Result<Response, AppError> {
    adjust(state, current_user, id, &form, -1).await
}

/// Shared stock adjustment flow for the add/deduct form posts.
async fn adjust(
    state: AppState,
    _current_user: CurrentUser,
    id: i64,
    form: &StockForm,
    sign: i64,
) -> Result<Response, AppError> {
    let delta = match form.positive_delta() {
        Ok(delta) => delta * sign,
        Err(code) => {
            return Ok(Redirect::to(&format!("/product-list?error={code}")).into_response());
        }
    };

    let repo = ProductRepository::new(state.pool());
    match repo.adjust_quantity(ProductId::new(id), delta).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, delta, quantity = product.quantity, "stock adjusted");
            let success = if delta > 0 { "stock_added" } else { "stock_deducted" };
            Ok(Redirect::to(&format!("/product-list?success={success}")).into_response())
        }
        Err(RepositoryError::NotFound) => {
            Ok(Redirect::to("/product-list?error=not_found").into_response())
        }
        Err(RepositoryError::InsufficientStock) => {
            Ok(Redirect::to("/product-list?error=insufficient_stock").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Message Translation
// =============================================================================

fn error_message(code: &str) -> String {
    match code {
        "missing_fields" => "Name, price, and quantity are required.",
        "invalid_price" => "Please enter a valid, non-negative price.",
        "invalid_quantity" => "Please enter a valid, non-negative quantity.",
        "insufficient_stock" => "Not enough stock to deduct that amount.",
        "not_found" => "That product no longer exists.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn success_message(code: &str) -> String {
    match code {
        "created" => "Product added successfully!",
        "updated" => "Product updated successfully!",
        "deleted" => "Product deleted successfully!",
        "stock_added" => "Stock added successfully!",
        "stock_deducted" => "Stock deducted successfully!",
        _ => "Done.",
    }
    .to_string()
}
