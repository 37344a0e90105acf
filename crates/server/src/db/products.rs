//! Product repository for database operations.
//!
//! Queries use the sqlx runtime API with explicit row types; rows are
//! converted into domain types via `TryFrom` so bad data surfaces as
//! `RepositoryError::DataCorruption` instead of a panic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use stockline_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    category: Option<String>,
    price: String,
    quantity: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let amount = row.price.parse::<Decimal>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;
        let price = Price::parse(amount).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            category: row.category,
            price,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by a case-insensitive name
    /// substring.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(&self, name_filter: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = match name_filter {
            Some(filter) => {
                sqlx::query_as::<_, ProductRow>(
                    "SELECT id, name, description, category, price, quantity, created_at, updated_at \
                     FROM product \
                     WHERE instr(lower(name), lower(?1)) > 0 \
                     ORDER BY id",
                )
                .bind(filter)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductRow>(
                    "SELECT id, name, description, category, price, quantity, created_at, updated_at \
                     FROM product \
                     ORDER BY id",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, category, price, quantity, created_at, updated_at \
             FROM product \
             WHERE id = ?1",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new product. The store assigns the identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO product (name, description, category, price, quantity, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
             RETURNING id, name, description, category, price, quantity, created_at, updated_at",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.category)
        .bind(new.price.as_decimal().to_string())
        .bind(new.quantity)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Overwrite all fields of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        new: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ProductRow>(
            "UPDATE product \
             SET name = ?1, description = ?2, category = ?3, price = ?4, quantity = ?5, updated_at = ?6 \
             WHERE id = ?7 \
             RETURNING id, name, description, category, price, quantity, created_at, updated_at",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.category)
        .bind(new.price.as_decimal().to_string())
        .bind(new.quantity)
        .bind(now)
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Adjust a product's quantity by a signed delta, atomically.
    ///
    /// The adjustment is a single conditional update so concurrent callers
    /// can never produce a lost update or a negative quantity:
    /// `quantity = quantity + delta` only applies when the result stays
    /// non-negative. When zero rows match, one follow-up probe distinguishes
    /// a missing product from an adjustment that would go negative.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::InsufficientStock` if the delta would take
    /// the quantity below zero.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn adjust_quantity(
        &self,
        id: ProductId,
        delta: i64,
    ) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ProductRow>(
            "UPDATE product \
             SET quantity = quantity + ?1, updated_at = ?2 \
             WHERE id = ?3 AND quantity + ?1 >= 0 \
             RETURNING id, name, description, category, price, quantity, created_at, updated_at",
        )
        .bind(delta)
        .bind(now)
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let exists =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?1")
                        .bind(id.as_i64())
                        .fetch_one(self.pool)
                        .await?;

                if exists == 0 {
                    Err(RepositoryError::NotFound)
                } else {
                    Err(RepositoryError::InsufficientStock)
                }
            }
        }
    }
}
