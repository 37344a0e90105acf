//! Demo data seeding command.

use rust_decimal::Decimal;

use stockline_server::db::ProductRepository;
use stockline_server::models::NewProduct;

use super::CliError;

/// Seed the database with a handful of demo products.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);

    let demo: &[(&str, &str, &str, Decimal, i64)] = &[
        (
            "Chicken Wings (1kg)",
            "Frozen, party cut",
            "Frozen Goods",
            Decimal::new(899, 2),
            40,
        ),
        (
            "BBQ Sauce",
            "House blend, 500ml bottle",
            "Condiments",
            Decimal::new(450, 2),
            25,
        ),
        (
            "Paper Trays",
            "Pack of 100",
            "Packaging",
            Decimal::new(1250, 2),
            12,
        ),
        (
            "Cooking Oil (5L)",
            "",
            "Kitchen Supplies",
            Decimal::new(2199, 2),
            8,
        ),
    ];

    for (name, description, category, price, quantity) in demo {
        let new = NewProduct::parse(
            name,
            Some((*description).to_string()),
            Some((*category).to_string()),
            *price,
            *quantity,
        )
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

        let product = repo.create(&new).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Seeded product");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}
