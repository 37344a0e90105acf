//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Product};
use crate::state::AppState;

/// Products with a quantity at or below this count as "low stock".
const LOW_STOCK_THRESHOLD: i64 = 5;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: CurrentUser,
    pub products: Vec<Product>,
    pub total_products: usize,
    pub total_units: i64,
    pub low_stock_count: usize,
    pub low_stock_threshold: i64,
}

/// `GET /` - Dashboard with current stock levels.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
) -> Result<DashboardTemplate, AppError> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list(None).await?;

    let total_products = products.len();
    let total_units = products.iter().map(|p| p.quantity).sum();
    let low_stock_count = products
        .iter()
        .filter(|p| p.quantity <= LOW_STOCK_THRESHOLD)
        .count();

    Ok(DashboardTemplate {
        current_user,
        products,
        total_products,
        total_units,
        low_stock_count,
        low_stock_threshold: LOW_STOCK_THRESHOLD,
    })
}
