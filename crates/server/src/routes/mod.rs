//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (DB probe)
//!
//! # Pages (session required except /auth/*)
//! GET  /                       - Dashboard with stock summary
//! GET  /product-form           - Add-product form
//! POST /product-form           - Create product
//! GET  /product-list           - Product list (?q= name filter, ?edit= inline edit)
//! POST /product-list/{id}/update        - Overwrite product
//! POST /product-list/{id}/delete        - Delete product
//! POST /product-list/{id}/stock/add     - Add stock
//! POST /product-list/{id}/stock/deduct  - Deduct stock
//! GET  /user-management        - User list and add form
//! POST /user-management        - Create user
//! POST /user-management/{id}/update     - Overwrite user
//! POST /user-management/{id}/delete     - Delete user
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/signup            - Sign-up page
//! POST /auth/signup            - Sign-up action
//! POST /auth/logout            - Logout action
//!
//! # JSON API (see `api` module; CORS-open, no session)
//! POST /signup, POST /login, /users..., /products...
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the full application router (pages + JSON API).
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Product pages
        .route(
            "/product-form",
            get(products::form_page).post(products::create),
        )
        .route("/product-list", get(products::list_page))
        .route("/product-list/{id}/update", post(products::update))
        .route("/product-list/{id}/delete", post(products::delete))
        .route("/product-list/{id}/stock/add", post(products::stock_add))
        .route(
            "/product-list/{id}/stock/deduct",
            post(products::stock_deduct),
        )
        // User management pages
        .route("/user-management", get(users::page).post(users::create))
        .route("/user-management/{id}/update", post(users::update))
        .route("/user-management/{id}/delete", post(users::delete))
        // Auth
        .nest("/auth", auth_routes())
        // JSON API for browser clients
        .merge(api::routes())
}
