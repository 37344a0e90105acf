//! JSON REST API routes.
//!
//! This is the compatibility surface for browser clients:
//!
//! ```text
//! POST   /signup                    - Create user via self-service
//! POST   /login                     - Authenticate
//! GET    /users                     - List users (ids and names only)
//! POST   /users                     - Create user
//! PUT    /users/{id}                - Update user (re-hashes password)
//! DELETE /users/{id}                - Delete user
//! GET    /products                  - List products
//! POST   /products                  - Create product
//! GET    /products/{id}             - Fetch one product
//! PUT    /products/{id}             - Full update
//! DELETE /products/{id}             - Delete product
//! POST   /products/{id}/stock/add    - Increment quantity
//! POST   /products/{id}/stock/deduct - Decrement quantity
//! ```
//!
//! No authentication is required on these endpoints beyond what the client
//! chooses to send; CORS is permissive for the same reason. Errors are JSON
//! `{"message": ...}` envelopes.

pub mod auth;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Create the JSON API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update).delete(users::remove))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show).put(products::update).delete(products::remove),
        )
        .route("/products/{id}/stock/add", post(products::stock_add))
        .route("/products/{id}/stock/deduct", post(products::stock_deduct))
        .layer(CorsLayer::permissive())
}
