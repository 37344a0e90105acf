//! Integration tests for Stockline.
//!
//! Tests build the full router (session layer, middleware, routes) against
//! an in-memory `SQLite` database and drive it in-process with tower's
//! `oneshot`; no running server or external database is required.
//!
//! ```bash
//! cargo test -p stockline-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

use stockline_server::config::Config;
use stockline_server::state::AppState;

/// Build the full application router over a fresh in-memory database.
///
/// Each call gets its own database; tests are fully isolated.
pub async fn test_app() -> Router {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let config = Config {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:5000".to_string(),
        session_secret: SecretString::from("integration-test-session-secret!"),
    };

    let state = AppState::new(config, pool);
    stockline_server::app(state)
        .await
        .expect("failed to build application")
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Build a request with no body.
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Build a form-encoded request (browser form post).
pub fn form_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("valid request")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not valid UTF-8")
}
