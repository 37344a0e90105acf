//! Product CRUD tests against the JSON API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use stockline_integration_tests::{body_json, empty_request, json_request, test_app};

#[tokio::test]
async fn create_product_returns_created_record() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "Widget", "price": 9.99, "quantity": 10 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["price"], 9.99);
    assert_eq!(body["quantity"], 10);
    assert!(body["id"].is_i64() || body["id"].is_u64());
}

#[tokio::test]
async fn create_product_accepts_stringly_numbers() {
    // The browser client posts form state, so price and quantity arrive as
    // strings.
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({
                "name": "Widget",
                "description": "A widget",
                "category": "Tools",
                "price": "9.99",
                "quantity": "10",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["quantity"], 10);
    assert_eq!(body["description"], "A widget");
}

#[tokio::test]
async fn create_product_identifiers_are_unique() {
    let app = test_app().await;

    let mut seen = Vec::new();
    for n in 0..3 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/products",
                &json!({ "name": format!("Product {n}"), "price": 1.0, "quantity": 1 }),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        let id = body["id"].as_i64().unwrap();
        assert!(!seen.contains(&id), "id {id} was returned twice");
        seen.push(id);
    }
}

#[tokio::test]
async fn create_product_missing_fields_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "Widget" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Name, price, and quantity are required");
}

#[tokio::test]
async fn create_product_negative_price_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "Widget", "price": -1.0, "quantity": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_and_get_products() {
    let app = test_app().await;

    let created = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/products",
                &json!({ "name": "Widget", "price": 9.99, "quantity": 10 }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let list = app
        .clone()
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let list_body = body_json(list).await;
    assert_eq!(list_body.as_array().unwrap().len(), 1);

    let get = app
        .oneshot(empty_request("GET", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(get.status(), StatusCode::OK);
    let get_body = body_json(get).await;
    assert_eq!(get_body["name"], "Widget");
}

#[tokio::test]
async fn get_missing_product_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/products/404"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let app = test_app().await;

    let created = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/products",
                &json!({
                    "name": "Widget",
                    "description": "A widget",
                    "category": "Tools",
                    "price": 9.99,
                    "quantity": 10,
                }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/products/{id}"),
            &json!({ "name": "Gadget", "price": 5.0, "quantity": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Gadget");
    assert_eq!(body["description"], serde_json::Value::Null);
    assert_eq!(body["quantity"], 3);
}

#[tokio::test]
async fn update_missing_product_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/products/404",
            &json!({ "name": "Gadget", "price": 5.0, "quantity": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_product() {
    let app = test_app().await;

    let created = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/products",
                &json!({ "name": "Widget", "price": 9.99, "quantity": 10 }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let gone = app
        .clone()
        .oneshot(empty_request("GET", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let again = app
        .oneshot(empty_request("DELETE", &format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
