//! Stock adjustment tests: the quantity invariant is the one piece of the
//! system with real correctness requirements.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use stockline_integration_tests::{body_json, empty_request, json_request, test_app};

async fn create_widget(app: &axum::Router, quantity: i64) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            &json!({ "name": "Widget", "price": 9.99, "quantity": quantity }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn current_quantity(app: &axum::Router, id: i64) -> i64 {
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/products/{id}")))
        .await
        .unwrap();
    body_json(response).await["quantity"].as_i64().unwrap()
}

#[tokio::test]
async fn add_then_deduct_returns_to_original_quantity() {
    let app = test_app().await;
    let id = create_widget(&app, 10).await;

    let add = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/products/{id}/stock/add"),
            &json!({ "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(add.status(), StatusCode::OK);
    let add_body = body_json(add).await;
    assert_eq!(add_body["product"]["quantity"], 15);

    let deduct = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/products/{id}/stock/deduct"),
            &json!({ "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(deduct.status(), StatusCode::OK);
    let deduct_body = body_json(deduct).await;
    assert_eq!(deduct_body["product"]["quantity"], 10);

    assert_eq!(current_quantity(&app, id).await, 10);
}

#[tokio::test]
async fn deduct_more_than_available_is_rejected_and_quantity_unchanged() {
    let app = test_app().await;
    let id = create_widget(&app, 15).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/products/{id}/stock/deduct"),
            &json!({ "quantity": 20 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(current_quantity(&app, id).await, 15);
}

#[tokio::test]
async fn non_positive_delta_is_rejected_and_quantity_unchanged() {
    let app = test_app().await;
    let id = create_widget(&app, 10).await;

    for path in ["stock/add", "stock/deduct"] {
        for quantity in [json!(0), json!(-5), serde_json::Value::Null] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    &format!("/products/{id}/{path}"),
                    &json!({ "quantity": quantity }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    assert_eq!(current_quantity(&app, id).await, 10);
}

#[tokio::test]
async fn adjusting_missing_product_is_not_found() {
    let app = test_app().await;

    for path in ["stock/add", "stock/deduct"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/products/404/{path}"),
                &json!({ "quantity": 5 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn deduct_down_to_zero_is_allowed() {
    let app = test_app().await;
    let id = create_widget(&app, 10).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/products/{id}/stock/deduct"),
            &json!({ "quantity": 10 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(current_quantity(&app, id).await, 0);
}
