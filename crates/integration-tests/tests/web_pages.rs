//! Browser-facing page tests: the Anonymous/Authenticated state machine
//! and the health endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use stockline_integration_tests::{body_text, empty_request, form_request, json_request, test_app};

#[tokio::test]
async fn health_endpoints() {
    let app = test_app().await;

    let health = app
        .clone()
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let ready = app
        .oneshot(empty_request("GET", "/health/ready"))
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn anonymous_visitors_are_redirected_to_login() {
    let app = test_app().await;

    for page in ["/", "/product-form", "/product-list", "/user-management"] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", page))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "page {page}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login",
            "page {page}"
        );
    }
}

#[tokio::test]
async fn login_page_renders_for_anonymous_visitors() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/auth/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Log in"));

    let signup = app
        .oneshot(empty_request("GET", "/auth/signup"))
        .await
        .unwrap();
    assert_eq!(signup.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_form_starts_a_session() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/signup",
            &json!({ "name": "alice", "password": "password123" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(form_request(
            "POST",
            "/auth/login",
            "name=alice&password=password123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set on login");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.contains("stockline_session"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn login_form_with_bad_credentials_redirects_back() {
    let app = test_app().await;

    let response = app
        .oneshot(form_request(
            "POST",
            "/auth/login",
            "name=alice&password=wrong",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login?error=credentials"
    );
}

#[tokio::test]
async fn signup_form_starts_a_session() {
    let app = test_app().await;

    let response = app
        .oneshot(form_request(
            "POST",
            "/auth/signup",
            "name=bob&password=password123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    assert!(response.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn signup_form_duplicate_name_redirects_with_error() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_request(
            "POST",
            "/auth/signup",
            "name=bob&password=password123",
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(form_request(
            "POST",
            "/auth/signup",
            "name=bob&password=password456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/signup?error=name_taken"
    );
}

#[tokio::test]
async fn authenticated_session_reaches_the_dashboard() {
    let app = test_app().await;

    // Sign up through the form to obtain a session cookie.
    let signup = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/auth/signup",
            "name=carol&password=password123",
        ))
        .await
        .unwrap();
    let cookie = signup
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned();

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Dashboard"));
    assert!(html.contains("carol"));
}
