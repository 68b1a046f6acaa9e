//! End-to-end tests for the served dashboard.
//!
//! The dashboard runs its real router and `ApiClient` against a loopback fake
//! of the recommendation service.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use recdash_core::View;
use recdash_integration_tests::{TestBackend, product_json, spawn_dashboard, user_json};
use serde_json::json;

async fn seeded_backend() -> TestBackend {
    let backend = TestBackend::start().await;
    backend
        .respond_json("GET", "/users", &json!([user_json(1, "Ana")]))
        .respond_json("GET", "/products", &json!([product_json(10, "Mug", 9.99, 0.0)]))
        .respond_json(
            "GET",
            "/recommendations/1",
            &json!({
                "recommendations": [
                    {"product": product_json(10, "Mug", 9.99, 0.0), "score": 0.87}
                ],
                "recommendation_type": "hybrid"
            }),
        );
    backend
}

#[tokio::test]
async fn test_health() {
    let backend = TestBackend::start().await;
    let dashboard = spawn_dashboard(&backend, 50).await;

    let (status, body) = dashboard.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_startup_fetch_populates_dashboard() {
    let backend = seeded_backend().await;
    let dashboard = spawn_dashboard(&backend, 50).await;

    let report = dashboard.store.initialize().await;
    assert!(report.is_complete());
    assert_eq!(backend.count("GET", "/users"), 1);
    assert!(backend.requests().contains(&"GET /users?limit=50".to_string()));

    let (status, body) = dashboard.get("/").await;
    assert_eq!(status, 200);
    assert_eq!(body.matches(r#"<span class="stat-value">1</span>"#).count(), 2);
    assert!(body.contains(r#"<span class="stat-value">0</span>"#));
}

#[tokio::test]
async fn test_startup_failure_leaves_lists_empty() {
    let backend = TestBackend::start().await;
    backend
        .respond_raw("GET", "/users", 500, "")
        .respond_json("GET", "/products", &json!([product_json(10, "Mug", 9.99, 0.0)]));
    let dashboard = spawn_dashboard(&backend, 50).await;

    let report = dashboard.store.initialize().await;
    assert!(report.users.is_err());

    let (status, body) = dashboard.get("/users").await;
    assert_eq!(status, 200);
    assert!(body.contains("Users (0)"));
    let (_, body) = dashboard.get("/products").await;
    assert!(body.contains("Mug"));
}

#[tokio::test]
async fn test_recommendation_flow() {
    let backend = seeded_backend().await;
    let dashboard = spawn_dashboard(&backend, 50).await;
    dashboard.store.initialize().await;

    let response = dashboard.post("/users/1/recommendations", None).await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/recommendations"
    );

    dashboard.wait_idle().await;
    let (_, body) = dashboard.get("/").await;
    assert!(body.contains("Recommendations for Ana"));
    assert!(body.contains("Score 0.87"));
    assert!(body.contains("hybrid"));
    assert_eq!(
        dashboard.store.snapshot().await.active_view,
        View::Recommendations
    );
}

#[tokio::test]
async fn test_failed_recommendations_keep_previous_selection() {
    let backend = seeded_backend().await;
    let dashboard = spawn_dashboard(&backend, 50).await;
    dashboard.store.initialize().await;

    dashboard.post("/users/1/recommendations", None).await;
    dashboard.wait_idle().await;
    let before = dashboard.store.snapshot().await.selection;

    dashboard.post("/recommendations", Some("user_id=999")).await;
    dashboard.wait_idle().await;

    assert_eq!(backend.count("GET", "/recommendations/999"), 1);
    assert_eq!(dashboard.store.snapshot().await.selection, before);
    let (_, body) = dashboard.get("/recommendations").await;
    assert!(body.contains("Recommendations for Ana"));
}

#[tokio::test]
async fn test_page_shows_loading_while_fetching() {
    let backend = seeded_backend().await;
    backend.delay("GET", "/recommendations/1", Duration::from_millis(300));
    let dashboard = spawn_dashboard(&backend, 50).await;
    dashboard.store.initialize().await;

    dashboard.post("/users/1/recommendations", None).await;
    let (_, body) = dashboard.get("/recommendations").await;
    assert!(body.contains("Loading recommendations"));
    assert!(body.contains(r#"http-equiv="refresh""#));

    // A second request while busy is refused, not queued
    dashboard.post("/users/1/recommendations", None).await;
    let (_, body) = dashboard.get("/recommendations").await;
    assert!(body.contains("already being fetched"));

    dashboard.wait_idle().await;
    assert_eq!(backend.count("GET", "/recommendations/1"), 1);
    let (_, body) = dashboard.get("/recommendations").await;
    assert!(!body.contains(r#"http-equiv="refresh""#));
}

#[tokio::test]
async fn test_generate_data_refetches_once() {
    let backend = seeded_backend().await;
    backend.respond_json(
        "POST",
        "/generate-data",
        &json!({"message": "ok", "users_created": 1, "products_created": 1}),
    );
    let dashboard = spawn_dashboard(&backend, 50).await;
    dashboard.store.initialize().await;

    let response = dashboard.post("/generate-data", None).await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/");
    dashboard.wait_idle().await;

    assert_eq!(backend.count("POST", "/generate-data"), 1);
    assert_eq!(backend.count("GET", "/users"), 2);
    assert_eq!(backend.count("GET", "/products"), 2);

    let (_, body) = dashboard.get("/").await;
    assert!(body.contains("Sample data generated successfully (1 users, 1 products)."));
}

#[tokio::test]
async fn test_generate_data_success_survives_refetch_failure() {
    let backend = seeded_backend().await;
    backend.respond_raw("POST", "/generate-data", 200, "");
    let dashboard = spawn_dashboard(&backend, 50).await;
    dashboard.store.initialize().await;

    backend.respond_raw("GET", "/users", 500, "");
    dashboard.post("/generate-data", None).await;
    dashboard.wait_idle().await;

    let (_, body) = dashboard.get("/").await;
    assert!(body.contains("notice-success"));
    assert_eq!(dashboard.store.snapshot().await.users.len(), 1);
}

#[tokio::test]
async fn test_generate_data_failure_is_reported() {
    let backend = seeded_backend().await;
    backend.respond_raw("POST", "/generate-data", 500, "");
    let dashboard = spawn_dashboard(&backend, 50).await;
    dashboard.store.initialize().await;

    dashboard.post("/generate-data", None).await;
    dashboard.wait_idle().await;

    assert_eq!(backend.count("GET", "/users"), 1);
    let (_, body) = dashboard.get("/").await;
    assert!(body.contains("notice-error"));
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let backend = TestBackend::start().await;
    let dashboard = spawn_dashboard(&backend, 50).await;

    let (status, body) = dashboard.get("/static/app.css").await;
    assert_eq!(status, 200);
    assert!(body.contains(".tab-active"));
}
