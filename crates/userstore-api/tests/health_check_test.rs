//! Health check endpoint tests.

use axum::http::StatusCode;
use tower::ServiceExt;
use userstore_api::create_router;
use userstore_testing::{
    http::{get_request, read_json},
    TestEnv,
};

#[tokio::test]
async fn health_check_returns_success_when_healthy() {
    let env = TestEnv::new().await.expect("failed to create test environment");
    let app = create_router(env.user_service());

    let response = app.oneshot(get_request("/health")).await.expect("failed to make request");
    let (status, json) = read_json(response).await.expect("health response should be JSON");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "up");
    assert!(json["timestamp"].is_string());
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn health_check_reports_unavailable_database() {
    let env = TestEnv::new().await.expect("failed to create test environment");
    let app = create_router(env.user_service());
    env.pool().close().await;

    let response = app.oneshot(get_request("/health")).await.expect("failed to make request");
    let (status, json) = read_json(response).await.expect("health response should be JSON");

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["checks"]["database"]["status"], "down");
}

#[tokio::test]
async fn health_check_rejects_post() {
    let env = TestEnv::new().await.expect("failed to create test environment");
    let app = create_router(env.user_service());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/health")
        .body(axum::body::Body::empty())
        .expect("build request");
    let response = app.oneshot(request).await.expect("failed to make request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
