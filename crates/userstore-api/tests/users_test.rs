//! Integration tests for the user endpoints.
//!
//! Drives `POST /create` and `GET /user/{id}` through the full router against
//! an isolated in-memory database.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use userstore_api::create_router;
use userstore_testing::{
    http::{create_request, get_user_request, raw_create_request, read_body, read_json},
    TestEnv, UserBuilder,
};

#[tokio::test]
async fn create_user_returns_created_record() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let body = UserBuilder::new().blog("http://www.myblog.com").json();
    let response = app.oneshot(create_request(&body)).await.expect("execute request");

    let (status, json) = read_json(response).await.expect("read response");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, body);
    assert_eq!(env.user_count().await.expect("count users"), 1);
}

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let body = UserBuilder::new().json();
    let response = app.clone().oneshot(create_request(&body)).await.expect("create");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_user_request("1111")).await.expect("get");
    let (status, json) = read_json(response).await.expect("read response");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "id": "1111",
            "name": "kondukto",
            "email": "helo@kondukto.io",
        })
    );
}

#[tokio::test]
async fn blog_is_returned_when_stored() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let body = UserBuilder::new().id("1112").blog("https://myblog.com").json();
    app.clone().oneshot(create_request(&body)).await.expect("create");

    let response = app.oneshot(get_user_request("1112")).await.expect("get");
    let (status, json) = read_json(response).await.expect("read response");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["blog"], "https://myblog.com");
}

#[tokio::test]
async fn get_nonexistent_user_returns_not_found() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let response = app.oneshot(get_user_request("9999")).await.expect("get");
    let (status, json) = read_json(response).await.expect("read response");

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "E1004");
    assert_eq!(json["error"]["message"], "User not found");
}

#[tokio::test]
async fn get_with_non_numeric_id_is_rejected_before_storage() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    // With the table gone any query would fail with 404, so a 400 proves the
    // store was never consulted.
    env.break_storage().await.expect("drop table");

    for id in ["s1111", "0", "-1", "1212121212121212121212121111"] {
        let response = app.clone().oneshot(get_user_request(id)).await.expect("get");
        let (status, json) = read_json(response).await.expect("read response");

        assert_eq!(status, StatusCode::BAD_REQUEST, "id {id}");
        assert_eq!(json["error"]["code"], "E1002");
        assert_eq!(json["error"]["message"], "Not a valid ID");
    }
}

#[tokio::test]
async fn duplicate_create_fails_with_bad_request() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let body = UserBuilder::new().json();
    let first = app.clone().oneshot(create_request(&body)).await.expect("first create");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(create_request(&body)).await.expect("second create");
    let (status, json) = read_json(second).await.expect("read response");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "E1005");
    assert_eq!(env.user_count().await.expect("count users"), 1);
}

#[tokio::test]
async fn create_with_invalid_id_is_rejected_and_not_stored() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    for id in ["s1111", "0", "1212121212121212121212121111", ""] {
        let body = UserBuilder::new().id(id).json();
        let response = app.clone().oneshot(create_request(&body)).await.expect("create");
        let (status, json) = read_json(response).await.expect("read response");

        assert_eq!(status, StatusCode::BAD_REQUEST, "id {id:?}");
        assert_eq!(json["error"]["code"], "E1002");
    }

    assert_eq!(env.user_count().await.expect("count users"), 0);
}

#[tokio::test]
async fn create_with_invalid_blog_is_rejected() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    for blog in ["www.myblog.com", "ftp://example.com", "myblog.com"] {
        let body = UserBuilder::new().blog(blog).json();
        let response = app.clone().oneshot(create_request(&body)).await.expect("create");
        let (status, json) = read_json(response).await.expect("read response");

        assert_eq!(status, StatusCode::BAD_REQUEST, "blog {blog}");
        assert_eq!(json["error"]["code"], "E1003");
    }

    assert_eq!(env.user_count().await.expect("count users"), 0);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let bodies = [
        "not json".to_string(),
        "{}".to_string(),
        json!({"id": 1111, "name": "kondukto", "email": "helo@kondukto.io"}).to_string(),
        json!({"id": "1111", "name": "kondukto"}).to_string(),
    ];

    for body in bodies {
        let response = app.clone().oneshot(raw_create_request(body.clone())).await.expect("create");
        let (status, json) = read_json(response).await.expect("read response");

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json["error"]["code"], "E1001");
        assert_eq!(json["error"]["message"], "Malformed request body");
    }
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/create")
        .body(axum::body::Body::from(UserBuilder::new().json().to_string()))
        .expect("build request");

    let response = app.oneshot(request).await.expect("create");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failures_do_not_leak_details() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());
    env.break_storage().await.expect("drop table");

    let response =
        app.clone().oneshot(create_request(&UserBuilder::new().json())).await.expect("create");
    let (status, body) = read_body(response).await.expect("read response");
    let text = String::from_utf8_lossy(&body);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("E2001"), "body: {text}");
    assert!(!text.contains("no such table"), "body leaks storage error: {text}");

    let response = app.oneshot(get_user_request("1111")).await.expect("get");
    let (status, body) = read_body(response).await.expect("read response");
    let text = String::from_utf8_lossy(&body);

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(text.contains("E2002"), "body: {text}");
    assert!(!text.contains("no such table"), "body leaks storage error: {text}");
}

#[tokio::test]
async fn repeated_gets_return_identical_bodies() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let body = UserBuilder::new().blog("https://myblog.com").json();
    app.clone().oneshot(create_request(&body)).await.expect("create");

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let response = app.clone().oneshot(get_user_request("1111")).await.expect("get");
        let (status, bytes) = read_body(response).await.expect("read response");
        assert_eq!(status, StatusCode::OK);
        bodies.push(bytes);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn concurrent_creates_with_same_id_have_one_winner() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            let body = UserBuilder::new().id("4242").name(format!("racer-{i}")).json();
            tokio::spawn(async move { app.oneshot(create_request(&body)).await })
        })
        .collect();

    let statuses: Vec<StatusCode> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completes").expect("request completes").status())
        .collect();

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count(), 7);
    assert_eq!(env.user_count().await.expect("count users"), 1);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let response = app.oneshot(get_user_request("9999")).await.expect("get");

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_routes_and_methods_are_rejected() {
    let env = TestEnv::new().await.expect("test env setup");
    let app = create_router(env.user_service());

    let response = app
        .clone()
        .oneshot(userstore_testing::http::get_request("/users/1"))
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        app.oneshot(userstore_testing::http::get_request("/create")).await.expect("get");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
