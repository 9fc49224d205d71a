//! Request builders and response readers for router tests.

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
};
use serde_json::Value;

/// Builds a `POST /create` request carrying `body` as JSON.
pub fn create_request(body: &Value) -> Request<Body> {
    raw_create_request(body.to_string())
}

/// Builds a `POST /create` request with an arbitrary body.
pub fn raw_create_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/create")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap_or_else(|e| panic!("invalid create request: {e}"))
}

/// Builds a `GET /user/{id}` request.
pub fn get_user_request(id: &str) -> Request<Body> {
    get_request(&format!("/user/{id}"))
}

/// Builds a bodiless `GET` request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_else(|e| panic!("invalid GET request for {uri}: {e}"))
}

/// Reads the status and raw body of a response.
pub async fn read_body(response: Response) -> Result<(StatusCode, Bytes)> {
    let status = response.status();
    let bytes =
        to_bytes(response.into_body(), usize::MAX).await.context("failed to read response body")?;
    Ok((status, bytes))
}

/// Reads the status and JSON body of a response.
pub async fn read_json(response: Response) -> Result<(StatusCode, Value)> {
    let (status, bytes) = read_body(response).await?;
    let json = serde_json::from_slice(&bytes).context("response body is not JSON")?;
    Ok((status, json))
}
