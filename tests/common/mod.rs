//! Shared helpers: an app over a fresh in-memory store, and one-shot request helpers.
//!
//! Requests go straight to the router through `tower::ServiceExt`, no TCP listener.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use movies_api::{app, connect, ensure_tables, AppState, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

pub async fn test_app() -> Router {
    test_app_with(ServerConfig::default()).await
}

/// A single connection keeps every request on the same in-memory database.
pub async fn test_app_with(config: ServerConfig) -> Router {
    let pool = connect("sqlite::memory:", 1).await.expect("open in-memory store");
    ensure_tables(&pool).await.expect("create tables");
    app(AppState::new(pool, config))
}

/// Several connections onto one shared-cache in-memory database, for concurrent requests.
pub async fn test_app_pooled(connections: u32) -> Router {
    let pool = connect("sqlite::memory:", connections)
        .await
        .expect("open in-memory store");
    ensure_tables(&pool).await.expect("create tables");
    app(AppState::new(pool, ServerConfig::default()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, `Value::Null` for an empty body, or the raw text when not JSON.
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

/// POST and return the generated id, asserting 201.
pub async fn create(app: &Router, collection: &str, body: Value) -> i64 {
    let resp = post_json(app, collection, body).await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    resp.body["id"].as_i64().expect("created object has an id")
}
