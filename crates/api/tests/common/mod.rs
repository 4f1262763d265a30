#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use allotment_api::config::ServerConfig;
use allotment_api::router::build_app_router;
use allotment_api::state::AppState;

pub const API_HOST: &str = "api.garden.test";
pub const FRONTEND_HOST: &str = "garden.test";

/// Build a test `ServerConfig` serving the frontend from `frontend_path`.
pub fn test_config(frontend_path: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        api_domain: API_HOST.to_string(),
        frontend_domain: FRONTEND_HOST.to_string(),
        frontend_path: frontend_path.to_path_buf(),
        request_timeout_secs: 30,
    }
}

/// Build the full application router, as `main.rs` does, on the given pool.
///
/// The frontend points at a directory that does not exist; use
/// [`build_test_app_with_frontend`] for static file tests.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_frontend(pool, &PathBuf::from("/nonexistent-frontend"))
}

pub fn build_test_app_with_frontend(pool: SqlitePool, frontend_path: &Path) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config(frontend_path)),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers (API host unless stated otherwise)
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    get_on_host(app, API_HOST, uri).await
}

pub async fn get_on_host(app: Router, host: &str, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, API_HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, API_HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// POST with an empty JSON object, as the frontend does for deletes.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    post_json(app, uri, serde_json::json!({})).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a row through the API and return its id.
pub async fn create(pool: &SqlitePool, uri: &str, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_location(pool: &SqlitePool, name: &str) -> i64 {
    create(pool, "/locations/new", serde_json::json!({ "name": name })).await
}

pub async fn create_plant(pool: &SqlitePool, name: &str, location_id: Option<i64>) -> i64 {
    create(
        pool,
        "/plants/new",
        serde_json::json!({ "name": name, "locationId": location_id }),
    )
    .await
}
