//! Tests for `AppError` → HTTP response mapping and extractor rejections.
//!
//! The first group calls `IntoResponse` directly on `AppError` values; the
//! second goes through the router to check that malformed input keeps the
//! JSON error envelope.

mod common;

use allotment_api::error::AppError;
use allotment_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, get, post_raw};
use http_body_util::BodyExt;
use sqlx::SqlitePool;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Direct mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Location",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Location with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400_with_message() {
    let err = AppError::Core(CoreError::Validation("Plant name is required.".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Plant name is required.");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("bad".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "bad");
}

#[tokio::test]
async fn internal_errors_are_sanitised() {
    for err in [
        AppError::InternalError("secret detail".into()),
        AppError::Core(CoreError::Internal("secret detail".into())),
        AppError::Database(sqlx::Error::PoolTimedOut),
    ] {
        let (status, json) = error_to_response(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Extractor rejections through the router
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_body_returns_400_envelope(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_raw(app, "/locations/new", "{\"name\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrongly_typed_field_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_raw(app, "/vegetables/new", "{\"plantId\": \"abc\"}").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_path_id_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/plants/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid path parameter"));
}
