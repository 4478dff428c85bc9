//! Tests for the `AppError` → HTTP response mapping.
//!
//! These need no database: an `AppError` is converted straight into a
//! response and the envelope is inspected.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use cashier_api::error::AppError;
use cashier_core::error::CoreError;
use cashier_core::upload::MAX_IMAGE_BYTES;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status_code"], 404);
    assert_eq!(json["message"], "Product with this barcode doesn't exist");
    assert_eq!(json["data"], serde_json::Value::Null);
}

#[tokio::test]
async fn conflict_maps_to_409() {
    let err = AppError::Core(CoreError::Conflict("already exists".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "already exists");
}

#[tokio::test]
async fn invalid_extension_maps_to_400() {
    let err = AppError::Core(CoreError::InvalidExtension("gif".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "File should be jpeg, jpg, or png (got '.gif')");
}

#[tokio::test]
async fn size_exceeded_maps_to_400() {
    let err = AppError::Core(CoreError::SizeExceeded {
        limit: MAX_IMAGE_BYTES,
    });
    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn no_changes_maps_to_304() {
    let err = AppError::Core(CoreError::NoChanges);
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn storage_error_maps_to_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Storage(
        "writing /secret/path/cc4e.png: permission denied".into(),
    ));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // The response must not leak filesystem details.
    assert_eq!(json["message"], "An internal error occurred");
}

#[tokio::test]
async fn bad_request_maps_to_400_with_message() {
    let err = AppError::BadRequest("Missing required field 'title'".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Missing required field 'title'");
}

#[tokio::test]
async fn unique_violation_maps_to_409() {
    // A duplicate-barcode race surfaces from sqlx as a database error with
    // code 23505; anything non-unique-constraint stays a 500.
    let err = AppError::Database(sqlx::Error::RowNotFound);
    let (status, _) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
