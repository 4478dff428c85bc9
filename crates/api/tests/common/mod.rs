//! Shared helpers for the API integration tests.
//!
//! Tests drive the real router via `tower::ServiceExt::oneshot`, so the
//! full middleware stack (CORS, request ID, timeout, panic recovery) is
//! exercised exactly as in production.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use cashier_api::config::{AppMode, ServerConfig};
use cashier_api::router::build_app_router;
use cashier_api::service::product::ProductService;
use cashier_api::state::AppState;
use cashier_core::files::FileStore;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and the given image dir.
pub fn test_config(image_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        mode: AppMode::Test,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        image_dir,
    }
}

/// Image directory shared by tests that do not inspect stored files.
/// Generated filenames are unique, so concurrent tests never collide.
pub fn shared_image_dir() -> PathBuf {
    std::env::temp_dir().join("cashier-api-test-images")
}

/// Build the application router backed by `pool`, storing images in the
/// shared temp directory.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_in(pool, shared_image_dir())
}

/// Build the application router with an explicit image directory, for tests
/// that assert on stored files.
pub fn build_test_app_in(pool: PgPool, image_dir: PathBuf) -> Router {
    let config = test_config(image_dir.clone());
    let products = ProductService::new(pool.clone(), FileStore::new(), image_dir);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        products: Arc::new(products),
    };

    build_app_router(state, &config)
}

// ── Request helpers ──────────────────────────────────────────────────────

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a multipart form with the given method (POST for create, PATCH for
/// update).
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    form: MultipartForm,
) -> Response<Body> {
    let (content_type, body) = form.finish();
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard envelope: `status_code` mirrors the HTTP status.
pub async fn assert_envelope(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert_eq!(json["status_code"], expected.as_u16());
    json
}

// ── Multipart body builder ───────────────────────────────────────────────

const BOUNDARY: &str = "cashier-test-boundary-4Yx7pQ";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.body,
        )
    }
}

/// A complete, valid create-product form for `barcode` with a small fake
/// PNG payload.
pub fn product_form(barcode: &str, title: &str) -> MultipartForm {
    MultipartForm::new()
        .text("barcode_id", barcode)
        .text("title", title)
        .text("price", "10.50")
        .text("description", "test product")
        .file("image", "upload.png", b"not-really-a-png")
}

/// List the filenames currently stored in `dir` (empty if it was never
/// created).
pub fn stored_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}
