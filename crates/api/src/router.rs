//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests use the exact same route tree and middleware stack.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers::{health, product};
use crate::state::AppState;

/// Multipart bodies may carry an image of up to 6 MiB plus text fields, so
/// the body limit sits above the image limit; oversized images are rejected
/// by upload validation with a proper envelope, not by the body cap.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout
/// 6. Panic recovery (catch panics, return 500)
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        // Health check at root level (not under /v1).
        .route("/health", get(health::health_check))
        // API v1 routes.
        .nest("/v1", product_routes())
        // Stored product images, served read-only.
        .nest_service("/assets/image", ServeDir::new(&config.image_dir))
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500.
        .layer(CatchPanicLayer::new())
        // Request timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // CORS.
        .layer(cors)
        // Body limit for image uploads.
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        // Shared state.
        .with_state(state)
}

/// The `/v1/product` route tree.
///
/// ```text
/// /product                GET list (?page=N), POST create (multipart)
/// /product/search         GET search (?title=&barcode_id=)
/// /product/{barcode_id}   GET detail, PATCH update (multipart), DELETE
/// ```
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product",
            get(product::list_products).post(product::create_product),
        )
        .route("/product/search", get(product::search_products))
        .route(
            "/product/{barcode_id}",
            get(product::get_product_detail)
                .patch(product::update_product)
                .delete(product::delete_product),
        )
}

/// Build the CORS middleware layer from server configuration.
///
/// A configured origin list of exactly `*` allows any origin (without
/// credentials, which tower-http forbids with a wildcard). Panics at startup if any
/// configured origin is invalid, which is the desired behaviour -- we want
/// misconfiguration to fail fast.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ];

    if config.cors_origins == ["*"] {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
