//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Liveness probe: reports the crate version and whether the database
/// answers a trivial query. Always returns 200; a broken database shows up
/// as `"db_healthy": false` rather than an error status.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_healthy = cashier_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
