//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, is wrapped in
//! `{ "status_code": ..., "message": ..., "data": ... }`. Use [`ApiResponse`]
//! instead of ad-hoc `serde_json::json!` so the shape stays consistent.

use axum::Json;
use serde::Serialize;

/// Standard `{ status_code, message, data }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 envelope with a payload.
    pub fn success(message: &str, data: T) -> Json<Self> {
        Json(Self {
            status_code: 200,
            message: message.to_string(),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    /// A 200 envelope with no payload (mutating endpoints).
    pub fn message_only(message: &str) -> Json<Self> {
        Json(Self {
            status_code: 200,
            message: message.to_string(),
            data: None,
        })
    }
}
