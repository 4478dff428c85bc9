use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::product::ProductService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Dependencies are
/// constructed once at process start and injected here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cashier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Product lifecycle service.
    pub products: Arc<ProductService>,
}
