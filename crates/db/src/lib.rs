//! PostgreSQL access for the cashier catalog: pool construction, migrations,
//! and the product repository.

pub mod models;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub type DbPool = sqlx::PgPool;

/// Every repository call is bounded by this server-side statement timeout.
/// Failures surface immediately; nothing retries.
const STATEMENT_TIMEOUT_MS: &str = "3000";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options: PgConnectOptions = database_url.parse()?;
    let options = options.options([("statement_timeout", STATEMENT_TIMEOUT_MS)]);

    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Roll the schema back: drop the products table and the sqlx migrations
/// bookkeeping table. Administrative use only.
pub async fn drop_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS products").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(pool)
        .await?;
    tracing::info!("schema dropped");
    Ok(())
}
