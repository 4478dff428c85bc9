//! Administrative schema tool: applies or rolls back the product table
//! schema. Not part of the runtime request path.
//!
//! ```text
//! schema apply   run pending migrations
//! schema drop    drop the products table and migration bookkeeping
//! ```

use anyhow::{bail, Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let command = std::env::args().nth(1).unwrap_or_default();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = cashier_db::create_pool(&database_url)
        .await
        .context("connecting to database")?;

    match command.as_str() {
        "apply" => {
            cashier_db::run_migrations(&pool)
                .await
                .context("applying migrations")?;
            tracing::info!("migrations applied");
        }
        "drop" => {
            cashier_db::drop_schema(&pool)
                .await
                .context("dropping schema")?;
        }
        other => bail!("usage: schema <apply|drop> (got '{other}')"),
    }

    Ok(())
}
