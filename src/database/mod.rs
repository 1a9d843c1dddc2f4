use anyhow::Result;
use sqlx::{PgPool, postgres::PgPoolOptions};

pub mod models;
pub mod repositories;
pub mod utils;

/// Connect and bring the schema up to date. All tables are provisioned
/// here at startup; the only lazy creation left at runtime is the
/// per-(employee, year) balance row.
pub async fn init_database(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Migrations completed successfully");

    Ok(pool)
}
