//! Database setup and initialization

use anyhow::{Context, Result};
use docrec_core::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Connect to `DATABASE_URL` and apply pending migrations.
pub async fn setup_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .backends
        .database_url
        .as_deref()
        .context("DATABASE_URL not configured")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.backends.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.backends.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.backends.db_max_connections,
        "Database connected successfully"
    );

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
