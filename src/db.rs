use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use crate::config::DatabaseConfig;

/// Opens the shared pool. `DATABASE_NAME` overrides any database named in the URL.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let options = PgConnectOptions::from_str(&cfg.url)
        .context("parse DATABASE_URL")?
        .database(&cfg.name);

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(options)
        .await
        .context("connect to database")?;

    tracing::info!(database = %cfg.name, "connected to database");
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) {
    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(pool).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }
}
