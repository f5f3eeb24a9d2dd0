// src/database.rs
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(8))
        .connect(database_url)
        .await
}

/// Creates the `products` table if it is missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id       BIGSERIAL PRIMARY KEY,
            name     TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            price    NUMERIC(12, 2) NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
