// src/main.rs
use std::sync::Arc;

use stockroom::config::AppConfig;
use stockroom::database;
use stockroom::routes;
use stockroom::server;
use stockroom::state::AppState;
use stockroom::store::{MemoryProductStore, PgProductStore, ProductStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables before the log filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::from_env();

    let store: Arc<dyn ProductStore> = match &config.database_url {
        Some(url) => {
            let db_pool = match database::create_pool(url, config.max_connections).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create database pool");
                    return;
                }
            };
            if let Err(e) = database::ensure_schema(&db_pool).await {
                tracing::error!(error = %e, "Failed to prepare products table");
                return;
            }
            Arc::new(PgProductStore::new(db_pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, products will be kept in memory");
            Arc::new(MemoryProductStore::new())
        }
    };

    let app_state = AppState::new(store);
    let app = routes::create_app(app_state, config.cors_allow_origin.as_deref());

    let Some((listener, addr)) = server::bind_listener(&config).await else {
        return;
    };
    tracing::info!("Server running on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
    }
}
