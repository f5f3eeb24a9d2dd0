pub mod products;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().merge(products::routes())
}

/// The full application: product API under `/api` plus banner and health
/// routes, with CORS and request tracing.
pub fn create_app(state: AppState, cors_allow_origin: Option<&str>) -> Router {
    Router::new()
        .route("/", get(|| async { "Stockroom API" }))
        .route("/health", get(health_check))
        .nest("/api", create_router())
        .layer(cors_layer(cors_allow_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match allow_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Invalid CORS_ALLOW_ORIGIN, allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

async fn health_check() -> &'static str {
    "OK"
}
