// src/handlers/product.rs
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::dtos::product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

// GET /api/product - List all products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.products.list().await?;
    Ok(Json(products))
}

// GET /api/product/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.products.get(id).await?;
    Ok(Json(product))
}

// POST /api/product - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.products.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.product),
    ))
}

// PUT /api/product/{id} - Replace product fields
#[instrument(skip(state, payload))]
pub async fn update_product(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.products.update(id, payload).await?;
    Ok(Json(product))
}

// DELETE /api/product/{id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
