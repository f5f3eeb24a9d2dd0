// src/store/mod.rs

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::product::{NewProduct, Product};

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// Each call is one store interaction; no connection or lock outlives it
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point lookup by id.
    async fn find(&self, id: i64) -> StoreResult<Option<Product>>;

    /// Every product, in the store's enumeration order (ascending id).
    async fn scan_all(&self) -> StoreResult<Vec<Product>>;

    /// Inserts a product and returns it with its newly assigned id.
    async fn insert(&self, product: NewProduct) -> StoreResult<Product>;

    /// Overwrites the row with `product.id`. Returns `None` if that row no
    /// longer exists.
    async fn persist(&self, product: &Product) -> StoreResult<Option<Product>>;

    /// Deletes by id. Returns whether a row was removed.
    async fn remove(&self, id: i64) -> StoreResult<bool>;
}
