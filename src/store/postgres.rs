use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::{ProductStore, StoreResult};
use crate::models::product::{NewProduct, Product};

/// Postgres-backed store. Every query checks a connection out of the pool for
/// that statement only, so nothing is held between calls.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn find(&self, id: i64) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn scan_all(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, price FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    #[instrument(skip(self, product))]
    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, quantity, price)
             VALUES ($1, $2, $3)
             RETURNING id, name, quantity, price",
        )
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    // Single statement: a row deleted since it was loaded yields None
    #[instrument(skip(self, product), fields(id = product.id))]
    async fn persist(&self, product: &Product) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET
             name = $2,
             quantity = $3,
             price = $4
             WHERE id = $1
             RETURNING id, name, quantity, price",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
