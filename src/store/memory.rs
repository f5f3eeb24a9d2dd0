use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProductStore, StoreResult};
use crate::models::product::{NewProduct, Product};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-process store used by tests and by the server when no database is
/// configured. Ids start at 1 and are never reused, even after a delete.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn scan_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let product = product.with_id(inner.last_id);
        inner.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn persist(&self, product: &Product) -> StoreResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&product.id) {
            Some(row) => {
                *row = product.clone();
                Ok(Some(product.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}
