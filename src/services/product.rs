// src/services/product.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::dtos::product::{
    field_problem, CreateProductRequest, ProductResponse, UpdateProductRequest,
};
use crate::error::AppError;
use crate::models::product::{NewProduct, Product};
use crate::store::ProductStore;

/// Path prefix the HTTP surface serves products under.
pub const PRODUCT_PATH: &str = "/api/product";

pub fn location_for(id: i64) -> String {
    format!("{PRODUCT_PATH}/{id}")
}

/// A freshly created product and where it can be fetched from.
#[derive(Debug)]
pub struct Created {
    pub product: ProductResponse,
    pub location: String,
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.store.scan_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ProductResponse, AppError> {
        let product = self.load(id).await?;
        Ok(ProductResponse::from(product))
    }

    #[instrument(skip(self, req))]
    pub async fn create(&self, req: CreateProductRequest) -> Result<Created, AppError> {
        let name = validate_fields(&req.name, req.quantity, req.price)?;
        let new_product = NewProduct::from(CreateProductRequest { name, ..req });

        let product = self.store.insert(new_product).await?;
        debug!(id = product.id, "Product created");

        Ok(Created {
            location: location_for(product.id),
            product: ProductResponse::from(product),
        })
    }

    /// Overwrites name, quantity and price together; the id never changes.
    #[instrument(skip(self, req))]
    pub async fn update(&self, id: i64, req: UpdateProductRequest) -> Result<ProductResponse, AppError> {
        let name = validate_fields(&req.name, req.quantity, req.price)?;

        let mut product = self.load(id).await?;
        product.name = name;
        product.quantity = req.quantity;
        product.price = req.price;

        let product = self.store.persist(&product).await?.ok_or_else(|| {
            debug!(id, "Product removed before update was persisted");
            AppError::NotFound
        })?;

        Ok(ProductResponse::from(product))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let product = self.load(id).await?;

        if !self.store.remove(product.id).await? {
            debug!(id, "Product removed concurrently");
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn load(&self, id: i64) -> Result<Product, AppError> {
        self.store.find(id).await?.ok_or_else(|| {
            debug!(id, "Product not found");
            AppError::NotFound
        })
    }
}

/// Checks the write-side invariants and returns the trimmed name.
fn validate_fields(name: &str, quantity: i32, price: Decimal) -> Result<String, AppError> {
    match field_problem(name, quantity, price) {
        Some(reason) => {
            warn!(reason, "Rejected product payload");
            Err(AppError::validation(reason))
        }
        None => Ok(name.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryProductStore, StoreResult};
    use async_trait::async_trait;

    /// Finds every id, but the row is gone by the time it is written or removed.
    struct VanishingStore;

    #[async_trait]
    impl ProductStore for VanishingStore {
        async fn find(&self, id: i64) -> StoreResult<Option<Product>> {
            Ok(Some(Product {
                id,
                name: "Widget".to_string(),
                quantity: 1,
                price: Decimal::ONE,
            }))
        }

        async fn scan_all(&self) -> StoreResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
            Ok(product.with_id(1))
        }

        async fn persist(&self, _product: &Product) -> StoreResult<Option<Product>> {
            Ok(None)
        }

        async fn remove(&self, _id: i64) -> StoreResult<bool> {
            Ok(false)
        }
    }

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductStore::new()))
    }

    fn create_req(name: &str, quantity: i32, cents: i64) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            quantity,
            price: Decimal::new(cents, 2),
        }
    }

    fn update_req(name: &str, quantity: i32, cents: i64) -> UpdateProductRequest {
        UpdateProductRequest {
            name: name.to_string(),
            quantity,
            price: Decimal::new(cents, 2),
        }
    }

    fn assert_validation(err: AppError, expected: &str) {
        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let svc = service();

        let created = svc.create(create_req("Widget", 10, 250)).await.unwrap();
        let fetched = svc.get(created.product.id).await.unwrap();

        assert_eq!(fetched, created.product);
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.quantity, 10);
        assert_eq!(fetched.price, Decimal::new(250, 2));
        assert_eq!(created.location, format!("/api/product/{}", fetched.id));
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let svc = service();

        let a = svc.create(create_req("A", 1, 100)).await.unwrap();
        let b = svc.create(create_req("A", 1, 100)).await.unwrap();

        assert_ne!(a.product.id, b.product.id);
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let svc = service();

        assert!(matches!(svc.get(404).await, Err(AppError::NotFound)));
        assert!(matches!(
            svc.update(404, update_req("A", 1, 100)).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(svc.delete(404).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_overwrites_all_fields_and_keeps_id() {
        let svc = service();
        let id = svc.create(create_req("Widget", 10, 250)).await.unwrap().product.id;

        let updated = svc.update(id, update_req("Sprocket", 5, 399)).await.unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(svc.get(id).await.unwrap(), updated);
        assert_eq!(updated.name, "Sprocket");
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.price, Decimal::new(399, 2));
    }

    #[tokio::test]
    async fn repeated_update_is_idempotent() {
        let svc = service();
        let id = svc.create(create_req("Widget", 10, 250)).await.unwrap().product.id;

        let once = svc.update(id, update_req("Widget", 5, 250)).await.unwrap();
        let twice = svc.update(id, update_req("Widget", 5, 250)).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(svc.list().await.unwrap(), vec![twice]);
    }

    #[tokio::test]
    async fn delete_is_final() {
        let svc = service();
        let id = svc.create(create_req("Widget", 10, 250)).await.unwrap().product.id;

        svc.delete(id).await.unwrap();

        assert!(matches!(svc.get(id).await, Err(AppError::NotFound)));
        assert!(matches!(svc.delete(id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_counts_creates_minus_deletes() {
        let svc = service();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(svc.create(create_req(&format!("p{i}"), i, 100)).await.unwrap().product.id);
        }
        svc.delete(ids[1]).await.unwrap();
        svc.delete(ids[3]).await.unwrap();

        let listed: Vec<i64> = svc.list().await.unwrap().into_iter().map(|p| p.id).collect();

        assert_eq!(listed, vec![ids[0], ids[2], ids[4]]);
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let svc = service();

        assert_validation(
            svc.create(create_req("   ", 1, 100)).await.unwrap_err(),
            "Product name is required",
        );
        assert_validation(
            svc.create(create_req("A", -1, 100)).await.unwrap_err(),
            "Quantity cannot be negative",
        );
        assert_validation(
            svc.create(create_req("A", 1, -1)).await.unwrap_err(),
            "Price cannot be negative",
        );
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_invalid_fields_without_touching_row() {
        let svc = service();
        let original = svc.create(create_req("Widget", 10, 250)).await.unwrap().product;

        assert_validation(
            svc.update(original.id, update_req("Widget", -5, 250)).await.unwrap_err(),
            "Quantity cannot be negative",
        );
        assert_eq!(svc.get(original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn row_removed_mid_operation_is_not_found() {
        let svc = ProductService::new(Arc::new(VanishingStore));

        assert!(matches!(
            svc.update(5, update_req("Widget", 2, 100)).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(svc.delete(5).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn price_outside_column_range_is_rejected() {
        let svc = service();
        let too_precise = CreateProductRequest {
            name: "Widget".to_string(),
            quantity: 1,
            price: Decimal::new(2505, 3),
        };
        let too_large = CreateProductRequest {
            name: "Widget".to_string(),
            quantity: 1,
            price: Decimal::new(10_000_000_000, 0),
        };

        assert_validation(
            svc.create(too_precise).await.unwrap_err(),
            "Price cannot have more than 2 decimal places",
        );
        assert_validation(
            svc.create(too_large).await.unwrap_err(),
            "Price must be below 10000000000",
        );
        assert!(svc.list().await.unwrap().is_empty());

        let largest = svc.create(create_req("Widget", 1, 999_999_999_999)).await.unwrap();
        assert_eq!(largest.product.price, Decimal::new(999_999_999_999, 2));
    }

    #[tokio::test]
    async fn zero_quantity_and_price_are_allowed() {
        let svc = service();

        let created = svc.create(create_req("Freebie", 0, 0)).await.unwrap();

        assert_eq!(created.product.quantity, 0);
        assert!(created.product.price.is_zero());
    }

    #[tokio::test]
    async fn names_are_trimmed() {
        let svc = service();

        let created = svc.create(create_req("  Widget ", 1, 100)).await.unwrap();

        assert_eq!(created.product.name, "Widget");
    }
}
