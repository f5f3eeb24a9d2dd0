// src/client/view.rs

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::ProductClient;
use crate::dtos::product::{field_problem, CreateProductRequest, ProductResponse, UpdateProductRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Name, ascending, ignoring case.
    #[default]
    Name,
    /// Quantity, largest first.
    Quantity,
    /// Price, highest first.
    Price,
}

impl SortBy {
    fn compare(self, a: &ProductResponse, b: &ProductResponse) -> Ordering {
        match self {
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortBy::Quantity => b.quantity.cmp(&a.quantity),
            SortBy::Price => b.price.cmp(&a.price),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "quantity" => Ok(SortBy::Quantity),
            "price" => Ok(SortBy::Price),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// The create/edit form. The same fields serve both operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<&ProductResponse> for ProductForm {
    fn from(product: &ProductResponse) -> Self {
        Self {
            name: product.name.clone(),
            quantity: product.quantity,
            price: product.price,
        }
    }
}

/// `quantity * price`, or `None` if it does not fit in a `Decimal`.
pub fn line_value(product: &ProductResponse) -> Option<Decimal> {
    Decimal::from(product.quantity).checked_mul(product.price)
}

#[derive(Debug, Default)]
pub struct ProductView {
    products: Vec<ProductResponse>,
    pub search: String,
    pub sort_by: SortBy,
    pub form: ProductForm,
    editing_id: Option<i64>,
    error: Option<String>,
}

impl ProductView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[ProductResponse] {
        &self.products
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    /// Products whose name contains the search term (any case), in the
    /// selected order.
    pub fn visible(&self) -> Vec<&ProductResponse> {
        let needle = self.search.to_lowercase();
        let mut shown: Vec<_> = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();
        shown.sort_by(|a, b| self.sort_by.compare(a, b));
        shown
    }

    /// Value of the whole stock, ignoring the search filter. `None` on
    /// overflow.
    pub fn total_value(&self) -> Option<Decimal> {
        self.products
            .iter()
            .try_fold(Decimal::ZERO, |total, p| total.checked_add(line_value(p)?))
    }

    pub fn start_edit(&mut self, product: &ProductResponse) {
        self.form = ProductForm::from(product);
        self.editing_id = Some(product.id);
        self.error = None;
    }

    pub fn cancel_edit(&mut self) {
        self.form = ProductForm::default();
        self.editing_id = None;
        self.error = None;
    }

    /// Reloads the list. On failure the previous list stays.
    pub async fn load(&mut self, client: &ProductClient) {
        self.error = None;
        match client.get_all_products().await {
            Ok(products) => self.products = products,
            Err(_) => self.error = Some("Failed to load products. Please try again.".to_string()),
        }
    }

    /// Validates the form, then creates or updates depending on whether an
    /// edit is in progress. The form is cleared only on success.
    pub async fn submit(&mut self, client: &ProductClient) {
        if let Some(problem) = field_problem(&self.form.name, self.form.quantity, self.form.price) {
            self.error = Some(problem.to_string());
            return;
        }
        self.error = None;

        let result = match self.editing_id {
            Some(id) => {
                let req = UpdateProductRequest {
                    name: self.form.name.clone(),
                    quantity: self.form.quantity,
                    price: self.form.price,
                };
                client.update_product(id, &req).await.map_err(|_| "update")
            }
            None => {
                let req = CreateProductRequest {
                    name: self.form.name.clone(),
                    quantity: self.form.quantity,
                    price: self.form.price,
                };
                client.create_product(&req).await.map_err(|_| "create")
            }
        };

        match result {
            Ok(_) => {
                self.form = ProductForm::default();
                self.editing_id = None;
                self.load(client).await;
            }
            Err(op) => self.error = Some(format!("Failed to {op} product. Please try again.")),
        }
    }

    pub async fn delete(&mut self, client: &ProductClient, id: i64) {
        self.error = None;
        match client.delete_product(id).await {
            Ok(()) => self.load(client).await,
            Err(_) => self.error = Some("Failed to delete product. Please try again.".to_string()),
        }
    }
}
