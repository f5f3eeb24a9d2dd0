// src/dtos/product.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::product::{NewProduct, Product};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Full replacement of a product's fields. The id comes from the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Upper bound (exclusive) and decimal places of the `products.price` column.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);
pub const PRICE_SCALE: u32 = 2;

/// First write-side rule the given fields break, if any. Shared by the
/// service and the client form so both report the same messages.
pub fn field_problem(name: &str, quantity: i32, price: Decimal) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("Product name is required")
    } else if quantity < 0 {
        Some("Quantity cannot be negative")
    } else if price < Decimal::ZERO {
        Some("Price cannot be negative")
    } else if price >= PRICE_LIMIT {
        Some("Price must be below 10000000000")
    } else if price.normalize().scale() > PRICE_SCALE {
        Some("Price cannot have more than 2 decimal places")
    } else {
        None
    }
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            price: product.price,
        }
    }
}

// Convert from Create DTO to an unsaved Model; the store assigns the id
impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            quantity: req.quantity,
            price: req.price,
        }
    }
}
