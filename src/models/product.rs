use rust_decimal::Decimal;
use sqlx::FromRow;

/// A persisted product row. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// A product that has not been inserted yet, so it has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl NewProduct {
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
