//! Product entity model and DTOs.

use cashier_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A product row from the `products` table.
///
/// `price` is NUMERIC(12,2): exact decimal, never floating point.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub barcode_id: String,
    pub image: String,
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Insert DTO for a new product. `image` is the generated stored filename,
/// not the client-supplied upload name.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub barcode_id: String,
    pub image: String,
    pub title: String,
    pub price: Decimal,
    pub description: String,
}

/// Partial-update set for a product. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub image: Option<String>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

impl ProductChanges {
    /// True when no field is set and the update would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }
}
