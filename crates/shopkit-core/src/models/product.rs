//! Product domain model
//!
//! Products exist independently of images: `image_url` is nullable, and replacing
//! it never deletes the previously stored object (orphans are left in storage).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A product row as persisted in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    /// Public URL of the product image, if one was successfully uploaded.
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update for an existing product.
///
/// Outer `None` leaves the column untouched. For the nullable columns the inner
/// `Option` distinguishes "set to value" from "clear".
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub category: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch {
            image_url: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_product_serializes_null_image_url() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Chair".to_string(),
            description: None,
            price: Decimal::new(255, 1),
            stock_quantity: 3,
            category: None,
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&product).expect("serialize");
        assert!(json.get("image_url").expect("field present").is_null());
        assert_eq!(json.get("stock_quantity").and_then(|v| v.as_i64()), Some(3));
    }
}
