//! Product repository
//!
//! The `ProductStore` trait is the record-linker boundary: insert/update/select
//! on the `products` table, with `image_url` as one nullable column among the
//! rest. There is no transactional coupling with the object store; linking an
//! image URL to a product is best-effort relative to the stored object.

use async_trait::async_trait;
use shopkit_core::models::{NewProduct, Product, ProductPatch};
use shopkit_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock_quantity, category, \
     image_url, is_active, created_at";

/// Record-store operations the upload pipeline and product endpoints consume.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, new: NewProduct) -> Result<Product, AppError>;

    /// Apply a partial update. Returns `NotFound` if the id does not exist.
    async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError>;

    /// List products, optionally restricted to active ones (storefront view).
    async fn list(&self, only_active: bool) -> Result<Vec<Product>, AppError>;
}

/// Postgres-backed product store.
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
    async fn insert(&self, new: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products (name, description, price, stock_quantity, category, image_url, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE) \
             RETURNING {}",
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.price)
            .bind(new.stock_quantity)
            .bind(&new.category)
            .bind(&new.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, name = %new.name, "Product insert failed");
                AppError::RecordWrite(e.to_string())
            })?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, AppError> {
        // COALESCE leaves a column untouched when the bind is NULL; the nullable
        // columns need an explicit set-flag so they can also be cleared.
        let sql = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                price = COALESCE($5, price), \
                stock_quantity = COALESCE($6, stock_quantity), \
                category = CASE WHEN $7 THEN $8 ELSE category END, \
                image_url = CASE WHEN $9 THEN $10 ELSE image_url END, \
                is_active = COALESCE($11, is_active) \
             WHERE id = $1 \
             RETURNING {}",
            PRODUCT_COLUMNS
        );

        let result = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&patch.name)
            .bind(patch.description.is_some())
            .bind(patch.description.clone().flatten())
            .bind(patch.price)
            .bind(patch.stock_quantity)
            .bind(patch.category.is_some())
            .bind(patch.category.clone().flatten())
            .bind(patch.image_url.is_some())
            .bind(patch.image_url.clone().flatten())
            .bind(patch.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, product_id = %id, "Product update failed");
                AppError::RecordWrite(e.to_string())
            })?;

        result.ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::RecordWrite(e.to_string()))?;

        Ok(product)
    }

    async fn list(&self, only_active: bool) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            "SELECT {} FROM products WHERE ($1 = FALSE OR is_active) ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(only_active)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::RecordWrite(e.to_string()))?;

        Ok(products)
    }
}
