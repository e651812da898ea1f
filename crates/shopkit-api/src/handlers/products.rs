//! Product endpoints: create (multipart, with optional image), list, get, update.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::multipart::{read_product_form, ProductForm};
use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use shopkit_core::models::{NewProduct, Product, ProductPatch};
use shopkit_core::AppError;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: name, price, and stock are required";

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub success: bool,
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// Validate the raw form fields. Runs before any storage I/O so a bad request
/// never leaves an orphaned object behind.
fn validate_product_form(form: &ProductForm) -> Result<NewProduct, AppError> {
    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let price = form
        .price
        .as_deref()
        .and_then(|s| Decimal::from_str(s.trim()).ok());

    let stock = form
        .stock
        .as_deref()
        .and_then(|s| s.trim().parse::<i32>().ok());

    let (Some(name), Some(price), Some(stock)) = (name, price, stock) else {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    };

    // Empty optional strings are stored as NULL, not "".
    let non_empty = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(NewProduct {
        name: name.to_string(),
        description: non_empty(&form.description),
        price,
        stock_quantity: stock,
        category: non_empty(&form.category),
        image_url: None,
    })
}

/// Create a product, optionally storing an image first.
///
/// The image write is best-effort: if it fails the product is still created
/// with a null `image_url`. Only validation and the record insert can fail the
/// request.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Missing or unparsable required fields", body = ErrorResponse),
        (status = 500, description = "Record insert failed", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<CreateProductResponse>, HttpAppError> {
    let form = read_product_form(multipart).await?;
    let mut new_product = validate_product_form(&form)?;

    if let Some(image) = form.image {
        new_product.image_url = state
            .uploads
            .store_image_best_effort(image)
            .await
            .map(|stored| stored.public_url);
    }

    let product = state.products.insert(new_product).await?;

    Ok(Json(CreateProductResponse {
        success: true,
        product,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    /// When true, only active products are returned.
    pub active: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    params(
        ("active" = Option<bool>, Query, description = "Only return active products")
    ),
    responses(
        (status = 200, description = "Products, newest first", body = ProductListResponse)
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ProductListResponse>, HttpAppError> {
    let products = state
        .products
        .list(query.active.unwrap_or(false))
        .await?;

    Ok(Json(ProductListResponse { products }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Unknown product id", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, HttpAppError> {
    let product = state
        .products
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

    Ok(Json(product))
}

/// Distinguishes an absent JSON field (leave the column alone) from an
/// explicit `null` (clear the column).
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            name: req.name,
            description: req.description,
            price: req.price,
            stock_quantity: req.stock_quantity,
            category: req.category,
            image_url: req.image_url,
            is_active: req.is_active,
        }
    }
}

/// Partially update a product.
///
/// Replacing `image_url` does not delete the previously stored object; stale
/// images are simply orphaned in the bucket.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "The updated product", body = Product),
        (status = 400, description = "Empty or invalid request body", body = ErrorResponse),
        (status = 404, description = "Unknown product id", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<Product>, HttpAppError> {
    let patch = ProductPatch::from(request);

    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()).into());
    }

    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".to_string()).into());
        }
    }

    let product = state.products.update(id, patch).await?;

    Ok(Json(product))
}
