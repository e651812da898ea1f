//! OpenAPI documentation definition.

use crate::error::ErrorResponse;
use crate::handlers;
use shopkit_core::models::Product;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::upload::upload_image,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
    ),
    components(schemas(
        Product,
        ErrorResponse,
        handlers::health::HealthResponse,
        handlers::upload::UploadResponse,
        handlers::products::CreateProductResponse,
        handlers::products::ProductListResponse,
        handlers::products::UpdateProductRequest,
    )),
    tags(
        (name = "uploads", description = "Standalone image uploads"),
        (name = "products", description = "Product catalog"),
        (name = "system", description = "Health and diagnostics")
    ),
    info(
        title = "Shopkit API",
        description = "Product catalog with image upload pipeline"
    )
)]
pub struct ApiDoc;
