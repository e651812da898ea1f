//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    routing::post,
    Json, Router,
};
use shopkit_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Headroom on top of the raw file size for multipart framing and the text
/// fields that accompany an image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = config.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/upload", post(handlers::upload::upload_image))
        .route(
            "/api/products",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/api/products/{id}",
            get(handlers::products::get_product).put(handlers::products::update_product),
        )
        .route("/api/openapi.json", get(serve_openapi))
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        let origins =
            origins.map_err(|e| anyhow::anyhow!("Invalid CORS origin in CORS_ORIGINS: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
