//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs, so integration
//! tests can assemble the same router with substituted state.

pub mod database;
pub mod routes;
pub mod server;

use crate::services::upload::ImageUploadService;
use crate::state::AppState;
use anyhow::Result;
use shopkit_core::Config;
use shopkit_db::{PgProductStore, ProductStore};
use std::sync::Arc;

/// Initialize the entire application: telemetry, database, storage, routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config);

    tracing::info!(
        environment = %config.environment,
        storage_backend = %config.storage_backend,
        bucket = %config.storage_bucket,
        "Configuration loaded"
    );

    let pool = database::setup_database(&config).await?;

    let storage = shopkit_storage::create_storage(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage backend: {}", e))?;
    let uploads = ImageUploadService::new(storage, config.storage_bucket.clone());

    let products: Arc<dyn ProductStore> = Arc::new(PgProductStore::new(pool));

    let state = Arc::new(AppState {
        config: config.clone(),
        products,
        uploads,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
