//! Application state shared by all handlers.
//!
//! Both external boundaries sit behind trait objects (`ProductStore` for the
//! record store, the object store behind `ImageUploadService`) so integration
//! tests can substitute in-memory doubles without a database or a bucket.

use crate::services::upload::ImageUploadService;
use shopkit_core::Config;
use shopkit_db::ProductStore;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub products: Arc<dyn ProductStore>,
    pub uploads: ImageUploadService,
}
