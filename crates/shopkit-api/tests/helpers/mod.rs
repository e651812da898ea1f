//! Shared test fixtures: an app wired to in-memory doubles for both the
//! record store and the object store, so no database or bucket is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use shopkit_api::services::upload::ImageUploadService;
use shopkit_api::setup::routes::setup_routes;
use shopkit_api::state::AppState;
use shopkit_core::models::{NewProduct, Product, ProductPatch};
use shopkit_core::{AppError, Config, StorageBackend};
use shopkit_db::ProductStore;
use shopkit_storage::{ObjectStorage, PutReceipt, StorageError, StorageResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_BUCKET: &str = "product-images";
pub const TEST_CDN_BASE: &str = "https://cdn.test";

/// How the mock object store should misbehave, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFailure {
    BucketMissing,
    WriteFailed,
}

/// An object recorded by the mock store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// In-memory object store double. Records every successful put and resolves
/// deterministic URLs under [`TEST_CDN_BASE`].
#[derive(Default)]
pub struct MockStorage {
    failure: Option<StorageFailure>,
    puts: Mutex<Vec<StoredObject>>,
    attempts: AtomicUsize,
}

impl MockStorage {
    pub fn failing(failure: StorageFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    /// Successful writes only.
    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }

    /// All writes, including ones that were made to fail.
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn last_put(&self) -> Option<StoredObject> {
        self.puts.lock().unwrap().last().cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.puts.lock().unwrap().iter().map(|o| o.key.clone()).collect()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn put_new(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<PutReceipt> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        match self.failure {
            Some(StorageFailure::BucketMissing) => Err(StorageError::BucketNotFound(format!(
                "no such bucket: {}",
                TEST_BUCKET
            ))),
            Some(StorageFailure::WriteFailed) => Err(StorageError::WriteFailed(
                "connection reset by peer".to_string(),
            )),
            None => {
                let size_bytes = data.len() as u64;
                self.puts.lock().unwrap().push(StoredObject {
                    key: key.to_string(),
                    content_type: content_type.to_string(),
                    data,
                });
                Ok(PutReceipt {
                    key: key.to_string(),
                    size_bytes,
                })
            }
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", TEST_CDN_BASE, TEST_BUCKET, key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// In-memory product store double.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Mutex<Vec<Product>>,
    insert_count: AtomicUsize,
    fail_inserts: bool,
}

impl InMemoryProductStore {
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Default::default()
        }
    }

    pub fn insert_count(&self) -> usize {
        self.insert_count.load(Ordering::SeqCst)
    }

    pub fn all(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, new: NewProduct) -> Result<Product, AppError> {
        if self.fail_inserts {
            return Err(AppError::RecordWrite(
                "connection to database lost".to_string(),
            ));
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            price: new.price,
            stock_quantity: new.stock_quantity,
            category: new.category,
            image_url: new.image_url,
            is_active: true,
            created_at: Utc::now(),
        };

        self.insert_count.fetch_add(1, Ordering::SeqCst);
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, AppError> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = image_url;
        }
        if let Some(is_active) = patch.is_active {
            product.is_active = is_active;
        }

        Ok(product.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list(&self, only_active: bool) -> Result<Vec<Product>, AppError> {
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !only_active || p.is_active)
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        database_url: "postgresql://localhost/shopkit_test".to_string(),
        db_max_connections: 2,
        db_timeout_seconds: 5,
        storage_backend: StorageBackend::Local,
        storage_bucket: TEST_BUCKET.to_string(),
        s3_region: None,
        aws_region: None,
        s3_endpoint: None,
        local_storage_path: Some("/tmp/shopkit-test".to_string()),
        local_storage_base_url: Some("http://localhost:4000/storage".to_string()),
        max_file_size_bytes: 10 * 1024 * 1024,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub products: Arc<InMemoryProductStore>,
    pub storage: Arc<MockStorage>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(MockStorage::default(), InMemoryProductStore::default())
}

pub fn spawn_app_with_storage(storage: MockStorage) -> TestApp {
    spawn_app_with(storage, InMemoryProductStore::default())
}

pub fn spawn_app_with(storage: MockStorage, products: InMemoryProductStore) -> TestApp {
    let config = test_config();
    let storage = Arc::new(storage);
    let products = Arc::new(products);

    let uploads = ImageUploadService::new(storage.clone(), config.storage_bucket.clone());
    let state = Arc::new(AppState {
        config: config.clone(),
        products: products.clone(),
        uploads,
    });

    let router = setup_routes(&config, state).expect("router setup");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        products,
        storage,
    }
}
