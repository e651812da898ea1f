//! Image upload service
//!
//! Orchestrates the upload pipeline: derive a fresh storage key, write the
//! bytes through the object-store gateway, and resolve the public URL. The
//! service exists in two modes:
//!
//! - [`ImageUploadService::store_image`]: failures are terminal (standalone
//!   upload endpoint).
//! - [`ImageUploadService::store_image_best_effort`]: failures are logged and
//!   swallowed so the caller can proceed without an image (product creation).

use crate::utils::multipart::FilePart;
use shopkit_core::{AppError, StorageBackend};
use shopkit_storage::{derive_object_key, ObjectStorage, StorageError};
use std::sync::Arc;

/// Result of a successful image upload.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub storage_key: String,
    pub public_url: String,
}

#[derive(Clone)]
pub struct ImageUploadService {
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
}

impl ImageUploadService {
    pub fn new(storage: Arc<dyn ObjectStorage>, bucket: String) -> Self {
        Self { storage, bucket }
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.storage.backend_type()
    }

    /// Store an image and resolve its public URL. Any failure is returned.
    pub async fn store_image(&self, file: FilePart) -> Result<StoredImage, AppError> {
        let key = derive_object_key(&file.filename);
        let size_bytes = file.data.len();

        let receipt = self
            .storage
            .put_new(&key, file.data, &file.content_type)
            .await
            .map_err(|e| self.classify_storage_error(e))?;

        let public_url = self.storage.public_url(&receipt.key);

        tracing::info!(
            key = %receipt.key,
            size_bytes,
            content_type = %file.content_type,
            url = %public_url,
            "Image stored"
        );

        Ok(StoredImage {
            storage_key: receipt.key,
            public_url,
        })
    }

    /// Store an image, but never fail the caller: a storage error is logged at
    /// warn level and `None` is returned.
    pub async fn store_image_best_effort(&self, file: FilePart) -> Option<StoredImage> {
        let filename = file.filename.clone();
        match self.store_image(file).await {
            Ok(stored) => Some(stored),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    filename = %filename,
                    "Image upload failed, continuing without image"
                );
                None
            }
        }
    }

    /// Map a typed storage error onto the application error taxonomy.
    ///
    /// A missing bucket gets an operator-actionable message naming the bucket;
    /// the raw provider diagnostic goes to the log, not the client.
    fn classify_storage_error(&self, err: StorageError) -> AppError {
        match err {
            StorageError::BucketNotFound(detail) => {
                tracing::warn!(bucket = %self.bucket, detail = %detail, "Storage bucket missing");
                AppError::BucketNotConfigured(format!(
                    "Storage bucket \"{}\" not found. Please ensure you created it in your storage provider.",
                    self.bucket
                ))
            }
            StorageError::AlreadyExists(key) => {
                AppError::StorageWrite(format!("object \"{}\" already exists", key))
            }
            StorageError::WriteFailed(msg) => AppError::StorageWrite(msg),
            StorageError::InvalidKey(msg) => {
                AppError::StorageWrite(format!("invalid storage key: {}", msg))
            }
            StorageError::ConfigError(msg) => AppError::Unexpected(msg),
            StorageError::IoError(e) => AppError::StorageWrite(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopkit_core::ErrorMetadata;
    use shopkit_storage::{PutReceipt, StorageResult};
    use std::sync::Mutex;

    struct StubStorage {
        fail_bucket_missing: bool,
        puts: Mutex<Vec<String>>,
    }

    impl StubStorage {
        fn new(fail_bucket_missing: bool) -> Self {
            Self {
                fail_bucket_missing,
                puts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStorage for StubStorage {
        async fn put_new(
            &self,
            key: &str,
            data: Vec<u8>,
            _content_type: &str,
        ) -> StorageResult<PutReceipt> {
            if self.fail_bucket_missing {
                return Err(StorageError::BucketNotFound(
                    "no such bucket: product-images".to_string(),
                ));
            }
            self.puts.lock().unwrap().push(key.to_string());
            Ok(PutReceipt {
                key: key.to_string(),
                size_bytes: data.len() as u64,
            })
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://cdn.example.com/product-images/{}", key)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn png_part() -> FilePart {
        FilePart {
            filename: "chair.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0u8; 16],
        }
    }

    fn service(storage: StubStorage) -> ImageUploadService {
        ImageUploadService::new(Arc::new(storage), "product-images".to_string())
    }

    #[tokio::test]
    async fn test_store_image_derives_key_and_resolves_url() {
        let service = service(StubStorage::new(false));

        let stored = service.store_image(png_part()).await.expect("stored");

        assert!(stored.storage_key.ends_with(".png"));
        assert_eq!(
            stored.public_url,
            format!("https://cdn.example.com/product-images/{}", stored.storage_key)
        );
    }

    #[tokio::test]
    async fn test_missing_bucket_becomes_operator_message() {
        let service = service(StubStorage::new(true));

        let err = service.store_image(png_part()).await.expect_err("fails");

        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_type(), "BucketNotConfigured");
        assert!(err.client_message().contains("product-images"));
        assert!(err.client_message().contains("not found"));
    }

    #[tokio::test]
    async fn test_best_effort_swallows_storage_failure() {
        let service = service(StubStorage::new(true));

        assert!(service.store_image_best_effort(png_part()).await.is_none());
    }

    #[tokio::test]
    async fn test_best_effort_returns_url_on_success() {
        let service = service(StubStorage::new(false));

        let stored = service
            .store_image_best_effort(png_part())
            .await
            .expect("stored");
        assert!(stored.public_url.contains(&stored.storage_key));
    }
}
