use crate::traits::{ObjectStorage, PutReceipt, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation.
///
/// The bucket maps to a directory under `base_path`. That directory is a
/// provisioning concern and is deliberately not auto-created: writing into a
/// missing bucket directory fails with `BucketNotFound`, mirroring hosted
/// providers that require the bucket to be created out of band.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    bucket: String,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/shopkit/storage")
    /// * `bucket` - Bucket directory under the root (e.g., "product-images")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:4000/storage")
    pub fn new(base_path: impl Into<PathBuf>, bucket: String, base_url: String) -> Self {
        LocalStorage {
            base_path: base_path.into(),
            bucket,
            base_url,
        }
    }

    fn bucket_dir(&self) -> PathBuf {
        self.base_path.join(&self.bucket)
    }

    /// Convert storage key to filesystem path, rejecting traversal sequences
    /// that could escape the bucket directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.bucket_dir().join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn put_new(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<PutReceipt> {
        let path = self.key_to_path(key)?;
        let size = data.len() as u64;

        let bucket_dir = self.bucket_dir();
        match fs::try_exists(&bucket_dir).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(StorageError::BucketNotFound(format!(
                    "bucket \"{}\" not found ({} does not exist)",
                    self.bucket,
                    bucket_dir.display()
                )));
            }
            // A probe that errors (permissions, broken mount) is not a
            // provisioning problem; keep it distinct from BucketNotFound.
            Err(e) => return Err(StorageError::IoError(e)),
        }

        let start = std::time::Instant::now();

        // create_new rejects an existing file, so a key collision surfaces
        // instead of clobbering a stored object.
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(PutReceipt {
            key: key.to_string(),
            size_bytes: size,
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            key
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
