//! Storage abstraction trait
//!
//! Defines the `ObjectStorage` trait all storage backends implement, and the
//! `StorageError` taxonomy they classify raw provider errors into. The
//! classification (including any matching on provider error prose) happens
//! exactly once, inside each backend; callers only ever see typed variants.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The destination bucket/container does not exist. The message names the
    /// bucket and echoes the provider diagnostic.
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// The key is already taken. Writes never overwrite; a collision must
    /// surface instead of clobbering existing data.
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    /// Any other write failure, including a write that reported success but
    /// returned no confirmation data.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Confirmation returned by a successful write.
#[derive(Debug, Clone)]
pub struct PutReceipt {
    pub key: String,
    pub size_bytes: u64,
}

/// Object-store gateway trait
///
/// Backends provide durable binary storage keyed by opaque string paths under a
/// single logical bucket, plus stable public URL resolution for stored keys.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `data` under `key` without overwriting.
    ///
    /// Keys are unique by construction (timestamp + random token), so a
    /// collision is a fault and comes back as `AlreadyExists` rather than a
    /// silent overwrite.
    async fn put_new(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<PutReceipt>;

    /// Resolve the stable, publicly fetchable URL for a stored key.
    ///
    /// Pure string derivation; performs no network round-trip.
    fn public_url(&self, key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
