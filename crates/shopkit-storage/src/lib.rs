//! Shopkit Storage Library
//!
//! Object-store gateway for product images: the `ObjectStorage` trait, the
//! storage-key deriver, and backends for S3-compatible providers and the local
//! filesystem.
//!
//! # Storage keys
//!
//! Keys are derived once per upload as `{unix_millis}-{random_token}.{ext}`
//! (see [`keys::derive_object_key`]) and are never reused, so writes never need
//! to overwrite. All backends reject overwriting an existing key.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::derive_object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use shopkit_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStorage, PutReceipt, StorageError, StorageResult};
