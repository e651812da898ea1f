//! Shopkit Core Library
//!
//! Shared domain types for the shopkit services: product models, the unified
//! `AppError` type with its HTTP metadata, and environment-driven configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
