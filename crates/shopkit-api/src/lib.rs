//! Shopkit API Library
//!
//! This crate provides the HTTP API handlers and application setup for the
//! product image upload pipeline: standalone uploads, product creation with an
//! optional best-effort image, and product reads/updates.

mod api_doc;

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::{ErrorResponse, HttpAppError};
