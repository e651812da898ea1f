//! Shopkit Database Library
//!
//! Record-store access for shopkit: the `ProductStore` trait and its Postgres
//! implementation. Handlers depend on the trait so tests can substitute an
//! in-memory double.

pub mod products;

pub use products::{PgProductStore, ProductStore};
