//! Infrastructure layer: product storage, the catalog query/mutation surface,
//! and configuration.

pub mod catalog;
pub mod config;
pub mod store;

pub use catalog::{CatalogError, CatalogResult};
pub use config::{CatalogConfig, ConfigError};
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
