//! Product storage boundary.
//!
//! The catalog never talks to a database directly; every query and mutation
//! goes through a `ProductStore` handle passed in by the caller.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::{Product, ProductFilter};

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The store rejected the write (unique/check/length constraint).
    #[error("constraint violation in {operation}: {message}")]
    Constraint { operation: &'static str, message: String },

    /// A stored row could not be mapped back to a product.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Durable product storage.
///
/// Implementations return records in ascending id order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn select(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// Insert a new row and return the identifier the store assigned.
    /// Any id already set on `product` is ignored.
    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError>;

    /// Overwrite the row `id`. Returns `false` when no such row exists.
    async fn update(&self, id: ProductId, product: &Product) -> Result<bool, StoreError>;

    /// Remove the row `id`. Returns `false` when no such row exists.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Remove every row (test setup / reset).
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id).await
    }

    async fn select(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        (**self).select(filter).await
    }

    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError> {
        (**self).insert(product).await
    }

    async fn update(&self, id: ProductId, product: &Product) -> Result<bool, StoreError> {
        (**self).update(id, product).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}
