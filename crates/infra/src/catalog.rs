//! Query and mutation surface over a `ProductStore`.
//!
//! Every operation takes the store explicitly; there is no ambient session.
//! Nothing here retries: store failures surface as `CatalogError::Store`.
//!
//! Record lifecycle:
//!
//! ```text
//! Unpersisted --create--> Persisted --update*--> Persisted --delete--> Removed
//! ```

use thiserror::Error;
use tracing::{info, instrument};

use catalog_core::{DomainError, Entity, ProductId};
use catalog_products::{Category, PriceQuery, Product, ProductFilter};

use crate::store::{ProductStore, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing, mistyped or malformed input (maps to a 4xx response).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The record is not (or no longer) in the store.
    #[error("not found")]
    NotFound,

    /// The store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => CatalogError::Validation(msg),
            DomainError::NotFound => CatalogError::NotFound,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// -------------------------
// Queries
// -------------------------

#[instrument(skip(store), err)]
pub async fn all<S>(store: &S) -> CatalogResult<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    info!("Processing all products");
    Ok(store.select(&ProductFilter::All).await?)
}

#[instrument(skip(store), fields(product_id = %id), err)]
pub async fn find<S>(store: &S, id: ProductId) -> CatalogResult<Option<Product>>
where
    S: ProductStore + ?Sized,
{
    info!("Processing lookup for id {id} ...");
    Ok(store.get(id).await?)
}

#[instrument(skip(store), err)]
pub async fn find_by_name<S>(store: &S, name: &str) -> CatalogResult<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    info!("Processing name query for {name} ...");
    Ok(store.select(&ProductFilter::Name(name.to_string())).await?)
}

#[instrument(skip(store), err)]
pub async fn find_by_category<S>(store: &S, category: Category) -> CatalogResult<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    info!("Processing category query for {category} ...");
    Ok(store.select(&ProductFilter::Category(category)).await?)
}

#[instrument(skip(store), err)]
pub async fn find_by_availability<S>(store: &S, available: bool) -> CatalogResult<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    info!("Processing available query for {available} ...");
    Ok(store.select(&ProductFilter::Availability(available)).await?)
}

/// Accepts an exact price, or text that is trimmed of quotes/whitespace and parsed.
#[instrument(skip(store, price), err)]
pub async fn find_by_price<S>(store: &S, price: impl Into<PriceQuery>) -> CatalogResult<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    let price = price.into().resolve()?;
    info!("Processing price query for {price} ...");
    Ok(store.select(&ProductFilter::Price(price)).await?)
}

// -------------------------
// Mutations
// -------------------------

/// Insert `product` as a new record. Any pre-set id is discarded first so the
/// store always assigns a fresh one; the assigned id is written back.
#[instrument(skip(store, product), fields(name = %product.name), err)]
pub async fn create<S>(store: &S, product: &mut Product) -> CatalogResult<ProductId>
where
    S: ProductStore + ?Sized,
{
    info!("Creating {}", product.name);
    product.clear_id();
    let id = store.insert(product).await?;
    product.assign_id(id);
    Ok(id)
}

/// Persist the current field values of an already-created record.
#[instrument(skip(store, product), fields(name = %product.name), err)]
pub async fn update<S>(store: &S, product: &Product) -> CatalogResult<()>
where
    S: ProductStore + ?Sized,
{
    info!("Saving {}", product.name);
    let id = product
        .id()
        .ok_or_else(|| CatalogError::Validation("Update called with empty ID field".to_string()))?;
    if store.update(id, product).await? {
        Ok(())
    } else {
        Err(CatalogError::NotFound)
    }
}

/// Remove a record. Deleting a record that is already gone is `NotFound`.
#[instrument(skip(store, product), fields(name = %product.name), err)]
pub async fn delete<S>(store: &S, product: &Product) -> CatalogResult<()>
where
    S: ProductStore + ?Sized,
{
    info!("Deleting {}", product.name);
    let id = product
        .id()
        .ok_or_else(|| CatalogError::Validation("Delete called with empty ID field".to_string()))?;
    if store.delete(id).await? {
        Ok(())
    } else {
        Err(CatalogError::NotFound)
    }
}
