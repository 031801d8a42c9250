use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::{Entity, ProductId};
use catalog_products::{Product, ProductFilter, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};

use super::{ProductStore, StoreError};

#[derive(Debug)]
struct Rows {
    by_id: BTreeMap<ProductId, Product>,
    next_id: i64,
}

/// In-memory product store for tests/dev.
///
/// Identifiers come from a monotonically increasing counter and are never
/// reused, even after `clear`. Writes are checked against the same column
/// constraints as the Postgres schema.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Rows>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let rows = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.by_id.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// `VARCHAR(100)`, `VARCHAR(250)` and `CHECK (price >= 0)`.
fn check_columns(operation: &'static str, product: &Product) -> Result<(), StoreError> {
    let too_long = |column: &str, max_len: usize| StoreError::Constraint {
        operation,
        message: format!("value too long for column {column} (max {max_len} characters)"),
    };
    if product.name.chars().count() > NAME_MAX_LEN {
        return Err(too_long("name", NAME_MAX_LEN));
    }
    if product.description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(too_long("description", DESCRIPTION_MAX_LEN));
    }
    if product.price.is_negative() {
        return Err(StoreError::Constraint {
            operation,
            message: format!("price {} violates check price >= 0", product.price),
        });
    }
    Ok(())
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let rows = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn select(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let rows = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows
            .by_id
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError> {
        check_columns("insert", product)?;
        let mut rows = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = ProductId::new(rows.next_id);
        rows.next_id += 1;

        let mut stored = product.clone();
        stored.assign_id(id);
        rows.by_id.insert(id, stored);
        Ok(id)
    }

    async fn update(&self, id: ProductId, product: &Product) -> Result<bool, StoreError> {
        check_columns("update", product)?;
        let mut rows = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match rows.by_id.get_mut(&id) {
            Some(slot) => {
                let mut stored = product.clone();
                stored.assign_id(id);
                *slot = stored;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut rows = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.by_id.remove(&id).is_some())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        rows.by_id.clear();
        Ok(())
    }
}
