use std::sync::Arc;

use thiserror::Error;

use catalog_infra::{
    CatalogConfig, ConfigError, InMemoryProductStore, PostgresProductStore, ProductStore, StoreError,
};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("product store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Shared handle passed to every handler. Holds the store explicitly; handlers
/// never reach for ambient state.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ProductStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()))
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }
}

/// Select the store from configuration: Postgres when `USE_PERSISTENT_STORES`
/// is set, in-memory otherwise.
pub async fn build_services(config: &CatalogConfig) -> Result<AppServices, BootstrapError> {
    if !config.use_persistent_stores {
        tracing::info!("using in-memory product store");
        return Ok(AppServices::in_memory());
    }

    let database_url = config
        .database_url
        .as_deref()
        .ok_or(ConfigError::Missing("DATABASE_URL"))?;
    let store = PostgresProductStore::connect(database_url, config.database_max_connections).await?;
    if config.run_migrations {
        store.migrate().await?;
    }
    tracing::info!(
        max_connections = config.database_max_connections,
        "using postgres product store"
    );
    Ok(AppServices::new(Arc::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_wires_in_memory_store() {
        let services = build_services(&CatalogConfig::default()).await.unwrap();
        let all = catalog_infra::catalog::all(services.store()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn persistent_without_url_is_a_config_error() {
        let config = CatalogConfig {
            use_persistent_stores: true,
            ..CatalogConfig::default()
        };
        let err = build_services(&config).await.err().unwrap();
        assert!(matches!(err, BootstrapError::Config(ConfigError::Missing("DATABASE_URL"))));
    }
}
