use std::collections::BTreeMap;

use async_trait::async_trait;

use super::repository::{StoreError, TaxDataStore};

/// Which storage backend to open, and how.
///
/// `backend` selects a registered [`StoreFactory`] by name;
/// `connection_string` is handed to that factory as is.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `steuer.db`, `:memory:`             |
/// | `memory`   | ignored                             |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "steuer.db".to_string(),
        }
    }
}

/// Opens one kind of [`TaxDataStore`].
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Lowercase name used in [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn TaxDataStore>, StoreError>;
}

/// The backends a binary was built with.
#[derive(Default)]
pub struct StoreRegistry {
    factories: BTreeMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`, replacing any earlier one with the same name.
    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Open a store with the factory named by `config.backend`.
    ///
    /// An unknown name is a [`StoreError::Configuration`]; factory errors are
    /// returned unchanged.
    pub async fn create(&self, config: &StoreConfig) -> Result<Box<dyn TaxDataStore>, StoreError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(StoreError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        factory.create(config).await
    }
}
