use async_trait::async_trait;
use tax_core::{StoreConfig, StoreError, StoreFactory, TaxDataStore};
use tracing::info;

use crate::repository::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`tax_core::StoreRegistry`] to make the `"sqlite"`
/// backend available:
///
/// ```rust,no_run
/// use tax_core::StoreRegistry;
/// use tax_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"steuer.db"`. The file is created if it
    ///   does not exist.
    /// * `":memory:"` for an ephemeral database (useful for tests).
    /// * A sqlx URL such as `"sqlite:steuer.db?mode=rwc"`.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn TaxDataStore>, StoreError> {
        let store = SqliteStore::open(&config.connection_string).await?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{e:#}")))?;

        info!(database = %config.connection_string, "sqlite store ready");
        Ok(Box::new(store))
    }
}
