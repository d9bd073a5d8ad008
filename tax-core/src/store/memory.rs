use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{StoreError, TaxDataStore, storage_key};
use crate::models::TaxData;

/// Process-local store; documents live as JSON strings keyed like the
/// persistent backends, so serialization problems surface here too.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of years currently holding data.
    pub fn len(&self) -> usize {
        self.documents.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.documents
            .lock()
            .map_err(|e| StoreError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl TaxDataStore for MemoryStore {
    async fn load(&self, year: i32) -> Result<Option<TaxData>, StoreError> {
        let docs = self.lock()?;
        docs.get(&storage_key(year))
            .map(|json| serde_json::from_str(json).map_err(StoreError::from))
            .transpose()
    }

    async fn save(&self, year: i32, data: &TaxData) -> Result<(), StoreError> {
        let json = serde_json::to_string(data)?;
        self.lock()?.insert(storage_key(year), json);
        Ok(())
    }

    async fn clear(&self, year: i32) -> Result<(), StoreError> {
        self.lock()?.remove(&storage_key(year));
        Ok(())
    }
}

/// [`StoreFactory`] for the `"memory"` backend. The connection string is
/// ignored.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Box<dyn TaxDataStore>, StoreError> {
        Ok(Box::new(MemoryStore::new()))
    }
}
