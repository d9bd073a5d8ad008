use async_trait::async_trait;
use thiserror::Error;

use crate::models::TaxData;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Per-year persistence of declaration data.
///
/// Every year is an independent partition: saving or clearing one year never
/// affects another.
#[async_trait]
pub trait TaxDataStore: Send + Sync {
    /// Stored aggregate for `year`, or `None` when nothing was saved yet.
    async fn load(&self, year: i32) -> Result<Option<TaxData>, StoreError>;

    /// Replace whatever is stored for `year`.
    async fn save(&self, year: i32, data: &TaxData) -> Result<(), StoreError>;

    /// Forget `year`. Clearing a year with no data is not an error.
    async fn clear(&self, year: i32) -> Result<(), StoreError>;
}

/// Key under which a year's document is stored in key-value backends.
pub fn storage_key(year: i32) -> String {
    format!("steuererklaerung-data-{year}")
}
