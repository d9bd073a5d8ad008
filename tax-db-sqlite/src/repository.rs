use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tax_core::{StoreError, TaxData, TaxDataStore};
use tracing::debug;

const IN_MEMORY: &str = ":memory:";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `connection_string`.
    ///
    /// Accepts a bare file path (created if missing), `":memory:"`, or a
    /// sqlx-style `sqlite:` URL. In-memory databases are held on a single
    /// connection that is never recycled, so their contents live as long as
    /// the store.
    pub async fn open(connection_string: &str) -> Result<Self, StoreError> {
        let in_memory =
            connection_string == IN_MEMORY || connection_string.contains(":memory:");

        let options = if connection_string.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(connection_string)
                .map_err(|e| StoreError::Configuration(e.to_string()))?
        } else if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::Configuration(e.to_string()))?
        } else {
            SqliteConnectOptions::new().filename(connection_string)
        };
        let options = options.create_if_missing(true);

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(format!("{connection_string}: {e}")))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Years that currently hold a document, newest first.
    pub async fn stored_years(&self) -> Result<Vec<i32>, StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT tax_year FROM tax_declarations ORDER BY tax_year DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// When the document for `year` was last saved.
    pub async fn last_updated(&self, year: i32) -> Result<Option<DateTime<Utc>>, StoreError> {
        let stamp: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM tax_declarations WHERE tax_year = ?")
                .bind(year)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        stamp.as_deref().map(parse_datetime).transpose()
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Database(format!("Failed to parse datetime '{s}': {e}")))
}

#[async_trait]
impl TaxDataStore for SqliteStore {
    async fn load(&self, year: i32) -> Result<Option<TaxData>, StoreError> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT data FROM tax_declarations WHERE tax_year = ?")
                .bind(year)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, year: i32, data: &TaxData) -> Result<(), StoreError> {
        let json = serde_json::to_string(data)?;
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query(
            "INSERT INTO tax_declarations (tax_year, data, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(tax_year) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at",
        )
        .bind(year)
        .bind(&json)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(year, bytes = json.len(), "declaration saved");
        Ok(())
    }

    async fn clear(&self, year: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tax_declarations WHERE tax_year = ?")
            .bind(year)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(year, removed = result.rows_affected(), "declaration cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{Expenses, Income, PersonalData};

    use super::*;

    async fn setup_test_db() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let store = SqliteStore::new_with_pool(pool).await;
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    fn sample() -> TaxData {
        TaxData::empty()
            .merge_section(
                PersonalData {
                    first_name: Some("Jonas".to_string()),
                    last_name: Some("Becker".to_string()),
                    ..Default::default()
                }
                .into(),
            )
            .merge_section(
                Income {
                    gross_salary: Some(dec!(43250.50)),
                    income_tax: Some(dec!(6120)),
                    solidarity_surcharge: None,
                }
                .into(),
            )
            .merge_section(
                Expenses {
                    commute_days: Some(180),
                    commute_distance: Some(dec!(22.5)),
                    ..Default::default()
                }
                .into(),
            )
    }

    // =========================================================================
    // load / save / clear
    // =========================================================================

    #[tokio::test]
    async fn test_load_missing_year_is_none() {
        let store = setup_test_db().await;

        assert_eq!(store.load(2024).await, Ok(None));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = setup_test_db().await;

        store.save(2024, &sample()).await.unwrap();

        assert_eq!(store.load(2024).await, Ok(Some(sample())));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_document() {
        let store = setup_test_db().await;
        store.save(2023, &sample()).await.unwrap();

        store.save(2023, &TaxData::empty()).await.unwrap();

        assert_eq!(store.load(2023).await, Ok(Some(TaxData::empty())));
        assert_eq!(store.stored_years().await, Ok(vec![2023]));
    }

    #[tokio::test]
    async fn test_clear_only_affects_one_year() {
        let store = setup_test_db().await;
        store.save(2022, &sample()).await.unwrap();
        store.save(2024, &sample()).await.unwrap();

        store.clear(2024).await.unwrap();

        assert_eq!(store.load(2024).await, Ok(None));
        assert_eq!(store.load(2022).await, Ok(Some(sample())));
    }

    #[tokio::test]
    async fn test_clear_missing_year_is_ok() {
        let store = setup_test_db().await;

        assert_eq!(store.clear(2022).await, Ok(()));
    }

    #[tokio::test]
    async fn test_stored_years_newest_first() {
        let store = setup_test_db().await;
        for year in [2022, 2024, 2023] {
            store.save(year, &TaxData::empty()).await.unwrap();
        }

        assert_eq!(store.stored_years().await, Ok(vec![2024, 2023, 2022]));
    }

    #[tokio::test]
    async fn test_last_updated_tracks_saves() {
        let store = setup_test_db().await;
        assert_eq!(store.last_updated(2024).await, Ok(None));

        let before = Utc::now() - chrono::Duration::seconds(2);
        store.save(2024, &sample()).await.unwrap();

        let stamp = store.last_updated(2024).await.unwrap().unwrap();
        assert!(stamp >= before, "{stamp} should not predate the save");
    }

    #[tokio::test]
    async fn test_corrupt_document_is_a_serialization_error() {
        let store = setup_test_db().await;
        sqlx::query(
            "INSERT INTO tax_declarations (tax_year, data, updated_at)
             VALUES (2024, 'not json', '2024-01-01 00:00:00')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let result = store.load(2024).await;

        assert!(matches!(result, Err(StoreError::Serialization(_))), "{result:?}");
    }

    // =========================================================================
    // open
    // =========================================================================

    #[tokio::test]
    async fn test_open_in_memory_keeps_data_between_calls() {
        let store = SqliteStore::open(":memory:").await.unwrap();
        store.run_migrations().await.unwrap();

        store.save(2024, &sample()).await.unwrap();

        assert_eq!(store.load(2024).await, Ok(Some(sample())));
    }

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steuer.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::open(path).await.unwrap();
            store.run_migrations().await.unwrap();
            store.save(2023, &sample()).await.unwrap();
            store.pool().close().await;
        }

        let reopened = SqliteStore::open(path).await.unwrap();
        reopened.run_migrations().await.unwrap();

        assert_eq!(reopened.load(2023).await, Ok(Some(sample())));
    }

    #[tokio::test]
    async fn test_open_unreachable_path_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("steuer.db");

        let result = SqliteStore::open(path.to_str().unwrap()).await;

        assert!(matches!(result, Err(StoreError::Connection(_))));
    }
}
