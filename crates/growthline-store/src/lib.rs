//! Growthline Storage Layer
//!
//! Implements the MeasurementStore trait on top of SQLite.
//!
//! # Architecture
//!
//! - A `kv_store` table holding JSON documents by key
//! - The whole measurement history lives under [`STORAGE_KEY`] as
//!   `{"weight": [...], "height": [...]}`
//! - [`load_or_default`] recovers from missing or unreadable data by falling
//!   back to the bundled dataset
//!
//! # Examples
//!
//! ```no_run
//! use growthline_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for load/save
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use growthline_domain::traits::MeasurementStore;
use growthline_domain::SeriesPair;
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fixed key the measurement history is stored under
pub const STORAGE_KEY: &str = "growth_data";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored document could not be parsed
    #[error("Malformed stored data: {0}")]
    MalformedData(serde_json::Error),

    /// History could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
}

/// SQLite-based implementation of MeasurementStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use growthline_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("growthline.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// When the history was last saved, if ever
    pub fn last_saved(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let updated_at: Option<i64> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(updated_at.and_then(|secs| DateTime::from_timestamp(secs, 0)))
    }
}

impl MeasurementStore for SqliteStore {
    type Error = StoreError;

    fn load(&self) -> Result<Option<SeriesPair>, Self::Error> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        document
            .map(|json| serde_json::from_str(&json).map_err(StoreError::MalformedData))
            .transpose()
    }

    fn save(&mut self, series: &SeriesPair) -> Result<(), Self::Error> {
        let json = serde_json::to_string(series).map_err(StoreError::Serialization)?;

        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
             value = excluded.value, updated_at = excluded.updated_at",
            params![STORAGE_KEY, json, Utc::now().timestamp()],
        )?;

        debug!(
            "Saved {} weight and {} height measurements",
            series.weight.len(),
            series.height.len()
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![STORAGE_KEY])?;
        Ok(())
    }
}

/// Load the saved history, falling back to the bundled dataset
///
/// Nothing saved yet and unreadable data both yield [`SeriesPair::default`];
/// the latter is logged as a warning and never reaches the caller as an error.
pub fn load_or_default<S>(store: &S) -> SeriesPair
where
    S: MeasurementStore,
    S::Error: Display,
{
    match store.load() {
        Ok(Some(series)) => series,
        Ok(None) => {
            info!("No saved measurements, using default dataset");
            SeriesPair::default()
        }
        Err(e) => {
            warn!("Failed to load saved measurements, using default dataset: {}", e);
            SeriesPair::default()
        }
    }
}
