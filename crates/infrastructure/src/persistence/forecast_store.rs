//! SQLite-based forecast persistence
//!
//! Each operation opens its own connection and closes it when done; the
//! pipeline is single-threaded and performs exactly one bulk write per run,
//! so there is no pool. The store is append-only: forecasts for overlapping
//! dates accumulate as separate rows.

use std::path::{Path, PathBuf};

use application::{ApplicationError, ForecastStore};
use domain::ForecastSet;
use rusqlite::{Connection, params};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Database directory could not be created
    #[error("Failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),
}

/// Date format used for the persisted `date` column
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based forecast store
#[derive(Debug, Clone)]
pub struct SqliteForecastStore {
    path: PathBuf,
}

impl SqliteForecastStore {
    /// Create a store writing to the given database file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, DatabaseError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Connection::open(&self.path)?)
    }

    /// Create the forecast table if it does not exist yet
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn init_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS weather_forecast (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                min_temp REAL,
                max_temp REAL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;
        debug!("forecast table ready");
        Ok(())
    }

    /// Bulk-insert one row per forecast day inside a single transaction
    #[instrument(skip(self, forecast), fields(rows = forecast.len()))]
    pub fn insert_forecast(&self, forecast: &ForecastSet) -> Result<u64, DatabaseError> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO weather_forecast (date, min_temp, max_temp)
                 VALUES (?1, ?2, ?3)",
            )?;
            for row in forecast.iter() {
                stmt.execute(params![
                    row.date.format(DATE_FORMAT).to_string(),
                    row.min_temp,
                    row.max_temp,
                ])?;
            }
        }
        tx.commit()?;

        let inserted = forecast.len() as u64;
        info!(inserted, "forecast rows persisted");
        Ok(inserted)
    }

    /// Total number of persisted forecast rows
    pub fn count_rows(&self) -> Result<u64, DatabaseError> {
        let conn = self.open()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM weather_forecast", [], |row| {
                row.get(0)
            })?;
        #[allow(clippy::cast_sign_loss)] // COUNT(*) is always non-negative
        Ok(count as u64)
    }
}

impl ForecastStore for SqliteForecastStore {
    fn initialize(&self) -> Result<(), ApplicationError> {
        self.init_schema()
            .map_err(|e| ApplicationError::Persistence(e.to_string()))
    }

    fn append(&self, forecast: &ForecastSet) -> Result<u64, ApplicationError> {
        self.insert_forecast(forecast)
            .map_err(|e| ApplicationError::Persistence(e.to_string()))
    }

    fn row_count(&self) -> Result<u64, ApplicationError> {
        self.count_rows()
            .map_err(|e| ApplicationError::Persistence(e.to_string()))
    }
}
