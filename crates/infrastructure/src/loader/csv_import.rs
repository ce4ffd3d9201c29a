//! CSV observation import
//!
//! Raw measurement exports carry a free-form metadata preamble before the
//! actual data region. The data region begins at the first line whose first
//! field starts with `"2020"`; a file without that marker is rejected before
//! any row parsing. Within the region, column 0 holds a timestamp whose
//! first 8 characters are a `YYYYMMDD` date and column 3 holds the
//! temperature. Rows with a malformed date or a non-numeric temperature are
//! dropped, not imputed.

use std::path::{Path, PathBuf};

use application::{ApplicationError, ObservationSource};
use chrono::NaiveDate;
use domain::{Observation, ObservationSeries};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors raised while importing historical data
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The export could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No line marking the start of the data region was found
    #[error("No data start marker found in {0}")]
    DataStartNotFound(PathBuf),

    /// The data region could not be tokenized as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Zero-based index of the date column inside the data region
const DATE_COLUMN: usize = 0;

/// Zero-based index of the temperature column inside the data region
const TEMPERATURE_COLUMN: usize = 3;

/// Prefix marking the first data line
const DATA_START_PREFIX: &str = "2020";

/// Loads the historical temperature series from a CSV export
#[derive(Debug, Clone)]
pub struct CsvObservationLoader {
    path: PathBuf,
}

impl CsvObservationLoader {
    /// Create a loader for the given export file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Import the series, dropping rows that cannot be coerced
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn import(&self) -> Result<ObservationSeries, LoaderError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| LoaderError::Io {
            path: self.path.clone(),
            source,
        })?;

        let data_region = locate_data_region(&raw)
            .ok_or_else(|| LoaderError::DataStartNotFound(self.path.clone()))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data_region.as_bytes());

        let mut observations = Vec::new();
        let mut dropped = 0usize;

        for record in reader.records() {
            let record = record?;
            match parse_row(&record) {
                Some(observation) => observations.push(observation),
                None => dropped += 1,
            }
        }

        debug!(dropped, "rows dropped during coercion");
        let series = ObservationSeries::from_unordered(observations);
        info!(observations = series.len(), "historical data imported");
        Ok(series)
    }
}

impl ObservationSource for CsvObservationLoader {
    fn load(&self) -> Result<ObservationSeries, ApplicationError> {
        self.import()
            .map_err(|e| ApplicationError::DataImport(e.to_string()))
    }
}

/// Find the data region: everything from the first line whose first field
/// starts with the data prefix
fn locate_data_region(raw: &str) -> Option<&str> {
    let mut offset = 0;
    for line in raw.lines() {
        if line.trim().starts_with(DATA_START_PREFIX) {
            return Some(&raw[offset..]);
        }
        // lines() strips the terminator, so advance past it manually.
        offset += line.len();
        offset += raw[offset..].chars().take_while(|c| *c == '\r' || *c == '\n').count();
    }
    None
}

/// Coerce one CSV record into an observation
///
/// Returns `None` for rows with too few columns, a date field shorter than
/// 8 characters, an unparseable date, or a non-numeric temperature.
fn parse_row(record: &csv::StringRecord) -> Option<Observation> {
    let date_field = record.get(DATE_COLUMN)?.trim();
    let temperature_field = record.get(TEMPERATURE_COLUMN)?.trim();

    if date_field.len() < 8 || !date_field.is_char_boundary(8) {
        return None;
    }
    let date = NaiveDate::parse_from_str(&date_field[..8], "%Y%m%d").ok()?;
    let temperature: f64 = temperature_field.parse().ok()?;

    Some(Observation::new(date, temperature))
}
