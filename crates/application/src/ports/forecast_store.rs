//! Forecast persistence port

use domain::ForecastSet;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the append-only forecast store
///
/// The store has no update or delete operations and no uniqueness constraint
/// on the forecast date: repeated forecasts for overlapping dates accumulate
/// as separate rows.
#[cfg_attr(test, automock)]
pub trait ForecastStore {
    /// Create the forecast table if it does not exist yet
    ///
    /// Idempotent; calling it on an initialized store is a no-op.
    fn initialize(&self) -> Result<(), ApplicationError>;

    /// Bulk-insert one row per forecast day, returning the inserted count
    fn append(&self, forecast: &ForecastSet) -> Result<u64, ApplicationError>;

    /// Total number of persisted forecast rows
    fn row_count(&self) -> Result<u64, ApplicationError>;
}
