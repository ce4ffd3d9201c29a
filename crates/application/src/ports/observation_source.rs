//! Historical observation source port

use domain::ObservationSeries;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for loading the historical temperature series
#[cfg_attr(test, automock)]
pub trait ObservationSource {
    /// Load the complete historical series into memory
    ///
    /// Implementations drop rows whose temperature cannot be coerced to a
    /// number; a missing data region is a fatal error.
    fn load(&self) -> Result<ObservationSeries, ApplicationError>;
}
