//! Seasonal model port
//!
//! The model is split into two interfaces: [`SeasonalModel`] produces a
//! [`FittedModel`] value from a training series, and the fitted value is
//! passed explicitly into prediction and evaluation. Keeping the fitted
//! state out of the estimator makes each use testable in isolation.

use chrono::NaiveDate;
use domain::ObservationSeries;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A per-day prediction band from a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionBand {
    /// Lower band bound in Celsius
    pub lower: f64,
    /// Central estimate in Celsius
    pub mid: f64,
    /// Upper band bound in Celsius
    pub upper: f64,
}

impl PredictionBand {
    /// Whether `value` falls inside the band, bounds inclusive
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// A model fitted to a historical series
#[cfg_attr(test, automock)]
pub trait FittedModel {
    /// Predict the temperature band for a single day
    fn predict_band(&self, date: NaiveDate) -> PredictionBand;
}

/// Port for fitting a seasonal regression model
#[cfg_attr(test, automock)]
pub trait SeasonalModel {
    /// Fit the model to a historical series
    fn fit(&self, series: &ObservationSeries) -> Result<Box<dyn FittedModel>, ApplicationError>;
}
