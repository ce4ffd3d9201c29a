//! Historical temperature observations
//!
//! An [`Observation`] is a single measured daily temperature. An
//! [`ObservationSeries`] holds the loaded history and enforces the series
//! invariant: chronologically ordered, one observation per date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A single daily temperature measurement in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day of the measurement
    pub date: NaiveDate,
    /// Measured temperature in Celsius
    pub temperature: f64,
}

impl Observation {
    /// Create a new observation
    #[must_use]
    pub const fn new(date: NaiveDate, temperature: f64) -> Self {
        Self { date, temperature }
    }
}

/// An ordered series of daily temperature observations
///
/// Invariants: observations are sorted by date and each date appears at most
/// once. Both are established at construction; the series is immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Build a series from observations in arbitrary order
    ///
    /// Sorts by date (stable) and keeps the first observation per date.
    #[must_use]
    pub fn from_unordered(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        Self { observations }
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series contains no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The observations, sorted by date
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Iterate over the observations in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// First (oldest) observation
    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    /// Last (most recent) observation
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// The day after the most recent observation
    ///
    /// This is the natural anchor for a forecast continuing the series.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptySeries`] when there is no observation to
    /// continue from.
    pub fn next_date(&self) -> Result<NaiveDate, DomainError> {
        let last = self.last().ok_or(DomainError::EmptySeries)?;
        last.date
            .succ_opt()
            .ok_or_else(|| DomainError::InvalidDate(format!("no day after {}", last.date)))
    }

    /// Split off the last `n` observations as a holdout
    ///
    /// Returns `(training, holdout)`. When `n` is zero or exceeds the series
    /// length, one side is empty.
    #[must_use]
    pub fn split_tail(&self, n: usize) -> (Self, Self) {
        let split = self.observations.len().saturating_sub(n);
        let (train, holdout) = self.observations.split_at(split);
        (
            Self {
                observations: train.to_vec(),
            },
            Self {
                observations: holdout.to_vec(),
            },
        )
    }
}
