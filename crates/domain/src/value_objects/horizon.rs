//! Forecast horizon value object
//!
//! Represents a validated forecast length in days. A horizon is always at
//! least one day; zero-length forecasts are rejected at construction.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Horizon;
//!
//! let h = Horizon::new(30).expect("valid horizon");
//! assert_eq!(h.days(), 30);
//!
//! assert!(Horizon::new(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a horizon is zero days long
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid horizon: must be at least 1 day")]
pub struct InvalidHorizon;

/// Forecast length in days (at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Horizon(u32);

impl Horizon {
    /// Create a new validated horizon
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHorizon`] when `days` is zero.
    pub const fn new(days: u32) -> Result<Self, InvalidHorizon> {
        if days == 0 {
            Err(InvalidHorizon)
        } else {
            Ok(Self(days))
        }
    }

    /// The horizon length in days
    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }

    /// The horizon length as a usize, for sizing collections
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for Horizon {
    /// Thirty days, the conventional monthly forecast
    fn default() -> Self {
        Self(30)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}

impl TryFrom<u32> for Horizon {
    type Error = InvalidHorizon;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<Horizon> for u32 {
    fn from(h: Horizon) -> Self {
        h.0
    }
}

/// Custom deserialization that rejects zero-day horizons
impl<'de> Deserialize<'de> for Horizon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let days = u32::deserialize(deserializer)?;
        Self::new(days).map_err(serde::de::Error::custom)
    }
}
