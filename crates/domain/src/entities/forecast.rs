//! Forecast rows and forecast sets
//!
//! A [`ForecastRow`] is one predicted day with a min/max temperature band.
//! Construction goes through [`ForecastRow::from_bounds`], which enforces the
//! row invariant `min_temp < max_temp`: when the raw bounds are inverted (or
//! equal) after rounding, they are swapped and widened by 0.1 degrees on each
//! side. The correction never re-draws the bounds.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Margin applied to each side when a band has to be corrected
const NUDGE: f64 = 0.1;

/// Round to one decimal place, matching the persisted precision
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A single forecast day with its temperature band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Forecast date
    pub date: NaiveDate,
    /// Lower bound of the band in Celsius
    pub min_temp: f64,
    /// Upper bound of the band in Celsius
    pub max_temp: f64,
    /// Human-readable band label, e.g. `"3.1-8.4°C"`
    pub label: String,
}

impl ForecastRow {
    /// Build a row from raw model bounds
    ///
    /// Both bounds are rounded to one decimal. If the rounded lower bound is
    /// greater than or equal to the rounded upper bound, the bounds are
    /// swapped and nudged apart by 0.1 degrees on each side, so the invariant
    /// `min_temp < max_temp` holds strictly on every constructed row.
    #[must_use]
    pub fn from_bounds(date: NaiveDate, lower: f64, upper: f64) -> Self {
        let mut min_temp = round1(lower);
        let mut max_temp = round1(upper);

        if min_temp >= max_temp {
            let (corrected_min, corrected_max) = (max_temp - NUDGE, min_temp + NUDGE);
            min_temp = round1(corrected_min);
            max_temp = round1(corrected_max);
        }

        let label = format!("{min_temp:.1}-{max_temp:.1}°C");
        Self {
            date,
            min_temp,
            max_temp,
            label,
        }
    }

    /// Width of the temperature band
    #[must_use]
    pub fn band_width(&self) -> f64 {
        self.max_temp - self.min_temp
    }
}

/// An ordered forecast over contiguous daily dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    rows: Vec<ForecastRow>,
}

impl ForecastSet {
    /// Wrap a sequence of forecast rows
    #[must_use]
    pub fn new(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    /// Number of forecast days
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the forecast contains no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The forecast rows in date order
    #[must_use]
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Iterate over the forecast rows
    pub fn iter(&self) -> impl Iterator<Item = &ForecastRow> {
        self.rows.iter()
    }

    /// First forecast date (the anchor)
    #[must_use]
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    /// Lowest `min_temp` across all rows
    #[must_use]
    pub fn coldest_min(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.min_temp).reduce(f64::min)
    }

    /// Highest `max_temp` across all rows
    #[must_use]
    pub fn hottest_max(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.max_temp).reduce(f64::max)
    }

    /// Mean `max_temp` over the rows whose month is in `months`
    ///
    /// Returns `None` when no row falls into the given months.
    #[must_use]
    pub fn mean_max_for_months(&self, months: &[u32]) -> Option<f64> {
        let temps: Vec<f64> = self
            .rows
            .iter()
            .filter(|r| months.contains(&r.date.month()))
            .map(|r| r.max_temp)
            .collect();

        if temps.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(temps.iter().sum::<f64>() / temps.len() as f64)
        }
    }

    /// Narrowest band width across all rows
    #[must_use]
    pub fn narrowest_band(&self) -> Option<f64> {
        self.rows.iter().map(ForecastRow::band_width).reduce(f64::min)
    }

    /// Run the sanity-check policy over this forecast
    #[must_use]
    pub fn sanity_check(&self) -> crate::validation::SanityCheck {
        crate::validation::sanity_check(self)
    }
}

impl IntoIterator for ForecastSet {
    type Item = ForecastRow;
    type IntoIter = std::vec::IntoIter<ForecastRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
