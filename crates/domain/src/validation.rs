//! Forecast sanity-check policy
//!
//! A pure, ordered rule chain over a [`ForecastSet`]. Rules are evaluated in
//! a fixed order and the first failing rule decides the verdict; later rules
//! are not evaluated once an earlier one fails.
//!
//! 1. Range: any band reaching below −30 °C or above 40 °C is unrealistic.
//! 2. Seasonal consistency: when the forecast covers both summer and winter
//!    days, the winter mean daily maximum must stay below the summer mean.
//!    The rule is skipped entirely unless both seasons are present.
//! 3. Band integrity: every row must have a strictly positive band width.

use serde::{Deserialize, Serialize};

use crate::entities::ForecastSet;

/// Coldest plausible band bound in Celsius
pub const MIN_REALISTIC_TEMP: f64 = -30.0;

/// Hottest plausible band bound in Celsius
pub const MAX_REALISTIC_TEMP: f64 = 40.0;

/// Months counted as summer
pub const SUMMER_MONTHS: [u32; 3] = [6, 7, 8];

/// Months counted as winter
pub const WINTER_MONTHS: [u32; 3] = [12, 1, 2];

/// Verdict reason when the range rule fails
pub const REASON_UNREALISTIC_RANGE: &str = "temperature outside realistic range";

/// Verdict reason when the seasonal-consistency rule fails
pub const REASON_SEASONALITY: &str = "seasonality violated: winter warmer than summer";

/// Verdict reason when the band-integrity rule fails
pub const REASON_BAND_INTEGRITY: &str = "min exceeds max";

/// Verdict reason for a passing forecast
pub const REASON_PASSED: &str = "forecast passed validation";

/// Outcome of the sanity-check policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityCheck {
    /// Whether the forecast passed every rule
    pub is_valid: bool,
    /// Human-readable verdict reason
    pub reason: &'static str,
}

impl SanityCheck {
    const fn failed(reason: &'static str) -> Self {
        Self {
            is_valid: false,
            reason,
        }
    }

    const fn passed() -> Self {
        Self {
            is_valid: true,
            reason: REASON_PASSED,
        }
    }
}

impl std::fmt::Display for SanityCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// Run the sanity-check policy over a forecast
///
/// Pure function with no side effects. Rules short-circuit in order: range,
/// seasonal consistency, band integrity.
#[must_use]
pub fn sanity_check(forecast: &ForecastSet) -> SanityCheck {
    if forecast.coldest_min().is_some_and(|t| t < MIN_REALISTIC_TEMP)
        || forecast.hottest_max().is_some_and(|t| t > MAX_REALISTIC_TEMP)
    {
        return SanityCheck::failed(REASON_UNREALISTIC_RANGE);
    }

    if let (Some(summer_mean), Some(winter_mean)) = (
        forecast.mean_max_for_months(&SUMMER_MONTHS),
        forecast.mean_max_for_months(&WINTER_MONTHS),
    ) {
        if winter_mean >= summer_mean {
            return SanityCheck::failed(REASON_SEASONALITY);
        }
    }

    if forecast.narrowest_band().is_some_and(|w| w <= 0.0) {
        return SanityCheck::failed(REASON_BAND_INTEGRITY);
    }

    SanityCheck::passed()
}
