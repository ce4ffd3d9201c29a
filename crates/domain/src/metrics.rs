//! Forecast accuracy metrics

use serde::{Deserialize, Serialize};

/// Accuracy of a fitted model against a holdout series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean absolute error in Celsius
    pub mae: f64,
    /// Root-mean-square error in Celsius
    pub rmse: f64,
    /// Percentage of actual values falling inside the predicted band
    /// (inclusive bounds)
    pub within_band_percent: f64,
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE {:.2}°C, RMSE {:.2}°C, {:.1}% within band",
            self.mae, self.rmse, self.within_band_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_all_three_metrics() {
        let report = EvaluationReport {
            mae: 1.25,
            rmse: 2.5,
            within_band_percent: 87.5,
        };

        assert_eq!(report.to_string(), "MAE 1.25°C, RMSE 2.50°C, 87.5% within band");
    }

    #[test]
    fn serializes_roundtrip() {
        let report = EvaluationReport {
            mae: 1.0,
            rmse: 2.0,
            within_band_percent: 90.0,
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: EvaluationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
