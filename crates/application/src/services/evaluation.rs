//! Model evaluation against a holdout series

use domain::{EvaluationReport, ObservationSeries};
use tracing::info;

use crate::error::ApplicationError;
use crate::ports::FittedModel;

/// Evaluate a fitted model against a labeled holdout series
///
/// Computes the mean absolute error and root-mean-square error of the
/// central estimate, and the percentage of actual values falling inside the
/// predicted band (bounds inclusive).
///
/// # Errors
///
/// Returns [`ApplicationError::Validation`] when the holdout is empty; the
/// metrics are undefined without at least one actual value.
pub fn evaluate(
    fitted: &dyn FittedModel,
    holdout: &ObservationSeries,
) -> Result<EvaluationReport, ApplicationError> {
    if holdout.is_empty() {
        return Err(ApplicationError::Validation(
            "holdout series is empty".to_string(),
        ));
    }

    let mut abs_error_sum = 0.0;
    let mut squared_error_sum = 0.0;
    let mut within_band = 0usize;

    for observation in holdout.iter() {
        let band = fitted.predict_band(observation.date);
        let error = observation.temperature - band.mid;
        abs_error_sum += error.abs();
        squared_error_sum += error * error;
        if band.contains(observation.temperature) {
            within_band += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = holdout.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let report = EvaluationReport {
        mae: abs_error_sum / n,
        rmse: (squared_error_sum / n).sqrt(),
        within_band_percent: within_band as f64 / n * 100.0,
    };

    info!(
        holdout = holdout.len(),
        mae = report.mae,
        rmse = report.rmse,
        within_band_percent = report.within_band_percent,
        "model evaluated"
    );
    Ok(report)
}
