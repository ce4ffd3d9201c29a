//! Harmonic regression with yearly and weekly seasonality
//!
//! Ordinary least squares on a design matrix of intercept, linear trend and
//! Fourier pairs for the yearly and weekly cycles. The prediction band is
//! the central estimate plus/minus `band_z` residual standard deviations.

use std::f64::consts::TAU;

use application::{ApplicationError, FittedModel, PredictionBand, SeasonalModel};
use chrono::NaiveDate;
use domain::ObservationSeries;
use nalgebra::{DMatrix, DVector};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Days per year used for the yearly cycle
const YEAR_DAYS: f64 = 365.25;

/// Days per week used for the weekly cycle
const WEEK_DAYS: f64 = 7.0;

/// Errors raised while fitting the model
#[derive(Debug, Error)]
pub enum ModelError {
    /// Not enough observations for the requested parameter count
    #[error("Series too short: {observations} observations for {parameters} parameters")]
    SeriesTooShort {
        observations: usize,
        parameters: usize,
    },

    /// The least-squares system could not be solved
    #[error("Least-squares solve failed: {0}")]
    SolveFailed(String),
}

/// Harmonic regression estimator
#[derive(Debug, Clone)]
pub struct HarmonicRegression {
    /// Number of yearly Fourier pairs
    yearly_order: usize,
    /// Number of weekly Fourier pairs
    weekly_order: usize,
    /// Band half-width in residual standard deviations
    band_z: f64,
}

impl HarmonicRegression {
    /// Create an estimator with explicit seasonality orders
    #[must_use]
    pub fn new(yearly_order: usize, weekly_order: usize, band_z: f64) -> Self {
        Self {
            yearly_order,
            weekly_order,
            band_z,
        }
    }

    /// Number of regression coefficients
    fn parameter_count(&self) -> usize {
        2 + 2 * self.yearly_order + 2 * self.weekly_order
    }

    /// Feature row for a day offset from the training origin
    fn features(&self, day: f64) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.parameter_count());
        row.push(1.0);
        row.push(day / YEAR_DAYS);
        for k in 1..=self.yearly_order {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * k as f64 * day / YEAR_DAYS;
            row.push(angle.sin());
            row.push(angle.cos());
        }
        for k in 1..=self.weekly_order {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * k as f64 * day / WEEK_DAYS;
            row.push(angle.sin());
            row.push(angle.cos());
        }
        row
    }

    /// Fit the regression to a historical series
    #[instrument(skip(self, series), fields(observations = series.len()))]
    pub fn fit_series(&self, series: &ObservationSeries) -> Result<FittedHarmonicModel, ModelError> {
        let n = series.len();
        let p = self.parameter_count();
        if n < p + 2 {
            return Err(ModelError::SeriesTooShort {
                observations: n,
                parameters: p,
            });
        }

        // The origin anchors the day offsets used by both fit and predict.
        #[allow(clippy::expect_used)] // length checked above
        let origin = series.first().expect("non-empty series").date;

        let mut design = DMatrix::zeros(n, p);
        let mut target = DVector::zeros(n);
        for (i, observation) in series.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let day = (observation.date - origin).num_days() as f64;
            for (j, value) in self.features(day).into_iter().enumerate() {
                design[(i, j)] = value;
            }
            target[i] = observation.temperature;
        }

        let svd = design.clone().svd(true, true);
        let coefficients = svd
            .solve(&target, 1e-10)
            .map_err(|e| ModelError::SolveFailed(e.to_string()))?;

        let residuals = &target - design * &coefficients;
        #[allow(clippy::cast_precision_loss)]
        let dof = (n - p).max(1) as f64;
        let residual_std = (residuals.norm_squared() / dof).sqrt();

        debug!(residual_std, "regression residual spread");
        info!(parameters = p, "seasonal model fitted");

        Ok(FittedHarmonicModel {
            estimator: self.clone(),
            origin,
            coefficients: coefficients.iter().copied().collect(),
            residual_std,
        })
    }
}

impl Default for HarmonicRegression {
    /// Three yearly and two weekly Fourier pairs with a 95% band
    fn default() -> Self {
        Self::new(3, 2, 1.96)
    }
}

impl SeasonalModel for HarmonicRegression {
    fn fit(&self, series: &ObservationSeries) -> Result<Box<dyn FittedModel>, ApplicationError> {
        self.fit_series(series)
            .map(|fitted| Box::new(fitted) as Box<dyn FittedModel>)
            .map_err(|e| ApplicationError::Model(e.to_string()))
    }
}

/// A harmonic regression fitted to one series
#[derive(Debug, Clone)]
pub struct FittedHarmonicModel {
    estimator: HarmonicRegression,
    origin: NaiveDate,
    coefficients: Vec<f64>,
    residual_std: f64,
}

impl FittedHarmonicModel {
    /// Central estimate for a single day
    #[must_use]
    pub fn predict_mid(&self, date: NaiveDate) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let day = (date - self.origin).num_days() as f64;
        self.estimator
            .features(day)
            .iter()
            .zip(&self.coefficients)
            .map(|(x, c)| x * c)
            .sum()
    }

    /// Residual standard deviation of the fit
    #[must_use]
    pub fn residual_std(&self) -> f64 {
        self.residual_std
    }
}

impl FittedModel for FittedHarmonicModel {
    fn predict_band(&self, date: NaiveDate) -> PredictionBand {
        let mid = self.predict_mid(date);
        let half_width = self.estimator.band_z * self.residual_std;
        PredictionBand {
            lower: mid - half_width,
            mid,
            upper: mid + half_width,
        }
    }
}
