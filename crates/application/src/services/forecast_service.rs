//! Forecast generation and the predict-and-persist pipeline
//!
//! [`generate_forecast`] implements the generation contract: one row per
//! consecutive day starting at the anchor, with a single shared perturbation
//! per day added to both band bounds. [`ForecastService`] wires the ports
//! together into the linear pipeline: load, fit, predict, sanity-check,
//! persist, render charts.

use std::path::PathBuf;

use chrono::NaiveDate;
use domain::{DomainError, ForecastRow, ForecastSet, Horizon, SanityCheck};
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    ChartRenderer, FittedModel, ForecastStore, NoiseSource, ObservationSource, SeasonalModel,
};

/// Output locations for the chart artifacts
#[derive(Debug, Clone)]
pub struct ChartOutputs {
    /// Path of the static chart image
    pub static_chart: PathBuf,
    /// Path of the interactive chart document
    pub interactive_chart: PathBuf,
}

/// Result of a completed pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The generated forecast
    pub forecast: ForecastSet,
    /// Sanity-check verdict (always valid in a successful run)
    pub verdict: SanityCheck,
    /// Number of rows written to the store
    pub rows_inserted: u64,
}

/// Generate a forecast from a fitted model
///
/// Returns exactly `horizon` rows with consecutive calendar dates starting
/// at `anchor`. For each day one perturbation is drawn and added to both
/// band bounds, so the band width is preserved unless the row construction
/// has to correct an inverted band.
pub fn generate_forecast(
    fitted: &dyn FittedModel,
    anchor: NaiveDate,
    horizon: Horizon,
    noise: &mut dyn NoiseSource,
) -> Result<ForecastSet, ApplicationError> {
    let mut rows = Vec::with_capacity(horizon.as_usize());
    let mut date = anchor;

    for _ in 0..horizon.days() {
        let band = fitted.predict_band(date);
        // One draw per row, applied to both bounds.
        let daily_variation = noise.sample();
        rows.push(ForecastRow::from_bounds(
            date,
            band.lower + daily_variation,
            band.upper + daily_variation,
        ));
        date = date
            .succ_opt()
            .ok_or_else(|| DomainError::InvalidDate(format!("no day after {date}")))?;
    }

    Ok(ForecastSet::new(rows))
}

/// Orchestrates the forecast pipeline over the application ports
pub struct ForecastService {
    source: Box<dyn ObservationSource>,
    model: Box<dyn SeasonalModel>,
    noise: Box<dyn NoiseSource>,
    store: Box<dyn ForecastStore>,
    charts: Box<dyn ChartRenderer>,
}

impl std::fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastService").finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a new forecast service over the given adapters
    #[must_use]
    pub fn new(
        source: Box<dyn ObservationSource>,
        model: Box<dyn SeasonalModel>,
        noise: Box<dyn NoiseSource>,
        store: Box<dyn ForecastStore>,
        charts: Box<dyn ChartRenderer>,
    ) -> Self {
        Self {
            source,
            model,
            noise,
            store,
            charts,
        }
    }

    /// Run the full pipeline: load, fit, predict, check, persist, render
    ///
    /// When `anchor` is `None`, the forecast starts on the day after the
    /// last historical observation. A forecast that fails its sanity check
    /// is not persisted; the verdict reason is surfaced as a validation
    /// error. A failure to render the interactive chart is logged and does
    /// not abort the run.
    #[instrument(skip(self, outputs))]
    pub fn run(
        &mut self,
        anchor: Option<NaiveDate>,
        horizon: Horizon,
        outputs: &ChartOutputs,
    ) -> Result<PipelineReport, ApplicationError> {
        let series = self.source.load()?;
        info!(observations = series.len(), "historical series loaded");

        let fitted = self.model.fit(&series)?;
        let anchor = match anchor {
            Some(date) => date,
            None => series.next_date()?,
        };

        info!(%anchor, %horizon, "generating forecast");
        let forecast = generate_forecast(fitted.as_ref(), anchor, horizon, self.noise.as_mut())?;

        let verdict = forecast.sanity_check();
        if !verdict.is_valid {
            warn!(reason = verdict.reason, "forecast rejected by sanity check");
            return Err(ApplicationError::Validation(verdict.reason.to_string()));
        }

        self.store.initialize()?;
        let rows_inserted = self.store.append(&forecast)?;
        info!(rows = rows_inserted, "forecast persisted");

        self.charts.render_static(&forecast, &outputs.static_chart)?;
        if let Err(e) = self
            .charts
            .render_interactive(&forecast, &outputs.interactive_chart)
        {
            // The static artifact and the return value are unaffected.
            warn!(error = %e, "interactive chart rendering failed");
        }

        Ok(PipelineReport {
            forecast,
            verdict,
            rows_inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use domain::{Observation, ObservationSeries};
    use proptest::prelude::*;

    use super::*;
    use crate::ports::{
        MockChartRenderer, MockFittedModel, MockForecastStore, MockNoiseSource,
        MockObservationSource, MockSeasonalModel, PredictionBand,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A noise source replaying a fixed script, cycling when exhausted
    struct ScriptedNoise {
        values: Vec<f64>,
        next: usize,
    }

    impl ScriptedNoise {
        fn new(values: Vec<f64>) -> Self {
            Self { values, next: 0 }
        }

        fn silent() -> Self {
            Self::new(vec![0.0])
        }
    }

    impl NoiseSource for ScriptedNoise {
        fn sample(&mut self) -> f64 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }
    }

    /// A fitted model with a constant band for every day
    struct ConstantBand {
        lower: f64,
        upper: f64,
    }

    impl FittedModel for ConstantBand {
        fn predict_band(&self, _date: NaiveDate) -> PredictionBand {
            PredictionBand {
                lower: self.lower,
                mid: f64::midpoint(self.lower, self.upper),
                upper: self.upper,
            }
        }
    }

    #[test]
    fn generate_produces_consecutive_dates_from_anchor() {
        let fitted = ConstantBand {
            lower: 5.0,
            upper: 12.0,
        };
        let mut noise = ScriptedNoise::silent();
        let horizon = Horizon::new(7).unwrap();

        let forecast =
            generate_forecast(&fitted, date(2021, 3, 1), horizon, &mut noise).unwrap();

        assert_eq!(forecast.len(), 7);
        for (offset, row) in forecast.iter().enumerate() {
            let expected = date(2021, 3, 1) + chrono::Duration::days(offset as i64);
            assert_eq!(row.date, expected);
        }
    }

    #[test]
    fn generate_crosses_month_boundaries() {
        let fitted = ConstantBand {
            lower: 5.0,
            upper: 12.0,
        };
        let mut noise = ScriptedNoise::silent();
        let horizon = Horizon::new(3).unwrap();

        let forecast =
            generate_forecast(&fitted, date(2021, 1, 30), horizon, &mut noise).unwrap();

        let dates: Vec<NaiveDate> = forecast.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(2021, 1, 30), date(2021, 1, 31), date(2021, 2, 1)]
        );
    }

    #[test]
    fn shared_draw_preserves_band_width() {
        let fitted = ConstantBand {
            lower: 5.0,
            upper: 12.0,
        };
        // Strongly varying noise: the same draw shifts both bounds, so the
        // width stays 7.0 on every row.
        let mut noise = ScriptedNoise::new(vec![3.4, -8.1, 0.0, 12.9]);
        let horizon = Horizon::new(4).unwrap();

        let forecast =
            generate_forecast(&fitted, date(2021, 3, 1), horizon, &mut noise).unwrap();

        for row in forecast.iter() {
            assert!((row.band_width() - 7.0).abs() < 1e-9);
        }
    }

    #[test]
    fn inverted_model_band_is_corrected() {
        // The raw model emits an inverted band; every constructed row must
        // still satisfy the invariant.
        let fitted = ConstantBand {
            lower: 14.0,
            upper: 11.0,
        };
        let mut noise = ScriptedNoise::silent();
        let horizon = Horizon::new(2).unwrap();

        let forecast =
            generate_forecast(&fitted, date(2021, 3, 1), horizon, &mut noise).unwrap();

        for row in forecast.iter() {
            assert!(row.min_temp < row.max_temp);
        }
    }

    #[test]
    fn generate_draws_once_per_row() {
        let fitted = ConstantBand {
            lower: 5.0,
            upper: 12.0,
        };
        let mut noise = MockNoiseSource::new();
        noise.expect_sample().times(5).return_const(0.0);
        let horizon = Horizon::new(5).unwrap();

        generate_forecast(&fitted, date(2021, 3, 1), horizon, &mut noise).unwrap();
    }

    fn training_series() -> ObservationSeries {
        ObservationSeries::from_unordered(
            (1..=28)
                .map(|d| Observation::new(date(2020, 2, d), 4.0))
                .collect(),
        )
    }

    fn fitted_with_band(lower: f64, upper: f64) -> MockSeasonalModel {
        let mut model = MockSeasonalModel::new();
        model.expect_fit().return_once(move |_| {
            let mut fitted = MockFittedModel::new();
            fitted.expect_predict_band().returning(move |_| PredictionBand {
                lower,
                mid: f64::midpoint(lower, upper),
                upper,
            });
            Ok(Box::new(fitted))
        });
        model
    }

    fn loaded_source() -> MockObservationSource {
        let mut source = MockObservationSource::new();
        source
            .expect_load()
            .return_once(|| Ok(training_series()));
        source
    }

    fn outputs() -> ChartOutputs {
        ChartOutputs {
            static_chart: PathBuf::from("forecast.svg"),
            interactive_chart: PathBuf::from("forecast.html"),
        }
    }

    #[test]
    fn pipeline_persists_valid_forecast() {
        let mut store = MockForecastStore::new();
        store.expect_initialize().times(1).returning(|| Ok(()));
        store
            .expect_append()
            .times(1)
            .returning(|set| Ok(set.len() as u64));

        let mut charts = MockChartRenderer::new();
        charts
            .expect_render_static()
            .times(1)
            .returning(|_, _| Ok(()));
        charts
            .expect_render_interactive()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut service = ForecastService::new(
            Box::new(loaded_source()),
            Box::new(fitted_with_band(2.0, 9.0)),
            Box::new(ScriptedNoise::silent()),
            Box::new(store),
            Box::new(charts),
        );

        let report = service
            .run(None, Horizon::new(10).unwrap(), &outputs())
            .unwrap();

        assert_eq!(report.rows_inserted, 10);
        assert!(report.verdict.is_valid);
        // Default anchor continues the historical series.
        assert_eq!(report.forecast.anchor(), Some(date(2020, 2, 29)));
    }

    #[test]
    fn pipeline_rejects_unrealistic_forecast_without_persisting() {
        let mut store = MockForecastStore::new();
        store.expect_initialize().never();
        store.expect_append().never();

        let mut charts = MockChartRenderer::new();
        charts.expect_render_static().never();
        charts.expect_render_interactive().never();

        let mut service = ForecastService::new(
            Box::new(loaded_source()),
            Box::new(fitted_with_band(38.0, 45.0)),
            Box::new(ScriptedNoise::silent()),
            Box::new(store),
            Box::new(charts),
        );

        let err = service
            .run(None, Horizon::new(5).unwrap(), &outputs())
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Validation(_)));
        assert!(err.to_string().contains("realistic range"));
    }

    #[test]
    fn pipeline_survives_interactive_chart_failure() {
        let mut store = MockForecastStore::new();
        store.expect_initialize().returning(|| Ok(()));
        store
            .expect_append()
            .returning(|set| Ok(set.len() as u64));

        let mut charts = MockChartRenderer::new();
        charts
            .expect_render_static()
            .times(1)
            .returning(|_, _| Ok(()));
        charts
            .expect_render_interactive()
            .times(1)
            .returning(|_, _| Err(ApplicationError::Chart("renderer exploded".to_string())));

        let mut service = ForecastService::new(
            Box::new(loaded_source()),
            Box::new(fitted_with_band(2.0, 9.0)),
            Box::new(ScriptedNoise::silent()),
            Box::new(store),
            Box::new(charts),
        );

        let report = service
            .run(None, Horizon::new(3).unwrap(), &outputs())
            .unwrap();

        assert_eq!(report.rows_inserted, 3);
    }

    #[test]
    fn pipeline_surfaces_static_chart_failure() {
        let mut store = MockForecastStore::new();
        store.expect_initialize().returning(|| Ok(()));
        store
            .expect_append()
            .returning(|set| Ok(set.len() as u64));

        let mut charts = MockChartRenderer::new();
        charts
            .expect_render_static()
            .returning(|_, _| Err(ApplicationError::Chart("disk full".to_string())));
        charts.expect_render_interactive().never();

        let mut service = ForecastService::new(
            Box::new(loaded_source()),
            Box::new(fitted_with_band(2.0, 9.0)),
            Box::new(ScriptedNoise::silent()),
            Box::new(store),
            Box::new(charts),
        );

        let err = service
            .run(None, Horizon::new(3).unwrap(), &outputs())
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Chart(_)));
    }

    #[test]
    fn explicit_anchor_overrides_series_continuation() {
        let mut store = MockForecastStore::new();
        store.expect_initialize().returning(|| Ok(()));
        store
            .expect_append()
            .returning(|set| Ok(set.len() as u64));

        let mut charts = MockChartRenderer::new();
        charts.expect_render_static().returning(|_, _| Ok(()));
        charts.expect_render_interactive().returning(|_, _| Ok(()));

        let mut service = ForecastService::new(
            Box::new(loaded_source()),
            Box::new(fitted_with_band(2.0, 9.0)),
            Box::new(ScriptedNoise::silent()),
            Box::new(store),
            Box::new(charts),
        );

        let report = service
            .run(
                Some(date(2021, 4, 15)),
                Horizon::new(2).unwrap(),
                &outputs(),
            )
            .unwrap();

        assert_eq!(report.forecast.anchor(), Some(date(2021, 4, 15)));
    }

    proptest! {
        /// For all horizons, the forecast has exactly `h` rows with
        /// consecutive dates and strictly ordered bands.
        #[test]
        fn generation_contract_holds(h in 1u32..400, shift in -5.0f64..5.0) {
            let fitted = ConstantBand { lower: 3.0, upper: 10.0 };
            let mut noise = ScriptedNoise::new(vec![shift, -shift, 0.5]);
            let horizon = Horizon::new(h).unwrap();
            let anchor = date(2021, 1, 1);

            let forecast = generate_forecast(&fitted, anchor, horizon, &mut noise).unwrap();

            prop_assert_eq!(forecast.len(), h as usize);
            for (offset, row) in forecast.iter().enumerate() {
                let expected = anchor + chrono::Duration::days(offset as i64);
                prop_assert_eq!(row.date, expected);
                prop_assert!(row.min_temp < row.max_temp);
            }
        }
    }
}
