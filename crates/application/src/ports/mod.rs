//! Port definitions for the application layer
//!
//! Ports are the interfaces through which the forecast pipeline reaches
//! external collaborators. Adapters in the infrastructure layer implement
//! them. All ports are synchronous; the pipeline is single-threaded and has
//! no suspension points.

mod chart_renderer;
mod forecast_store;
mod noise_source;
mod observation_source;
mod seasonal_model;

pub use chart_renderer::ChartRenderer;
#[cfg(test)]
pub use chart_renderer::MockChartRenderer;
pub use forecast_store::ForecastStore;
#[cfg(test)]
pub use forecast_store::MockForecastStore;
#[cfg(test)]
pub use noise_source::MockNoiseSource;
pub use noise_source::NoiseSource;
#[cfg(test)]
pub use observation_source::MockObservationSource;
pub use observation_source::ObservationSource;
#[cfg(test)]
pub use seasonal_model::{MockFittedModel, MockSeasonalModel};
pub use seasonal_model::{FittedModel, PredictionBand, SeasonalModel};
