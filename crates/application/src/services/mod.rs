//! Application services

mod evaluation;
mod forecast_service;

pub use evaluation::evaluate;
pub use forecast_service::{ChartOutputs, ForecastService, PipelineReport, generate_forecast};
