//! Infrastructure layer - adapters for external systems
//!
//! Implements the ports defined in the application layer: CSV observation
//! loading, the harmonic regression model, the Gaussian perturbation source,
//! SQLite persistence and chart rendering, plus configuration loading.

pub mod charts;
pub mod config;
pub mod loader;
pub mod model;
pub mod noise;
pub mod persistence;

pub use charts::{ChartError, TeraChartRenderer};
pub use self::config::{
    AppConfig, ChartConfig, ConfigError, DataConfig, DatabaseConfig, ForecastConfig, ModelConfig,
};
pub use loader::{CsvObservationLoader, LoaderError};
pub use model::{FittedHarmonicModel, HarmonicRegression, ModelError};
pub use noise::GaussianNoise;
pub use persistence::{DatabaseError, SqliteForecastStore};
