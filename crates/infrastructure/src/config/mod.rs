//! Application configuration
//!
//! Layered configuration in the usual order: built-in defaults, then an
//! optional `thermocast.toml`, then `THERMOCAST_*` environment variables
//! (section and key separated by `__`, e.g. `THERMOCAST_DATABASE__PATH`).

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Historical data input settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the CSV measurement export
    pub csv_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("dataexport.csv"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("weather.sqlite3"),
        }
    }
}

/// Seasonal model settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of yearly Fourier pairs
    pub yearly_order: usize,
    /// Number of weekly Fourier pairs
    pub weekly_order: usize,
    /// Band half-width in residual standard deviations
    pub band_z: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            yearly_order: 3,
            weekly_order: 2,
            band_z: 1.96,
        }
    }
}

/// Forecast generation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Default forecast length in days
    pub horizon_days: u32,
    /// Fixed seed for the perturbation source; omit for entropy seeding
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            seed: None,
        }
    }
}

/// Chart artifact settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Output path of the static chart image
    pub static_path: PathBuf,
    /// Output path of the interactive chart document
    pub interactive_path: PathBuf,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            static_path: PathBuf::from("forecast.svg"),
            interactive_path: PathBuf::from("forecast_interactive.html"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub database: DatabaseConfig,
    pub model: ModelConfig,
    pub forecast: ForecastConfig,
    pub charts: ChartConfig,
}

impl AppConfig {
    /// Load the configuration
    ///
    /// With an explicit `path` the file must exist; without one, a
    /// `thermocast.toml` in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("thermocast").required(false)),
        };
        builder = builder.add_source(Environment::with_prefix("THERMOCAST").separator("__"));

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }
}
