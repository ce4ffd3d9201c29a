//! Thermocast CLI
//!
//! Command-line interface for the forecast pipeline: import historical
//! data, fit the seasonal model, generate and persist forecasts, evaluate
//! accuracy and inspect the store.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context as _;
use application::{ChartOutputs, ForecastService, ForecastStore, ObservationSource, SeasonalModel};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use domain::Horizon;
use infrastructure::{
    AppConfig, CsvObservationLoader, GaussianNoise, HarmonicRegression, SqliteForecastStore,
    TeraChartRenderer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Thermocast CLI
#[derive(Parser)]
#[command(name = "thermocast-cli")]
#[command(version, about = "Seasonal temperature forecasting", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path of the configuration file (defaults to ./thermocast.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the forecast pipeline: load, fit, predict, check, persist, chart
    Forecast {
        /// CSV export with historical temperatures (overrides config)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Forecast length in days (overrides config)
        #[arg(short, long)]
        days: Option<u32>,

        /// First forecast date, YYYY-MM-DD (default: day after last observation)
        #[arg(short, long)]
        anchor: Option<NaiveDate>,
    },

    /// Evaluate forecast accuracy on the most recent observations
    Evaluate {
        /// CSV export with historical temperatures (overrides config)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Number of trailing observations held out for evaluation
        #[arg(long, default_value = "30")]
        holdout: usize,
    },

    /// Create the forecast table if it does not exist yet
    InitDb,

    /// Show how many forecast rows the store holds
    Status,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Forecast { csv, days, anchor } => {
            let csv_path = csv.unwrap_or_else(|| config.data.csv_path.clone());
            let horizon = Horizon::new(days.unwrap_or(config.forecast.horizon_days))
                .context("invalid forecast length")?;

            let noise = match config.forecast.seed {
                Some(seed) => GaussianNoise::seeded(seed),
                None => GaussianNoise::from_entropy(),
            };

            let mut service = ForecastService::new(
                Box::new(CsvObservationLoader::new(csv_path)),
                Box::new(HarmonicRegression::new(
                    config.model.yearly_order,
                    config.model.weekly_order,
                    config.model.band_z,
                )),
                Box::new(noise),
                Box::new(SqliteForecastStore::new(config.database.path.clone())),
                Box::new(TeraChartRenderer::new().context("initializing chart templates")?),
            );

            let outputs = ChartOutputs {
                static_chart: config.charts.static_path.clone(),
                interactive_chart: config.charts.interactive_path.clone(),
            };

            let report = service.run(anchor, horizon, &outputs)?;

            println!("📈 Forecast generated: {} days", report.forecast.len());
            println!("✅ {}", report.verdict.reason);
            println!(
                "💾 {} rows written to {}",
                report.rows_inserted,
                config.database.path.display()
            );
            println!("🖼  Static chart: {}", outputs.static_chart.display());
            println!(
                "🌐 Interactive chart: {}",
                outputs.interactive_chart.display()
            );
            for row in report.forecast.iter().take(7) {
                println!("   {}  {}", row.date, row.label);
            }
            if report.forecast.len() > 7 {
                println!("   …");
            }
        },

        Commands::Evaluate { csv, holdout } => {
            let csv_path = csv.unwrap_or_else(|| config.data.csv_path.clone());
            let series = CsvObservationLoader::new(csv_path).load()?;
            let (training, holdout_series) = series.split_tail(holdout);

            let model = HarmonicRegression::new(
                config.model.yearly_order,
                config.model.weekly_order,
                config.model.band_z,
            );
            let fitted = model.fit(&training)?;
            let report = application::evaluate(fitted.as_ref(), &holdout_series)?;

            println!("🔎 Evaluation over {} held-out days", holdout_series.len());
            println!("   MAE:  {:.2}°C", report.mae);
            println!("   RMSE: {:.2}°C", report.rmse);
            println!("   Within band: {:.1}%", report.within_band_percent);
        },

        Commands::InitDb => {
            let store = SqliteForecastStore::new(config.database.path.clone());
            store.initialize()?;
            println!("🗄  Forecast table ready in {}", config.database.path.display());
        },

        Commands::Status => {
            let store = SqliteForecastStore::new(config.database.path.clone());
            let rows = store.row_count()?;
            println!(
                "📊 {} forecast rows in {}",
                rows,
                config.database.path.display()
            );
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn cli_parses_forecast_command() {
        let cli = Cli::try_parse_from([
            "thermocast-cli",
            "-v",
            "forecast",
            "--csv",
            "export.csv",
            "--days",
            "14",
            "--anchor",
            "2021-06-01",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Forecast { csv, days, anchor } => {
                assert_eq!(csv, Some(PathBuf::from("export.csv")));
                assert_eq!(days, Some(14));
                assert_eq!(
                    anchor,
                    Some(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap())
                );
            },
            _ => unreachable!("expected forecast command"),
        }
    }

    #[test]
    fn cli_rejects_malformed_anchor() {
        let result =
            Cli::try_parse_from(["thermocast-cli", "forecast", "--anchor", "June 1st"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_evaluate_defaults() {
        let cli = Cli::try_parse_from(["thermocast-cli", "evaluate"]).unwrap();
        match cli.command {
            Commands::Evaluate { csv, holdout } => {
                assert_eq!(csv, None);
                assert_eq!(holdout, 30);
            },
            _ => unreachable!("expected evaluate command"),
        }
    }
}
