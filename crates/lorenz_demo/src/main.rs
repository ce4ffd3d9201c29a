//! Lorenz attractor divergence demonstration
//!
//! Integrates the Lorenz system from two nearby initial states and renders
//! an attractor projection plus a log-scale plot of how the trajectories
//! separate. Entirely independent of the forecasting pipeline.

#![allow(clippy::print_stdout)]

mod chart;
mod divergence;
mod lorenz;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::chart::ChartWriter;
use crate::divergence::divergence;
use crate::lorenz::{LorenzParams, State, integrate};

/// Lorenz demonstration
#[derive(Parser)]
#[command(name = "lorenz-demo")]
#[command(version, about = "Lorenz attractor divergence demonstration", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for the chart artifacts
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Integration duration in model time
    #[arg(long, default_value = "50.0")]
    duration: f64,

    /// Number of samples along each trajectory
    #[arg(long, default_value = "5000")]
    samples: usize,

    /// Offset added to the x coordinate of the perturbed start state
    #[arg(long, default_value = "0.0001")]
    perturbation: f64,
}

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

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let params = LorenzParams::default();
    let initial = State::new(1.0, 1.0, 1.0);
    let perturbed = State::new(1.0 + cli.perturbation, 1.0, 1.0);

    println!(
        "🌀 Integrating two trajectories over t = 0..{} ({} samples)",
        cli.duration, cli.samples
    );
    let reference = integrate(&params, initial, cli.duration, cli.samples);
    let shadow = integrate(&params, perturbed, cli.duration, cli.samples);

    let distances = divergence(&reference, &shadow)?;
    let peak = distances.iter().copied().fold(0.0f64, f64::max);
    println!(
        "   Initial offset {:.1e}, peak separation {peak:.2}",
        cli.perturbation
    );

    let writer = ChartWriter::new()?;
    let attractor_path = cli.output_dir.join("lorenz.svg");
    let divergence_path = cli.output_dir.join("comparison.svg");

    writer.render_attractor(&reference, &attractor_path)?;
    println!("🖼  Attractor chart: {}", attractor_path.display());

    writer.render_divergence(&reference.times, &distances, &divergence_path)?;
    println!("🖼  Divergence chart: {}", divergence_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_mapping() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[test]
    fn cli_defaults_match_the_demonstration() {
        let cli = Cli::try_parse_from(["lorenz-demo"]).unwrap();

        assert!((cli.duration - 50.0).abs() < f64::EPSILON);
        assert_eq!(cli.samples, 5000);
        assert!((cli.perturbation - 1e-4).abs() < f64::EPSILON);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn cli_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "lorenz-demo",
            "--duration",
            "10",
            "--samples",
            "100",
            "--perturbation",
            "0.01",
        ])
        .unwrap();

        assert!((cli.duration - 10.0).abs() < f64::EPSILON);
        assert_eq!(cli.samples, 100);
    }
}
