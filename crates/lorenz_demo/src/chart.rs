//! SVG output for the demonstration
//!
//! Two artifacts: an x/z projection of the attractor and a log-scale plot
//! of the separation between the paired trajectories.

use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

use crate::lorenz::Trajectory;

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    /// Nothing to plot
    #[error("Cannot chart an empty trajectory")]
    EmptyTrajectory,

    /// Template compilation or rendering failed
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// The artifact could not be written
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

const ATTRACTOR_TEMPLATE: &str = "attractor.svg";
const DIVERGENCE_TEMPLATE: &str = "divergence.svg";

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 700.0;
const MARGIN: f64 = 60.0;

/// Floor for the log scale; distances below it are clamped
const LOG_FLOOR: f64 = 1e-12;

#[derive(Debug, Serialize)]
struct Tick {
    position: f64,
    label: String,
}

/// Renders the demonstration charts through embedded templates
#[derive(Debug)]
pub struct ChartWriter {
    tera: Tera,
}

impl ChartWriter {
    /// Create a writer with the embedded templates
    pub fn new() -> Result<Self, ChartError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                ATTRACTOR_TEMPLATE,
                include_str!("templates/attractor.svg.tera"),
            ),
            (
                DIVERGENCE_TEMPLATE,
                include_str!("templates/divergence.svg.tera"),
            ),
        ])?;
        Ok(Self { tera })
    }

    /// Render the x/z attractor projection
    pub fn render_attractor(
        &self,
        trajectory: &Trajectory,
        output: &Path,
    ) -> Result<(), ChartError> {
        if trajectory.is_empty() {
            return Err(ChartError::EmptyTrajectory);
        }

        let xs: Vec<f64> = trajectory.states.iter().map(|s| s.x).collect();
        let zs: Vec<f64> = trajectory.states.iter().map(|s| s.z).collect();
        let (x_low, x_high) = padded_range(&xs);
        let (z_low, z_high) = padded_range(&zs);

        let points: Vec<String> = trajectory
            .states
            .iter()
            .map(|s| {
                format!(
                    "{:.2},{:.2}",
                    project(s.x, x_low, x_high, MARGIN, WIDTH - MARGIN),
                    // SVG y grows downward.
                    project(s.z, z_low, z_high, HEIGHT - MARGIN, MARGIN),
                )
            })
            .collect();

        let start = &points[0];
        let (start_x, start_y) = start
            .split_once(',')
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .unwrap_or_default();

        let mut context = Context::new();
        context.insert("width", &WIDTH);
        context.insert("height", &HEIGHT);
        context.insert("title", "Lorenz attractor (x/z projection)");
        context.insert("points", &points.join(" "));
        context.insert("start_x", &start_x);
        context.insert("start_y", &start_y);

        let svg = self.tera.render(ATTRACTOR_TEMPLATE, &context)?;
        std::fs::write(output, svg)?;
        debug!(path = %output.display(), "attractor chart written");
        Ok(())
    }

    /// Render the separation between two trajectories on a log scale
    pub fn render_divergence(
        &self,
        times: &[f64],
        distances: &[f64],
        output: &Path,
    ) -> Result<(), ChartError> {
        if times.is_empty() || times.len() != distances.len() {
            return Err(ChartError::EmptyTrajectory);
        }

        let logs: Vec<f64> = distances.iter().map(|d| d.max(LOG_FLOOR).log10()).collect();
        let (log_low, log_high) = padded_range(&logs);
        let t_high = times[times.len() - 1].max(f64::EPSILON);

        let points: Vec<String> = times
            .iter()
            .zip(&logs)
            .map(|(t, l)| {
                format!(
                    "{:.2},{:.2}",
                    project(*t, 0.0, t_high, MARGIN, WIDTH - MARGIN),
                    project(*l, log_low, log_high, HEIGHT - MARGIN, MARGIN),
                )
            })
            .collect();

        let y_ticks: Vec<Tick> = (0..=5)
            .map(|i| {
                let value = log_low + (log_high - log_low) * f64::from(i) / 5.0;
                Tick {
                    position: project(value, log_low, log_high, HEIGHT - MARGIN, MARGIN),
                    label: format!("1e{value:.0}"),
                }
            })
            .collect();
        let x_ticks: Vec<Tick> = (0..=5)
            .map(|i| {
                let value = t_high * f64::from(i) / 5.0;
                Tick {
                    position: project(value, 0.0, t_high, MARGIN, WIDTH - MARGIN),
                    label: format!("{value:.0}"),
                }
            })
            .collect();

        let mut context = Context::new();
        context.insert("width", &WIDTH);
        context.insert("height", &HEIGHT);
        context.insert("title", "Exponential divergence (butterfly effect)");
        context.insert("points", &points.join(" "));
        context.insert("x_ticks", &x_ticks);
        context.insert("y_ticks", &y_ticks);
        context.insert("margin", &MARGIN);

        let svg = self.tera.render(DIVERGENCE_TEMPLATE, &context)?;
        std::fs::write(output, svg)?;
        debug!(path = %output.display(), "divergence chart written");
        Ok(())
    }
}

/// Map `value` from `[low, high]` onto `[out_low, out_high]`
fn project(value: f64, low: f64, high: f64, out_low: f64, out_high: f64) -> f64 {
    let span = (high - low).abs().max(f64::EPSILON);
    out_low + (value - low) / span * (out_high - out_low)
}

/// Data range with five percent padding on each side
fn padded_range(values: &[f64]) -> (f64, f64) {
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = (high - low).abs().max(1e-6) * 0.05;
    (low - pad, high + pad)
}
