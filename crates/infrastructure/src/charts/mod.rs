//! Forecast chart artifacts
//!
//! Renders the static SVG image and the interactive HTML document from a
//! [`ForecastSet`] through embedded Tera templates. All geometry is computed
//! here; the templates only place prepared coordinates.

use std::path::Path;

use application::{ApplicationError, ChartRenderer};
use domain::ForecastSet;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, instrument};

/// Error type for chart rendering
#[derive(Debug, Error)]
pub enum ChartError {
    /// Charts cannot be derived from an empty forecast
    #[error("Cannot chart an empty forecast")]
    EmptyForecast,

    /// Template compilation or rendering failed
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// The artifact could not be written
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

const STATIC_TEMPLATE: &str = "forecast.svg";
const INTERACTIVE_TEMPLATE: &str = "forecast.html";

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Vertical headroom added above and below the band extremes
const Y_PADDING: f64 = 2.0;

#[derive(Debug, Serialize)]
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

#[derive(Debug, Serialize)]
struct Tick {
    position: f64,
    label: String,
}

#[derive(Debug, Serialize)]
struct PointMarker {
    x: f64,
    y_min: f64,
    y_max: f64,
    date: String,
    label: String,
}

/// Tera-backed renderer for both chart artifacts
#[derive(Debug)]
pub struct TeraChartRenderer {
    tera: Tera,
}

impl TeraChartRenderer {
    /// Create a renderer with the embedded templates
    pub fn new() -> Result<Self, ChartError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (STATIC_TEMPLATE, include_str!("templates/forecast.svg.tera")),
            (
                INTERACTIVE_TEMPLATE,
                include_str!("templates/forecast.html.tera"),
            ),
        ])?;
        Ok(Self { tera })
    }

    /// Render the static SVG image
    #[instrument(skip(self, forecast), fields(rows = forecast.len()))]
    pub fn render_svg(&self, forecast: &ForecastSet, output: &Path) -> Result<(), ChartError> {
        let context = build_context(forecast)?;
        let svg = self.tera.render(STATIC_TEMPLATE, &context)?;
        std::fs::write(output, svg)?;
        debug!(path = %output.display(), "static chart written");
        Ok(())
    }

    /// Render the interactive HTML document
    #[instrument(skip(self, forecast), fields(rows = forecast.len()))]
    pub fn render_html(&self, forecast: &ForecastSet, output: &Path) -> Result<(), ChartError> {
        let context = build_context(forecast)?;
        let html = self.tera.render(INTERACTIVE_TEMPLATE, &context)?;
        std::fs::write(output, html)?;
        debug!(path = %output.display(), "interactive chart written");
        Ok(())
    }
}

impl ChartRenderer for TeraChartRenderer {
    fn render_static(
        &self,
        forecast: &ForecastSet,
        output: &Path,
    ) -> Result<(), ApplicationError> {
        self.render_svg(forecast, output)
            .map_err(|e| ApplicationError::Chart(e.to_string()))
    }

    fn render_interactive(
        &self,
        forecast: &ForecastSet,
        output: &Path,
    ) -> Result<(), ApplicationError> {
        self.render_html(forecast, output)
            .map_err(|e| ApplicationError::Chart(e.to_string()))
    }
}

/// Compute the chart geometry and assemble the template context
fn build_context(forecast: &ForecastSet) -> Result<Context, ChartError> {
    let rows = forecast.rows();
    if rows.is_empty() {
        return Err(ChartError::EmptyForecast);
    }

    let y_low = forecast.coldest_min().unwrap_or(0.0) - Y_PADDING;
    let y_high = forecast.hottest_max().unwrap_or(0.0) + Y_PADDING;
    let y_span = (y_high - y_low).max(f64::EPSILON);

    let plot = PlotArea {
        left: MARGIN_LEFT,
        right: WIDTH - MARGIN_RIGHT,
        top: MARGIN_TOP,
        bottom: HEIGHT - MARGIN_BOTTOM,
    };
    let plot_width = plot.right - plot.left;
    let plot_height = plot.bottom - plot.top;

    #[allow(clippy::cast_precision_loss)]
    let x_step = plot_width / (rows.len() - 1).max(1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let x_at = |i: usize| plot.left + i as f64 * x_step;
    let y_at = |t: f64| plot.top + (y_high - t) / y_span * plot_height;

    let min_points: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{:.1},{:.1}", x_at(i), y_at(r.min_temp)))
        .collect();
    let max_points: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{:.1},{:.1}", x_at(i), y_at(r.max_temp)))
        .collect();

    // Band polygon: max curve left to right, then min curve back.
    let band_points: Vec<String> = max_points
        .iter()
        .chain(min_points.iter().rev())
        .cloned()
        .collect();

    let markers: Vec<PointMarker> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| PointMarker {
            x: x_at(i),
            y_min: y_at(r.min_temp),
            y_max: y_at(r.max_temp),
            date: r.date.format("%Y-%m-%d").to_string(),
            label: r.label.clone(),
        })
        .collect();

    let tick_stride = rows.len().div_ceil(8).max(1);
    let x_ticks: Vec<Tick> = rows
        .iter()
        .enumerate()
        .step_by(tick_stride)
        .map(|(i, r)| Tick {
            position: x_at(i),
            label: r.date.format("%m-%d").to_string(),
        })
        .collect();

    let y_ticks: Vec<Tick> = (0..=5)
        .map(|i| {
            let value = y_low + y_span * f64::from(i) / 5.0;
            Tick {
                position: y_at(value),
                label: format!("{value:.1}"),
            }
        })
        .collect();

    let anchor = rows[0].date;
    let last = rows[rows.len() - 1].date;

    let mut context = Context::new();
    context.insert("title", &format!("Temperature forecast {anchor} to {last}"));
    context.insert("width", &WIDTH);
    context.insert("height", &HEIGHT);
    context.insert("plot", &plot);
    context.insert("band_points", &band_points.join(" "));
    context.insert("min_points", &min_points.join(" "));
    context.insert("max_points", &max_points.join(" "));
    context.insert("markers", &markers);
    context.insert("x_ticks", &x_ticks);
    context.insert("y_ticks", &y_ticks);
    Ok(context)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::ForecastRow;
    use tempfile::TempDir;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_forecast(len: u32) -> ForecastSet {
        ForecastSet::new(
            (0..len)
                .map(|i| {
                    ForecastRow::from_bounds(
                        date(2021, 6, 1) + chrono::Duration::days(i64::from(i)),
                        8.0 + f64::from(i % 5),
                        16.0 + f64::from(i % 7),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn static_chart_is_valid_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forecast.svg");
        let renderer = TeraChartRenderer::new().unwrap();

        renderer.render_svg(&sample_forecast(14), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("polyline"));
        assert!(svg.contains("Temperature forecast"));
    }

    #[test]
    fn interactive_chart_is_a_standalone_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forecast.html");
        let renderer = TeraChartRenderer::new().unwrap();

        renderer.render_html(&sample_forecast(14), &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("tooltip"));
    }

    #[test]
    fn single_row_forecast_renders() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("single.svg");
        let renderer = TeraChartRenderer::new().unwrap();

        renderer.render_svg(&sample_forecast(1), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_forecast_is_rejected() {
        let dir = TempDir::new().unwrap();
        let renderer = TeraChartRenderer::new().unwrap();

        let err = renderer
            .render_svg(&ForecastSet::new(vec![]), &dir.path().join("x.svg"))
            .unwrap_err();
        assert!(matches!(err, ChartError::EmptyForecast));
    }

    #[test]
    fn unwritable_output_surfaces_io_error() {
        let renderer = TeraChartRenderer::new().unwrap();

        let err = renderer
            .render_svg(
                &sample_forecast(3),
                Path::new("/nonexistent/dir/forecast.svg"),
            )
            .unwrap_err();
        assert!(matches!(err, ChartError::Io(_)));
    }

    #[test]
    fn port_impl_maps_errors() {
        let renderer = TeraChartRenderer::new().unwrap();

        let err = renderer
            .render_interactive(
                &ForecastSet::new(vec![]),
                Path::new("/tmp/never-written.html"),
            )
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Chart(_)));
    }

    #[test]
    fn markers_carry_row_labels() {
        let context = build_context(&sample_forecast(3)).unwrap();
        let json = context.into_json();
        let markers = json.get("markers").unwrap().as_array().unwrap();

        assert_eq!(markers.len(), 3);
        assert!(
            markers[0]
                .get("label")
                .unwrap()
                .as_str()
                .unwrap()
                .contains("°C")
        );
    }
}
