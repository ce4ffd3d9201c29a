//! Chart renderer port

use std::path::Path;

use domain::ForecastSet;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for rendering forecast chart artifacts
///
/// Both artifacts are derived purely from a [`ForecastSet`] and consumed by
/// nothing else in the pipeline.
#[cfg_attr(test, automock)]
pub trait ChartRenderer {
    /// Render the static chart image
    fn render_static(&self, forecast: &ForecastSet, output: &Path)
    -> Result<(), ApplicationError>;

    /// Render the interactive chart document
    fn render_interactive(
        &self,
        forecast: &ForecastSet,
        output: &Path,
    ) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ChartRenderer) {}
}
