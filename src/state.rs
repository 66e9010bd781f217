use std::path::{Path, PathBuf};

use crate::chart::PowerChart;
use crate::config::Config;
use crate::data::load_power_series;
use crate::export;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct ViewerState {
    /// Source path, column names and image size of the current chart.
    pub config: Config,

    /// Chart on screen. Replaced only when a reload succeeds.
    pub chart: PowerChart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(config: Config, chart: PowerChart) -> Self {
        Self {
            config,
            chart,
            status_message: None,
        }
    }

    pub fn file_name(&self) -> String {
        self.config
            .file_path
            .file_name()
            .map_or_else(|| self.config.file_path.display().to_string(), |n| {
                n.to_string_lossy().into_owned()
            })
    }

    /// Re-run the pipeline on another sheet with the same column names.
    /// On failure the current chart stays and the error is shown.
    pub fn open(&mut self, path: PathBuf) {
        match load_power_series(&path, &self.config.columns) {
            Ok(series) => {
                self.chart = PowerChart::solar_power(&series);
                self.config.file_path = path;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Save the current chart as PNG or SVG.
    pub fn save_image(&mut self, path: &Path) {
        match export::write_image(&self.chart, path, self.config.size) {
            Ok(()) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to save chart: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
