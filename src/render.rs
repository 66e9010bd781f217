use eframe::egui;

use crate::app::PowerViewerApp;
use crate::chart::PowerChart;
use crate::config::{Config, Sink};
use crate::error::RenderError;
use crate::export;
use crate::state::ViewerState;

/// Deliver the chart to the configured sink, once.
pub fn draw(chart: PowerChart, config: &Config) -> Result<(), RenderError> {
    match &config.sink {
        Sink::Image(path) => export::write_image(&chart, path, config.size),
        Sink::Window => show_window(ViewerState::new(config.clone(), chart)),
    }
}

/// Open the interactive viewer and block until it is closed.
fn show_window(state: ViewerState) -> Result<(), RenderError> {
    if !display_available() {
        return Err(RenderError::NoDisplay);
    }

    let (width, height) = state.config.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Solar Panel Power",
        options,
        Box::new(|_cc| Ok(Box::new(PowerViewerApp::new(state)))),
    )
    .map_err(|e| RenderError::Window(e.to_string()))
}

/// X11 / Wayland need a server to talk to; other platforms always have a desktop.
#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}
