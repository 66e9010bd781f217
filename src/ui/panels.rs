use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::pick_input_file;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                ui.close_menu();
                if let Some(path) = pick_input_file() {
                    state.open(path);
                }
            }
            if ui.button("Save image…").clicked() {
                ui.close_menu();
                save_file_dialog(state);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} samples from {}",
            state.chart.samples.len(),
            state.file_name()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut ViewerState) {
    let stem = state
        .config
        .file_path
        .file_stem()
        .map_or_else(|| "power".to_string(), |s| s.to_string_lossy().into_owned());

    let file = rfd::FileDialog::new()
        .set_title("Save chart")
        .set_file_name(format!("{stem}.png"))
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .save_file();

    if let Some(path) = file {
        state.save_image(&path);
    }
}
