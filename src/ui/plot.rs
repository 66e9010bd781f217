use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::chart::{Marker, PowerChart, format_clock};

// ---------------------------------------------------------------------------
// Power plot (central panel)
// ---------------------------------------------------------------------------

const SERIES_NAME: &str = "Power";

/// Render the chart title and the power plot in the central panel.
pub fn power_plot(ui: &mut Ui, chart: &PowerChart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    let color = Color32::from(chart.color);
    let points: Vec<[f64; 2]> = chart.points().collect();

    let mut plot = Plot::new("power_plot")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show_grid(chart.grid)
        .x_axis_formatter(|mark: GridMark, _range| format_clock(mark.value))
        .label_formatter(|name: &str, value: &PlotPoint| {
            let time = format_clock(value.x);
            if name.is_empty() {
                format!("{time}\n{:.2} W", value.y)
            } else {
                format!("{name}\n{time}\n{:.2} W", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if chart.is_empty() {
        let (x, y) = chart.bounds();
        plot = plot
            .include_x(x.start)
            .include_x(x.end)
            .include_y(y.start)
            .include_y(y.end);
    }

    plot.show(ui, |plot_ui| {
        let line = Line::new(PlotPoints::from(points.clone()))
            .name(SERIES_NAME)
            .color(color)
            .width(1.5);
        plot_ui.line(line);

        if chart.marker == Marker::Circle {
            let markers = Points::new(PlotPoints::from(points))
                .name(SERIES_NAME)
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(3.0)
                .color(color);
            plot_ui.points(markers);
        }
    });
}
