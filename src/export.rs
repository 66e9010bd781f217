use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;

use crate::chart::{Marker, PowerChart, format_clock};
use crate::data::power::TimeSeries;
use crate::data::time::TimeOfDay;
use crate::error::{Error, RenderError};

// ---------------------------------------------------------------------------
// Static images (plotters)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(RenderError::UnsupportedImageFormat(path.to_path_buf())),
        }
    }
}

/// Write the chart to a `.png` or `.svg` file.
pub fn write_image(chart: &PowerChart, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(chart, &root)?;
        }
        ImageFormat::Svg => {
            let svg = render_svg(chart, size)?;
            std::fs::write(path, svg)
                .map_err(|e| RenderError::Draw(format!("writing {}: {e}", path.display())))?;
        }
    }
    log::info!("Wrote chart to {}", path.display());
    Ok(())
}

/// Render the chart into an in-memory SVG document.
pub fn render_svg(chart: &PowerChart, size: (u32, u32)) -> Result<String, RenderError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        draw_chart(chart, &root)?;
    }
    Ok(buffer)
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn draw_chart<DB: DrawingBackend>(
    chart: &PowerChart,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(draw_err)?;

    let (x_range, y_range) = chart.bounds();
    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_err)?;

    let x_formatter = |x: &f64| format_clock(*x);
    let mut mesh = ctx.configure_mesh();
    mesh.x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&x_formatter);
    if !chart.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(draw_err)?;

    let color = RGBColor::from(chart.color);
    let points: Vec<(f64, f64)> = chart.points().map(|[x, y]| (x, y)).collect();

    ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
        .map_err(draw_err)?;
    if chart.marker == Marker::Circle {
        ctx.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, color.filled())),
        )
        .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Series export (CSV)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PowerRecord {
    #[serde(rename = "Time")]
    time: TimeOfDay,
    #[serde(rename = "Power")]
    power: f64,
}

/// Write the derived series as `Time,Power` rows, in sheet order.
pub fn write_series_csv(series: &TimeSeries, path: &Path) -> Result<(), Error> {
    let export_err = |e: csv::Error| Error::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(export_err)?;
    if series.is_empty() {
        writer.write_record(["Time", "Power"]).map_err(export_err)?;
    }
    for (time, power) in series.iter() {
        writer
            .serialize(PowerRecord { time, power })
            .map_err(export_err)?;
    }
    writer.flush().map_err(|e| Error::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::info!("Exported {} power samples to {}", series.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn series(rows: &[(&str, f64)]) -> TimeSeries {
        TimeSeries {
            timestamps: rows.iter().map(|(t, _)| t.parse().unwrap()).collect(),
            power: rows.iter().map(|(_, p)| *p).collect(),
        }
    }

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.svg")).unwrap(), ImageFormat::Svg);
        assert!(matches!(
            ImageFormat::from_path(Path::new("a.jpg")),
            Err(RenderError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn svg_carries_titles_and_one_marker_per_sample() {
        let chart = PowerChart::solar_power(&series(&[
            ("08:00:00", 20.0),
            ("08:00:10", 25.0),
            ("08:00:20", 22.5),
        ]));
        let svg = render_svg(&chart, (800, 600)).unwrap();

        assert!(svg.contains("Solar Panel Power"));
        assert!(svg.contains(">Time<"));
        assert!(svg.contains("Power (Watts)"));
        assert!(svg.contains("08:00:"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn empty_chart_renders() {
        let chart = PowerChart::solar_power(&TimeSeries::default());
        let svg = render_svg(&chart, (400, 300)).unwrap();

        assert!(svg.contains("Solar Panel Power"));
        assert_eq!(svg.matches("<circle").count(), 0);
    }

    #[test]
    fn writes_svg_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.svg");
        let chart = PowerChart::solar_power(&series(&[("12:00:00", 100.0)]));

        write_image(&chart, &path, (640, 480)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }

    #[test]
    fn writes_png_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.png");
        let chart = PowerChart::solar_power(&series(&[("12:00:00", 100.0), ("12:00:10", 90.0)]));

        write_image(&chart, &path, (320, 240)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn png_draws_title_and_axis_text() {
        let dir = TempDir::new().unwrap();
        let data = series(&[("12:00:00", 100.0), ("12:00:10", 90.0)]);
        let labelled = PowerChart::solar_power(&data);
        let mut bare = labelled.clone();
        bare.title.clear();
        bare.x_label.clear();
        bare.y_label.clear();

        let labelled_path = dir.path().join("labelled.png");
        let bare_path = dir.path().join("bare.png");
        write_image(&labelled, &labelled_path, (480, 360)).unwrap();
        write_image(&bare, &bare_path, (480, 360)).unwrap();

        let labelled_bytes = std::fs::read(&labelled_path).unwrap();
        let bare_bytes = std::fs::read(&bare_path).unwrap();
        assert_eq!(&labelled_bytes[..4], b"\x89PNG");
        assert_ne!(labelled_bytes, bare_bytes);
    }

    #[test]
    fn extreme_powers_render() {
        let chart = PowerChart::solar_power(&series(&[("08:00:00", -1e308), ("08:00:10", 1e308)]));
        let svg = render_svg(&chart, (400, 300)).unwrap();
        assert!(svg.contains("Solar Panel Power"));
    }

    #[test]
    fn exports_series_as_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power.csv");

        write_series_csv(&series(&[("08:00:00", 20.0), ("08:00:10", 25.5)]), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Time,Power\n08:00:00,20.0\n08:00:10,25.5\n");
    }

    #[test]
    fn exports_header_for_empty_series() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        write_series_csv(&TimeSeries::default(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Time,Power\n");
    }
}
