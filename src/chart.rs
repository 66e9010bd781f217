use std::ops::Range;

use crate::color::{Rgb8, series_color};
use crate::data::power::TimeSeries;
use crate::data::time::{SECONDS_PER_DAY, TimeOfDay};

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
}

/// Everything needed to draw a power chart, independent of any backend.
///
/// Built up with the `with_*` methods and handed to [`crate::render::draw`]
/// once. x is seconds since midnight, y is watts.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub marker: Marker,
    pub line: LineStyle,
    pub color: Rgb8,
    pub samples: Vec<(TimeOfDay, f64)>,
}

impl PowerChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            grid: false,
            marker: Marker::None,
            line: LineStyle::Solid,
            color: series_color(),
            samples: Vec::new(),
        }
    }

    /// The solar panel chart: time of day against power, gridded, circle markers.
    pub fn solar_power(series: &TimeSeries) -> Self {
        Self::new("Solar Panel Power")
            .with_axis_labels("Time", "Power (Watts)")
            .with_grid(true)
            .with_marker(Marker::Circle)
            .with_series(series)
    }

    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_series(mut self, series: &TimeSeries) -> Self {
        self.samples = series.iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Plot coordinates in sheet order.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.samples
            .iter()
            .map(|(t, p)| [f64::from(t.seconds_from_midnight()), *p])
    }

    /// Axis ranges that fit every point. An empty chart spans the whole day
    /// over 0..1 W; single points and flat lines get padding so the ranges
    /// never collapse.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        if self.samples.is_empty() {
            return (0.0..f64::from(SECONDS_PER_DAY), 0.0..1.0);
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for [x, y] in self.points() {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            if y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !y_min.is_finite() {
            (y_min, y_max) = (0.0, 1.0);
        }

        let x_pad = if x_max - x_min < 1.0 { 30.0 } else { 0.0 };
        // Scale each end separately: `y_max - y_min` overflows for powers near ±f64::MAX.
        let y_pad = if (y_max - y_min).abs() < 1e-10 {
            y_max.abs() * 0.05 + 0.1
        } else {
            y_max * 0.05 - y_min * 0.05
        };
        let (mut y_lo, mut y_hi) = (y_min - y_pad, y_max + y_pad);
        if !(y_hi - y_lo).is_finite() {
            // Plotters needs a finite span to place ticks.
            y_lo = y_lo.max(-f64::MAX / 2.0);
            y_hi = y_hi.min(f64::MAX / 2.0);
        }

        ((x_min - x_pad)..(x_max + x_pad), y_lo..y_hi)
    }
}

/// Format an x coordinate (seconds since midnight) as `HH:MM:SS`.
/// Rounds to the nearest second and wraps around midnight.
pub fn format_clock(seconds: f64) -> String {
    let total = (seconds.round() as i64).rem_euclid(i64::from(SECONDS_PER_DAY));
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}
