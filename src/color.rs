use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Series colour
// ---------------------------------------------------------------------------

/// Hue of the power series, in degrees.
const SERIES_HUE: f32 = 210.0;

/// An 8-bit sRGB colour shared by the window and the image exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hsl: Hsl = Hsl::new(hue, saturation, lightness);
        let rgb: Srgb = hsl.into_color();
        Rgb8 {
            r: (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }
}

impl From<Rgb8> for Color32 {
    fn from(c: Rgb8) -> Self {
        Color32::from_rgb(c.r, c.g, c.b)
    }
}

impl From<Rgb8> for RGBColor {
    fn from(c: Rgb8) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

/// The one colour every power chart is drawn in.
pub fn series_color() -> Rgb8 {
    Rgb8::from_hsl(SERIES_HUE, 0.75, 0.45)
}
