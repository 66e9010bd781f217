use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Every way a run can fail. Each one aborts the run; there is no
/// skip-and-continue for bad rows.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// `row` is the 0-based data row (the header is not counted).
    #[error("row {row}: `{raw}` is not a HH:MM:SS time of day")]
    Parse { row: usize, raw: String },

    #[error("row {row}: `{raw}` in column '{column}' is not a number")]
    NonNumeric {
        row: usize,
        column: String,
        raw: String,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("exporting power series to {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

/// The input sheet could not be turned into a dataset.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("no input file selected")]
    NoInput,

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("{} has no '{column}' column", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("reading {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// The chart could not be delivered to its sink.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no display available (set DISPLAY / WAYLAND_DISPLAY or pass --output)")]
    NoDisplay,

    #[error("window: {0}")]
    Window(String),

    #[error("drawing chart: {0}")]
    Draw(String),

    #[error("unsupported image format for {} (use .png or .svg)", .0.display())]
    UnsupportedImageFormat(PathBuf),
}
