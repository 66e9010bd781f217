use std::path::PathBuf;

use clap::Parser;

use crate::error::{DataSourceError, Error};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Plot solar panel power (voltage × current) over the time of day.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Sheet to read (.csv, .json, .parquet, .xlsx, .xls or .ods). Opens a file dialog when omitted.
    pub file_path: Option<PathBuf>,

    /// Column holding HH:MM:SS timestamps.
    #[arg(long, default_value = "Time")]
    pub time_column: String,

    /// Column holding the panel current in amperes.
    #[arg(long, default_value = "Current")]
    pub current_column: String,

    /// Column holding the panel voltage in volts.
    #[arg(long, default_value = "Voltage")]
    pub voltage_column: String,

    /// Write the chart to this .png or .svg file instead of opening a window.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the derived power series to this CSV file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Window or image width in pixels.
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Window or image height in pixels.
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Names of the three required columns, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub time: String,
    pub current: String,
    pub voltage: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            time: "Time".to_string(),
            current: "Current".to_string(),
            voltage: "Voltage".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn required(&self) -> [&str; 3] {
        [&self.time, &self.current, &self.voltage]
    }
}

/// Where the chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Window,
    Image(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_path: PathBuf,
    pub columns: ColumnNames,
    pub sink: Sink,
    pub export: Option<PathBuf>,
    pub size: (u32, u32),
}

impl Config {
    /// Resolve the command line. A missing input path is asked for with a
    /// file dialog, which only makes sense when a window will be shown.
    pub fn from_cli(cli: Cli) -> Result<Self, Error> {
        let sink = match cli.output {
            Some(path) => Sink::Image(path),
            None => Sink::Window,
        };
        let file_path = match cli.file_path {
            Some(path) => path,
            None if sink == Sink::Window => pick_input_file().ok_or(DataSourceError::NoInput)?,
            None => return Err(DataSourceError::NoInput.into()),
        };
        Ok(Self {
            file_path,
            columns: ColumnNames {
                time: cli.time_column,
                current: cli.current_column,
                voltage: cli.voltage_column,
            },
            sink,
            export: cli.export,
            size: (cli.width, cli.height),
        })
    }
}

pub fn pick_input_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open solar panel readings")
        .add_filter(
            "Supported files",
            &["csv", "json", "parquet", "pq", "xlsx", "xlsm", "xlsb", "xls", "ods"],
        )
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .pick_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sheet_layout() {
        let cli = Cli::try_parse_from(["solar-power-plot", "day.csv"]).unwrap();
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.file_path, PathBuf::from("day.csv"));
        assert_eq!(config.columns, ColumnNames::default());
        assert_eq!(config.columns.required(), ["Time", "Current", "Voltage"]);
        assert_eq!(config.sink, Sink::Window);
        assert_eq!(config.export, None);
        assert_eq!(config.size, (1200, 800));
    }

    #[test]
    fn output_flag_selects_the_image_sink() {
        let cli = Cli::try_parse_from([
            "solar-power-plot",
            "day.parquet",
            "--voltage-column",
            "Volt",
            "-o",
            "power.svg",
            "--width",
            "640",
        ])
        .unwrap();
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.columns.voltage, "Volt");
        assert_eq!(config.sink, Sink::Image(PathBuf::from("power.svg")));
        assert_eq!(config.size, (640, 800));
    }

    #[test]
    fn headless_run_without_input_is_an_error() {
        let cli = Cli::try_parse_from(["solar-power-plot", "--output", "power.png"]).unwrap();
        let err = Config::from_cli(cli).unwrap_err();
        assert!(matches!(err, Error::DataSource(DataSourceError::NoInput)));
    }
}
