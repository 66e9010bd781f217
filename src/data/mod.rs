/// Data layer: loading, time parsing, and power derivation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / .xlsx / .xls / .ods
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  schema check → Dataset (Reading rows, disk order)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  power    │  parse HH:MM:SS, voltage × current → TimeSeries
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod power;
pub mod time;

use std::path::Path;

use crate::config::ColumnNames;
use crate::error::Error;
use power::TimeSeries;

/// Load a sheet and derive its power series.
pub fn load_power_series(path: &Path, columns: &ColumnNames) -> Result<TimeSeries, Error> {
    let dataset = loader::load_file(path, columns)?;
    if dataset.is_empty() {
        log::warn!("{} has no data rows; the chart will be empty", path.display());
    }
    let series = power::derive_power(&dataset, columns)?;

    if !series.is_chronological() {
        log::warn!(
            "{}: '{}' column is not in chronological order; plotting rows as they appear",
            path.display(),
            columns.time
        );
    }
    log::info!("Derived {} power samples", series.len());
    Ok(series)
}
