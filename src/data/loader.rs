use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::{
    DataType, Time32MillisecondType, Time32SecondType, Time64MicrosecondType,
    Time64NanosecondType, TimeUnit,
};
use calamine::{Data, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Reading};
use super::time::{SECONDS_PER_DAY, TimeOfDay};
use crate::config::ColumnNames;
use crate::error::DataSourceError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sheet of readings from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one reading per line
/// * `.json`    – `[{ "Time": "08:00:00", "Current": 2.0, "Voltage": 10.0 }, ...]`
/// * `.parquet` – flat schema, string or Arrow time column, numeric current / voltage
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first sheet, header in the first row
///
/// The required columns are checked before any row is read. Rows keep their
/// on-disk order.
pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<Dataset, DataSourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    log::debug!("Loading {} as .{ext}", path.display());

    let readings = match ext.as_str() {
        "csv" => load_csv(path, columns),
        "json" => load_json(path, columns),
        "parquet" | "pq" => load_parquet(path, columns),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, columns),
        other => {
            return Err(DataSourceError::UnsupportedFormat {
                extension: other.to_string(),
            });
        }
    }
    .map_err(|err| match err.downcast::<DataSourceError>() {
        Ok(typed) => typed,
        Err(err) => DataSourceError::Unreadable {
            path: path.to_path_buf(),
            reason: format!("{err:#}"),
        },
    })?;

    log::info!("Loaded {} rows from {}", readings.len(), path.display());
    Ok(Dataset {
        source: path.to_path_buf(),
        readings,
    })
}

fn missing_column(column: &str, path: &Path) -> DataSourceError {
    DataSourceError::MissingColumn {
        column: column.to_string(),
        path: path.to_path_buf(),
    }
}

/// A clock reading as `HH:MM:SS` text, wrapped into a single day.
fn clock_cell(seconds: i64) -> CellValue {
    let wrapped = seconds.rem_euclid(i64::from(SECONDS_PER_DAY));
    u32::try_from(wrapped)
        .ok()
        .and_then(TimeOfDay::from_seconds)
        .map_or(CellValue::Null, |t| CellValue::Text(t.to_string()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one reading per record.
/// Extra columns are ignored.
fn load_csv(path: &Path, columns: &ColumnNames) -> Result<Vec<Reading>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| missing_column(name, path))
    };
    let time_idx = position(&columns.time)?;
    let current_idx = position(&columns.current)?;
    let voltage_idx = position(&columns.voltage)?;

    let mut readings = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| CellValue::guess(record.get(idx).unwrap_or("").trim());
        readings.push(Reading {
            time: cell(time_idx),
            current: cell(current_idx),
            voltage: cell(voltage_idx),
        });
    }
    Ok(readings)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Time": "08:00:00", "Current": 2.0, "Voltage": 10.0 },
///   ...
/// ]
/// ```
///
/// JSON has no header, so every record must carry every required key.
fn load_json(path: &Path, columns: &ColumnNames) -> Result<Vec<Reading>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let objects = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<Vec<_>>>()?;

    for obj in &objects {
        if let Some(name) = columns.required().into_iter().find(|c| !obj.contains_key(*c)) {
            bail!(missing_column(name, path));
        }
    }

    Ok(objects
        .into_iter()
        .map(|obj| Reading {
            time: json_to_cell(&obj[&columns.time]),
            current: json_to_cell(&obj[&columns.current]),
            voltage: json_to_cell(&obj[&columns.voltage]),
        })
        .collect())
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Expected schema:
/// - time column: Utf8 / LargeUtf8 holding `HH:MM:SS` strings
/// - current / voltage columns: Float64, Float32, Int64 or Int32
fn load_parquet(path: &Path, columns: &ColumnNames) -> Result<Vec<Reading>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    // Schema check up front: an empty file may yield no batches at all.
    let schema = builder.schema().clone();
    let time_idx = schema
        .index_of(&columns.time)
        .map_err(|_| missing_column(&columns.time, path))?;
    let current_idx = schema
        .index_of(&columns.current)
        .map_err(|_| missing_column(&columns.current, path))?;
    let voltage_idx = schema
        .index_of(&columns.voltage)
        .map_err(|_| missing_column(&columns.voltage, path))?;

    let reader = builder.build().context("building parquet reader")?;

    let mut readings = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let (time, current, voltage) = (
            batch.column(time_idx),
            batch.column(current_idx),
            batch.column(voltage_idx),
        );
        for row in 0..batch.num_rows() {
            readings.push(Reading {
                time: extract_cell(time, row),
                current: extract_cell(current, row),
                voltage: extract_cell(voltage, row),
            });
        }
    }
    Ok(readings)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        // Sub-second precision is dropped.
        DataType::Time32(TimeUnit::Second) => {
            clock_cell(i64::from(col.as_primitive::<Time32SecondType>().value(row)))
        }
        DataType::Time32(TimeUnit::Millisecond) => {
            clock_cell(i64::from(col.as_primitive::<Time32MillisecondType>().value(row)) / 1_000)
        }
        DataType::Time64(TimeUnit::Microsecond) => {
            clock_cell(col.as_primitive::<Time64MicrosecondType>().value(row) / 1_000_000)
        }
        DataType::Time64(TimeUnit::Nanosecond) => {
            clock_cell(col.as_primitive::<Time64NanosecondType>().value(row) / 1_000_000_000)
        }
        other => CellValue::Text(format!("<unsupported {other} column>")),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader (calamine)
// ---------------------------------------------------------------------------

/// Read the first sheet of an Excel or OpenDocument workbook.
///
/// The first used row is the header. Time-formatted cells come back from
/// calamine as day fractions and are turned into `HH:MM:SS` text here.
fn load_workbook(path: &Path, columns: &ColumnNames) -> Result<Vec<Reading>> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let sheet = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first sheet")?;

    let mut rows = sheet.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(ToString::to_string).collect())
        .unwrap_or_default();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| missing_column(name, path))
    };
    let time_idx = position(&columns.time)?;
    let current_idx = position(&columns.current)?;
    let voltage_idx = position(&columns.voltage)?;

    Ok(rows
        .map(|row| {
            let cell = |idx: usize| row.get(idx).map_or(CellValue::Null, workbook_cell);
            Reading {
                time: cell(time_idx),
                current: cell(current_idx),
                voltage: cell(voltage_idx),
            }
        })
        .collect())
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let day_fraction = dt.as_f64().rem_euclid(1.0);
            clock_cell((day_fraction * f64::from(SECONDS_PER_DAY)).round() as i64)
        }
        // ODS stores date-times as ISO text; keep only the clock part.
        Data::DateTimeIso(s) => {
            let clock = s.split_once('T').map_or(s.as_str(), |(_, t)| t);
            CellValue::Text(clock.get(..8).unwrap_or(clock).to_string())
        }
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Null,
    }
}
