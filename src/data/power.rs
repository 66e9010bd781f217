use super::model::{CellValue, Dataset};
use super::time::TimeOfDay;
use crate::config::ColumnNames;
use crate::error::Error;

// ---------------------------------------------------------------------------
// TimeSeries – timestamps paired with derived power
// ---------------------------------------------------------------------------

/// Power samples aligned with their timestamps by index, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub timestamps: Vec<TimeOfDay>,
    /// Watts: `voltage[i] * current[i]`.
    pub power: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Whether timestamps never go backwards. Unsorted sheets are plotted as-is.
    pub fn is_chronological(&self) -> bool {
        self.timestamps.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeOfDay, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.power.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Transformer
// ---------------------------------------------------------------------------

/// Parse every timestamp and multiply voltage by current, row by row.
/// The first bad row aborts; no partial series is returned.
pub fn derive_power(dataset: &Dataset, columns: &ColumnNames) -> Result<TimeSeries, Error> {
    let mut series = TimeSeries {
        timestamps: Vec::with_capacity(dataset.len()),
        power: Vec::with_capacity(dataset.len()),
    };

    for (row, reading) in dataset.readings.iter().enumerate() {
        let time = parse_time(&reading.time, row)?;
        let current = numeric(&reading.current, row, &columns.current)?;
        let voltage = numeric(&reading.voltage, row, &columns.voltage)?;

        series.timestamps.push(time);
        series.power.push(voltage * current);
    }

    Ok(series)
}

fn parse_time(cell: &CellValue, row: usize) -> Result<TimeOfDay, Error> {
    cell.as_text()
        .and_then(|s| TimeOfDay::parse(s).ok())
        .ok_or_else(|| Error::Parse {
            row,
            raw: cell.to_string(),
        })
}

fn numeric(cell: &CellValue, row: usize, column: &str) -> Result<f64, Error> {
    cell.as_f64().ok_or_else(|| Error::NonNumeric {
        row,
        column: column.to_string(),
        raw: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use proptest::prelude::*;

    use super::*;
    use crate::data::model::Reading;

    fn dataset(rows: &[(&str, CellValue, CellValue)]) -> Dataset {
        Dataset {
            source: PathBuf::from("test.csv"),
            readings: rows
                .iter()
                .map(|(t, c, v)| Reading {
                    time: CellValue::Text((*t).to_string()),
                    current: c.clone(),
                    voltage: v.clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn multiplies_voltage_by_current() {
        let ds = dataset(&[
            ("08:00:00", CellValue::Float(2.0), CellValue::Float(10.0)),
            ("08:00:10", CellValue::Float(2.5), CellValue::Float(10.0)),
        ]);
        let series = derive_power(&ds, &ColumnNames::default()).unwrap();

        assert_eq!(
            series.timestamps,
            vec![
                TimeOfDay::from_hms(8, 0, 0).unwrap(),
                TimeOfDay::from_hms(8, 0, 10).unwrap()
            ]
        );
        assert_eq!(series.power, vec![20.0, 25.0]);
        assert!(series.is_chronological());
    }

    #[test]
    fn integer_cells_count_as_numbers() {
        let ds = dataset(&[("12:00:00", CellValue::Integer(3), CellValue::Float(18.5))]);
        let series = derive_power(&ds, &ColumnNames::default()).unwrap();
        assert_eq!(series.power, vec![55.5]);
    }

    #[test]
    fn empty_dataset_yields_empty_series() {
        let series = derive_power(&dataset(&[]), &ColumnNames::default()).unwrap();
        assert!(series.is_empty());
        assert!(series.power.is_empty());
        assert!(series.is_chronological());
    }

    #[test]
    fn unsorted_rows_keep_sheet_order() {
        let ds = dataset(&[
            ("09:00:00", CellValue::Float(1.0), CellValue::Float(1.0)),
            ("08:00:00", CellValue::Float(2.0), CellValue::Float(1.0)),
        ]);
        let series = derive_power(&ds, &ColumnNames::default()).unwrap();
        assert_eq!(series.power, vec![1.0, 2.0]);
        assert!(!series.is_chronological());
    }

    #[test]
    fn malformed_time_reports_its_row() {
        for bad in ["25:61:00", "not-a-time"] {
            let ds = dataset(&[
                ("08:00:00", CellValue::Float(2.0), CellValue::Float(10.0)),
                (bad, CellValue::Float(2.0), CellValue::Float(10.0)),
            ]);
            match derive_power(&ds, &ColumnNames::default()) {
                Err(Error::Parse { row, raw }) => {
                    assert_eq!(row, 1);
                    assert_eq!(raw, bad);
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn numeric_time_cell_is_a_parse_error() {
        let mut ds = dataset(&[("08:00:00", CellValue::Float(2.0), CellValue::Float(10.0))]);
        ds.readings[0].time = CellValue::Integer(800);
        assert!(matches!(
            derive_power(&ds, &ColumnNames::default()),
            Err(Error::Parse { row: 0, .. })
        ));
    }

    #[test]
    fn non_numeric_cells_report_row_and_column() {
        let ds = dataset(&[
            ("08:00:00", CellValue::Float(2.0), CellValue::Float(10.0)),
            ("08:00:10", CellValue::Float(2.0), CellValue::Float(10.0)),
            ("08:00:20", CellValue::Text("N/A".into()), CellValue::Float(10.0)),
        ]);
        match derive_power(&ds, &ColumnNames::default()) {
            Err(Error::NonNumeric { row, column, raw }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Current");
                assert_eq!(raw, "N/A");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let ds = dataset(&[("08:00:00", CellValue::Float(2.0), CellValue::Null)]);
        assert!(matches!(
            derive_power(&ds, &ColumnNames::default()),
            Err(Error::NonNumeric { row: 0, ref column, .. }) if column == "Voltage"
        ));
    }

    proptest! {
        #[test]
        fn power_is_the_exact_product(
            rows in prop::collection::vec(
                (0u32..24, 0u32..60, 0u32..60, -50.0f64..50.0, -1000.0f64..1000.0),
                0..64,
            )
        ) {
            let ds = Dataset {
                source: PathBuf::from("prop.csv"),
                readings: rows
                    .iter()
                    .map(|&(h, m, s, current, voltage)| Reading {
                        time: CellValue::Text(format!("{h:02}:{m:02}:{s:02}")),
                        current: CellValue::Float(current),
                        voltage: CellValue::Float(voltage),
                    })
                    .collect(),
            };

            let series = derive_power(&ds, &ColumnNames::default()).unwrap();
            prop_assert_eq!(series.len(), rows.len());
            prop_assert_eq!(series.power.len(), rows.len());
            for (i, &(h, m, s, current, voltage)) in rows.iter().enumerate() {
                prop_assert_eq!(series.power[i].to_bits(), (voltage * current).to_bits());
                prop_assert_eq!(series.timestamps[i].seconds_from_midnight(), h * 3600 + m * 60 + s);
            }
        }
    }
}
