use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as delivered by the tabular readers.
/// Typing is checked later, row by row, by the transformer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<empty>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell; only integers and floats qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Type a raw CSV field: integer, float, boolean, then text.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Reading – one row, narrowed to the three columns we use
// ---------------------------------------------------------------------------

/// One row of the sheet after the schema check.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub time: CellValue,
    pub current: CellValue,
    pub voltage: CellValue,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded sheet
// ---------------------------------------------------------------------------

/// All rows in on-disk order. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: PathBuf,
    pub readings: Vec<Reading>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
