use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

// =========================================================
// Export types + route
// =========================================================

/// Typed export cell. Dates are only rendered to text at the CSV boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Text(String),
    Number(f64),
    Integer(u32),
    Date(NaiveDate),
}

impl fmt::Display for ExportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportValue::Text(s) => f.write_str(s),
            ExportValue::Number(v) => write!(f, "{}", v),
            ExportValue::Integer(v) => write!(f, "{}", v),
            ExportValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for ExportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExportValue::Number(v) => serializer.serialize_f64(*v),
            ExportValue::Integer(v) => serializer.serialize_u32(*v),
            other => serializer.collect_str(other),
        }
    }
}

/// Column-projected, display-renamed table ready for download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<ExportValue>>,
}

impl ExportTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub const EXPORT_CSV: &str = "export_csv";
pub const EXPORT_FILE_NAME: &str = "floatchat_filtered_export.csv";
