use serde::{Deserialize, Serialize};

// =========================================================
// Summary types + route
// =========================================================

/// One summary card value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub method: String,
}

/// Descriptive statistics over one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub const GET_SUMMARY: &str = "get_summary";
