use serde::{Deserialize, Serialize};

use super::classify::PlotKind;

// =========================================================
// Plot data types
// =========================================================

/// One named series. `labels` carries categorical or date x values when the
/// x axis is not numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotTrace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl PlotTrace {
    pub fn numeric(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            labels: Vec::new(),
        }
    }

    pub fn categorical(name: impl Into<String>, labels: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x: Vec::new(),
            y,
            labels,
        }
    }
}

/// Chart-ready data for one plot branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<PlotTrace>,
}

impl PlotData {
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.y.len()).sum()
    }
}

/// Month by depth grid. `values[month][depth]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HovmollerGrid {
    pub title: String,
    pub months: Vec<String>,
    pub depths: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

/// One parameter sampled over depth for a single time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthTimeProfile {
    pub title: String,
    pub depths: Vec<f64>,
    pub values: Vec<f64>,
}

pub const GET_HOVMOLLER: &str = "get_hovmoller";
pub const GET_DEPTH_TIME: &str = "get_depth_time";

