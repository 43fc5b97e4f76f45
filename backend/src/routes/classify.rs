use crate::models::{FilterSpec, Parameter};
use serde::{Deserialize, Serialize};

// =========================================================
// Query classification types + route
// =========================================================

/// Analysis flavour requested by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    ProfileAnalysis,
    TimeSeries,
    RegionalComparison,
    CorrelationAnalysis,
}

impl AnalysisType {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::ProfileAnalysis => "Profile Analysis",
            AnalysisType::TimeSeries => "Time Series",
            AnalysisType::RegionalComparison => "Regional Comparison",
            AnalysisType::CorrelationAnalysis => "Correlation Analysis",
        }
    }
}

/// Chart branch selected for a query. Exactly one per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    TemperatureProfile,
    SalinityProfile,
    TimeSeries,
    RegionalComparison,
    Correlation,
    Overview,
}

/// Everything the classifier extracted from one free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryClassification {
    pub filters: FilterSpec,
    /// Informational only; never narrows the dataset.
    pub parameter_focus: Option<Parameter>,
    pub analysis_type: Option<AnalysisType>,
    pub plot: PlotKind,
}

impl QueryClassification {
    /// True when the query produced neither filters nor annotations.
    pub fn is_empty(&self) -> bool {
        self.filters.is_unconstrained()
            && self.parameter_focus.is_none()
            && self.analysis_type.is_none()
    }
}

/// Request body for `POST /v1/classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub query: String,
}

pub const CLASSIFY_QUERY: &str = "classify_query";
