//! Free-text query classification.
//!
//! Ordered, case-insensitive substring matching over fixed keyword groups.
//! Groups are independent of each other; only the plot branch is a strict
//! priority chain.

use crate::api::{AnalysisType, PlotKind, QueryClassification};
use crate::models::{DepthColumn, FilterSpec, FloatStatus, FloatType, Parameter, REGION_CONFIGS};

// Behaviour change: the inactive group is tested before the active group.
// Testing "active" first classified "inactive floats" as Active, because
// "inactive" and "not working" contain "active" and "working".
const INACTIVE_WORDS: &[&str] = &["inactive", "not working", "dead"];
const ACTIVE_WORDS: &[&str] = &["active", "working", "operational"];

const SHALLOW_WORDS: &[&str] = &["shallow", "surface", "top"];
const DEEP_WORDS: &[&str] = &["deep", "bottom", "abyssal"];

// "deep" belongs to the depth adjectives, not to the mission class.
const FLOAT_TYPE_WORDS: &[(&str, FloatType)] = &[
    ("apex", FloatType::Apex),
    ("nova", FloatType::Nova),
    ("arvor", FloatType::Arvor),
    ("provor", FloatType::Provor),
    ("solo", FloatType::Solo),
    ("core", FloatType::Core),
    ("bio", FloatType::Bio),
];

pub(crate) const TEMPERATURE_WORDS: &[&str] = &["temperature", "temp", "thermal"];
pub(crate) const SALINITY_WORDS: &[&str] = &["salinity", "salt", "psu"];

const PROFILE_WORDS: &[&str] = &["profile", "depth"];
const TIME_WORDS: &[&str] = &["time", "trend", "temporal", "monthly"];
const COMPARE_WORDS: &[&str] = &["compare", "comparison", "versus", "vs"];
const CORRELATION_WORDS: &[&str] = &["correlation", "relationship"];

const PLOT_TIME_WORDS: &[&str] = &["trend", "time", "series", "monthly"];
const PLOT_COMPARE_WORDS: &[&str] = &["compare", "comparison"];

pub(crate) fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Classify against the regional catalog's `depth` column.
pub fn classify(query: &str) -> QueryClassification {
    classify_for(query, DepthColumn::Depth)
}

/// Classify with depth adjectives resolved against `column`.
pub fn classify_for(query: &str, column: DepthColumn) -> QueryClassification {
    let text = query.to_lowercase();
    let mut filters = FilterSpec::new();

    let regions: Vec<String> = REGION_CONFIGS
        .iter()
        .filter(|r| text.contains(&r.label.to_lowercase()))
        .map(|r| r.id.to_string())
        .collect();
    if !regions.is_empty() {
        filters.regions = Some(regions);
    }

    if contains_any(&text, INACTIVE_WORDS) {
        filters = filters.with_statuses([FloatStatus::Inactive]);
    } else if contains_any(&text, ACTIVE_WORDS) {
        filters = filters.with_statuses([FloatStatus::Active]);
    }

    if contains_any(&text, SHALLOW_WORDS) {
        filters = filters.with_depth_threshold(column.shallow());
    } else if contains_any(&text, DEEP_WORDS) {
        filters = filters.with_depth_threshold(column.deep());
    }

    if let Some((_, float_type)) = FLOAT_TYPE_WORDS.iter().find(|(w, _)| text.contains(w)) {
        filters = filters.with_float_types([*float_type]);
    }

    let classification = QueryClassification {
        filters,
        parameter_focus: parameter_focus(&text),
        analysis_type: analysis_type(&text),
        plot: plot_kind(&text),
    };
    log::debug!("Classified '{}' as {:?}", query, classification.plot);
    classification
}

/// Salinity wins when both parameter groups match.
fn parameter_focus(text: &str) -> Option<Parameter> {
    if contains_any(text, SALINITY_WORDS) {
        Some(Parameter::Salinity)
    } else if contains_any(text, TEMPERATURE_WORDS) {
        Some(Parameter::Temperature)
    } else {
        None
    }
}

fn analysis_type(text: &str) -> Option<AnalysisType> {
    if contains_any(text, PROFILE_WORDS) {
        Some(AnalysisType::ProfileAnalysis)
    } else if contains_any(text, TIME_WORDS) {
        Some(AnalysisType::TimeSeries)
    } else if contains_any(text, COMPARE_WORDS) {
        Some(AnalysisType::RegionalComparison)
    } else if contains_any(text, CORRELATION_WORDS) {
        Some(AnalysisType::CorrelationAnalysis)
    } else {
        None
    }
}

fn plot_kind(text: &str) -> PlotKind {
    if contains_any(text, TEMPERATURE_WORDS) {
        PlotKind::TemperatureProfile
    } else if contains_any(text, SALINITY_WORDS) {
        PlotKind::SalinityProfile
    } else if contains_any(text, PLOT_TIME_WORDS) {
        PlotKind::TimeSeries
    } else if contains_any(text, PLOT_COMPARE_WORDS) {
        PlotKind::RegionalComparison
    } else if contains_any(text, CORRELATION_WORDS) {
        PlotKind::Correlation
    } else {
        PlotKind::Overview
    }
}

/// Human-readable list of what the classifier applied, in display order.
pub fn describe_filters(classification: &QueryClassification) -> Vec<String> {
    let mut applied = Vec::new();
    if let Some(focus) = classification.parameter_focus {
        applied.push(format!("Parameter focus: {}", focus));
    }
    if let Some(analysis) = classification.analysis_type {
        applied.push(format!("Analysis type: {}", analysis.label()));
    }
    if let Some(statuses) = classification.filters.status_set() {
        let names: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        applied.push(format!("Float status: {}", names.join(", ")));
    }
    if let Some(threshold) = classification.filters.depth_threshold {
        applied.push(format!("Depth range: {}", threshold.describe()));
    }
    if let Some(types) = classification.filters.float_type_set() {
        let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
        applied.push(format!("Float type: {}", names.join(", ")));
    }
    applied
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod classifier_tests;
