//! Data Transfer Objects for the HTTP API.
//!
//! Response payloads mostly come straight from the routes module; this file
//! holds the request-side types and the few responses that only exist over
//! HTTP.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::chat::ChatMessage;
use crate::models::{FilterSpec, FloatStatus, FloatType, Parameter, DEFAULT_REGION};

pub use crate::api::{
    // Catalog
    FloatCatalogData, RegionSummary, StatusCount,
    // Chat
    ChatResponse, ChatTurn, ConversationSummary, QuickQuery, SidebarPayload,
    // Classification
    ClassifyRequest, QueryClassification,
    // Summary
    ParameterSnapshot, ParameterStats,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub conversations: usize,
}

/// Filter query string shared by `/floats`, `/summary` and `/export`.
///
/// List parameters are comma separated. A range given with only one end is
/// completed with the widest valid bound; a date window with only one end is
/// ignored downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub regions: Option<String>,
    #[serde(default)]
    pub lat_min: Option<f64>,
    #[serde(default)]
    pub lat_max: Option<f64>,
    #[serde(default)]
    pub lon_min: Option<f64>,
    #[serde(default)]
    pub lon_max: Option<f64>,
    #[serde(default)]
    pub depth_min: Option<f64>,
    #[serde(default)]
    pub depth_max: Option<f64>,
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
    #[serde(default)]
    pub statuses: Option<String>,
    #[serde(default)]
    pub types: Option<String>,
    /// Summary parameter (`/summary` only)
    #[serde(default)]
    pub parameter: Option<String>,
    /// Aggregation method (`/summary` only)
    #[serde(default)]
    pub method: Option<String>,
    /// Export parameter columns (`/export` only)
    #[serde(default)]
    pub parameters: Option<String>,
    /// Number of platform floats (`/float-locations` only)
    #[serde(default)]
    pub count: Option<usize>,
}

fn split_list(raw: Option<&str>) -> Vec<&str> {
    raw.map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn parse_list<T: FromStr<Err = String>>(raw: Option<&str>) -> Result<Vec<T>, String> {
    split_list(raw).into_iter().map(T::from_str).collect()
}

fn complete_range(min: Option<f64>, max: Option<f64>, lo: f64, hi: f64) -> Option<(f64, f64)> {
    match (min, max) {
        (None, None) => None,
        (a, b) => Some((a.unwrap_or(lo), b.unwrap_or(hi))),
    }
}

impl CatalogQuery {
    /// Region ids, or the given defaults when none were requested.
    pub fn region_ids(&self, defaults: &[String]) -> Vec<String> {
        let requested: Vec<String> = split_list(self.regions.as_deref())
            .into_iter()
            .map(str::to_string)
            .collect();
        if requested.is_empty() {
            defaults.to_vec()
        } else {
            requested
        }
    }

    /// Region ids for the catalog endpoints. With none requested this is
    /// the default region, matching `build_filtered_dataset`.
    pub fn catalog_region_ids(&self) -> Vec<String> {
        self.region_ids(&[DEFAULT_REGION.to_string()])
    }

    pub fn to_filter_spec(&self) -> Result<FilterSpec, String> {
        let statuses: Vec<FloatStatus> = parse_list(self.statuses.as_deref())?;
        let types: Vec<FloatType> = parse_list(self.types.as_deref())?;

        let mut spec = FilterSpec::new();
        if let Some((a, b)) = complete_range(self.lat_min, self.lat_max, -90.0, 90.0) {
            spec = spec.with_lat_range(a, b);
        }
        if let Some((a, b)) = complete_range(self.lon_min, self.lon_max, -180.0, 180.0) {
            spec = spec.with_lon_range(a, b);
        }
        if let Some((a, b)) = complete_range(self.depth_min, self.depth_max, 0.0, f64::MAX) {
            spec = spec.with_depth_range(a, b);
        }
        if self.date_start.is_some() || self.date_end.is_some() {
            spec = spec.with_date_range(self.date_start, self.date_end);
        }
        if !statuses.is_empty() {
            spec = spec.with_statuses(statuses);
        }
        if !types.is_empty() {
            spec = spec.with_float_types(types);
        }
        Ok(spec)
    }

    /// Export parameter selection; `None` means the default columns.
    pub fn export_parameters(&self) -> Result<Option<Vec<Parameter>>, String> {
        let parameters: Vec<Parameter> = parse_list(self.parameters.as_deref())?;
        Ok(if parameters.is_empty() {
            None
        } else {
            Some(parameters)
        })
    }
}

/// Body of `POST /v1/chat`: free text or a quick-query key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub quick_query: Option<String>,
}

/// Body of `POST /v1/chat/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationListResponse {
    pub active_id: Option<crate::chat::ConversationId>,
    pub conversations: Vec<ConversationSummary>,
}

/// `?region=&parameter=` for the depth plots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptQuery {
    /// `txt` (default) or `json`
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub messages: Vec<crate::chat::Message>,
}

/// Aggregate of one parameter over the filtered catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub record_count: usize,
    pub snapshot: Option<ParameterSnapshot>,
    pub stats: Option<ParameterStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub removed: usize,
}
