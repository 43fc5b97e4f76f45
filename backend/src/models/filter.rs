//! Declarative filter specification.
//!
//! Every field is optional and an absent field places no constraint on the
//! result. Present fields combine with AND.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::float::{FloatStatus, FloatType};

/// Inclusive date window. Filtering applies only when both ends are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Ordered bounds, or `None` for a half-open window.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(a), Some(b)) if a <= b => Some((a, b)),
            (Some(a), Some(b)) => Some((b, a)),
            _ => None,
        }
    }
}

/// Which numeric column a depth adjective is evaluated against.
///
/// The regional catalog carries a per-observation `depth`; the platform
/// catalog only has the rated `max_depth`, so "shallow" and "deep" map to
/// different cut-offs on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthColumn {
    Depth,
    MaxDepth,
}

impl DepthColumn {
    pub fn shallow(&self) -> DepthThreshold {
        match self {
            DepthColumn::Depth => DepthThreshold::Below(500.0),
            DepthColumn::MaxDepth => DepthThreshold::Below(1000.0),
        }
    }

    pub fn deep(&self) -> DepthThreshold {
        match self {
            DepthColumn::Depth => DepthThreshold::Above(1000.0),
            DepthColumn::MaxDepth => DepthThreshold::Above(1500.0),
        }
    }
}

/// Strict one-sided depth bound derived from a depth adjective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "meters", rename_all = "snake_case")]
pub enum DepthThreshold {
    Below(f64),
    Above(f64),
}

impl DepthThreshold {
    pub fn matches(&self, depth: f64) -> bool {
        match *self {
            DepthThreshold::Below(limit) => depth < limit,
            DepthThreshold::Above(limit) => depth > limit,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            DepthThreshold::Below(limit) => format!("Shallow (<{}m)", limit),
            DepthThreshold::Above(limit) => format!("Deep (>{}m)", limit),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<BTreeSet<FloatStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_types: Option<BTreeSet<FloatType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_threshold: Option<DepthThreshold>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = Some(regions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_lat_range(mut self, a: f64, b: f64) -> Self {
        self.lat_range = Some((a, b));
        self
    }

    pub fn with_lon_range(mut self, a: f64, b: f64) -> Self {
        self.lon_range = Some((a, b));
        self
    }

    pub fn with_depth_range(mut self, a: f64, b: f64) -> Self {
        self.depth_range = Some((a, b));
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = Some(DateWindow::new(start, end));
        self
    }

    pub fn with_statuses<I: IntoIterator<Item = FloatStatus>>(mut self, statuses: I) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_float_types<I: IntoIterator<Item = FloatType>>(mut self, types: I) -> Self {
        self.float_types = Some(types.into_iter().collect());
        self
    }

    pub fn with_depth_threshold(mut self, threshold: DepthThreshold) -> Self {
        self.depth_threshold = Some(threshold);
        self
    }

    /// Region list, with an empty list treated as absent.
    pub fn region_list(&self) -> Option<&[String]> {
        self.regions.as_deref().filter(|r| !r.is_empty())
    }

    pub fn status_set(&self) -> Option<&BTreeSet<FloatStatus>> {
        self.statuses.as_ref().filter(|s| !s.is_empty())
    }

    pub fn float_type_set(&self) -> Option<&BTreeSet<FloatType>> {
        self.float_types.as_ref().filter(|s| !s.is_empty())
    }

    /// True when no field would remove a record.
    pub fn is_unconstrained(&self) -> bool {
        self.region_list().is_none()
            && self.lat_range.is_none()
            && self.lon_range.is_none()
            && self.depth_range.is_none()
            && self.date_range.and_then(|w| w.bounds()).is_none()
            && self.status_set().is_none()
            && self.float_type_set().is_none()
            && self.depth_threshold.is_none()
    }
}

/// Sort a pair so that `lo <= hi`.
pub fn ordered(range: (f64, f64)) -> (f64, f64) {
    if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    }
}
