use chrono::NaiveDate;

use crate::models::{ordered, DepthColumn, FilterSpec, FloatLocation, FloatRecord, FloatStatus, FloatType};

/// Row accessors the filter engine needs.
///
/// Both catalogs implement this; they differ in which column carries depth.
pub trait Filterable {
    /// Column that depth ranges and depth adjectives are evaluated against.
    const DEPTH_COLUMN: DepthColumn;

    fn region(&self) -> &str;
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    fn depth_value(&self) -> f64;
    fn observed_on(&self) -> NaiveDate;
    fn status(&self) -> FloatStatus;
    fn float_type(&self) -> FloatType;
}

impl Filterable for FloatRecord {
    const DEPTH_COLUMN: DepthColumn = DepthColumn::Depth;

    fn region(&self) -> &str {
        &self.region
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
    fn depth_value(&self) -> f64 {
        self.depth
    }
    fn observed_on(&self) -> NaiveDate {
        self.timestamp
    }
    fn status(&self) -> FloatStatus {
        self.status
    }
    fn float_type(&self) -> FloatType {
        self.float_type
    }
}

impl Filterable for FloatLocation {
    const DEPTH_COLUMN: DepthColumn = DepthColumn::MaxDepth;

    fn region(&self) -> &str {
        &self.region
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
    fn depth_value(&self) -> f64 {
        self.max_depth
    }
    fn observed_on(&self) -> NaiveDate {
        self.last_profile
    }
    fn status(&self) -> FloatStatus {
        self.status
    }
    fn float_type(&self) -> FloatType {
        self.float_type
    }
}

fn within(value: f64, range: (f64, f64)) -> bool {
    let (lo, hi) = ordered(range);
    value >= lo && value <= hi
}

/// Apply every present constraint of `spec`, preserving input order.
pub fn apply_filters<T: Filterable + Clone>(records: &[T], spec: &FilterSpec) -> Vec<T> {
    let mut filtered: Vec<T> = records.to_vec();

    if let Some(regions) = spec.region_list() {
        filtered.retain(|r| regions.iter().any(|id| id == r.region()));
    }

    if let Some(range) = spec.lat_range {
        filtered.retain(|r| within(r.latitude(), range));
    }

    if let Some(range) = spec.lon_range {
        filtered.retain(|r| within(r.longitude(), range));
    }

    if let Some(range) = spec.depth_range {
        filtered.retain(|r| within(r.depth_value(), range));
    }

    // A window with a missing end is not a constraint.
    if let Some((start, end)) = spec.date_range.and_then(|w| w.bounds()) {
        filtered.retain(|r| {
            let day = r.observed_on();
            day >= start && day <= end
        });
    }

    if let Some(statuses) = spec.status_set() {
        filtered.retain(|r| statuses.contains(&r.status()));
    }

    if let Some(types) = spec.float_type_set() {
        filtered.retain(|r| types.contains(&r.float_type()));
    }

    if let Some(threshold) = spec.depth_threshold {
        filtered.retain(|r| threshold.matches(r.depth_value()));
    }

    filtered
}

/// Count of records per status, in status order.
pub fn count_by_status<T: Filterable>(records: &[T]) -> Vec<(FloatStatus, usize)> {
    FloatStatus::PLATFORM
        .into_iter()
        .map(|status| (status, records.iter().filter(|r| r.status() == status).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}
