use crate::models::{FloatRecord, FloatStatus, GeoPoint, RegionConfig};
use serde::{Deserialize, Serialize};

// =========================================================
// Catalog types + routes
// =========================================================

/// Region listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSummary {
    pub id: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub center: (f64, f64),
    pub zoom: f64,
    pub point_count: usize,
    pub catalog_size: usize,
}

impl RegionSummary {
    pub fn from_config(region: &RegionConfig) -> Self {
        let GeoPoint { lat, lon } = region.center;
        Self {
            id: region.id.to_string(),
            label: region.label.to_string(),
            title: region.title.to_string(),
            description: region.description.to_string(),
            center: (lat, lon),
            zoom: region.zoom,
            point_count: region.point_count,
            catalog_size: crate::services::catalog::catalog_size(region),
        }
    }
}

/// Number of floats in one status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: FloatStatus,
    pub count: usize,
}

/// Filtered float table plus its status breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatCatalogData {
    pub records: Vec<FloatRecord>,
    pub total_count: usize,
    pub regions: Vec<String>,
    pub status_counts: Vec<StatusCount>,
}

pub const LIST_REGIONS: &str = "list_regions";
pub const GET_REGION: &str = "get_region";
pub const GET_FLOATS: &str = "get_floats";
pub const GET_FLOAT_LOCATIONS: &str = "get_float_locations";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::get_region_config;

    #[test]
    fn test_region_summary_from_config() {
        let summary = RegionSummary::from_config(get_region_config("global_float_network"));
        assert_eq!(summary.label, "Global Network");
        assert_eq!(summary.center, (5.0, -30.0));
        assert_eq!(summary.catalog_size, 200);
    }

    #[test]
    fn test_const_values() {
        assert_eq!(LIST_REGIONS, "list_regions");
        assert_eq!(GET_FLOATS, "get_floats");
    }
}
