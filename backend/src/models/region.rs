//! Static region catalog.
//!
//! Every synthetic dataset is generated for one of these regions. The table is
//! immutable and ordered; lookups by id fall back to [`DEFAULT_REGION`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Region used when a lookup misses or no region is requested.
pub const DEFAULT_REGION: &str = "indian_ocean";

/// Map center in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Descriptor of one named ocean region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionConfig {
    pub id: &'static str,
    /// Human-facing name, also the keyword the query classifier looks for.
    pub label: &'static str,
    pub center: GeoPoint,
    pub zoom: f64,
    pub lat_range: (f64, f64),
    pub lon_range: (f64, f64),
    /// Target point density; the catalog size is derived from it.
    pub point_count: usize,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(serialize_with = "serialize_pairs")]
    pub dropdown_defaults: &'static [(&'static str, &'static str)],
}

impl RegionConfig {
    pub fn dropdown_default(&self, key: &str) -> Option<&'static str> {
        self.dropdown_defaults
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_range.0..=self.lat_range.1).contains(&latitude)
            && (self.lon_range.0..=self.lon_range.1).contains(&longitude)
    }
}

fn serialize_pairs<S>(pairs: &[(&str, &str)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

pub static REGION_CONFIGS: [RegionConfig; 9] = [
    RegionConfig {
        id: "indian_ocean",
        label: "Indian Ocean",
        center: GeoPoint { lat: 0.0, lon: 75.0 },
        zoom: 2.5,
        lat_range: (-20.0, 20.0),
        lon_range: (50.0, 100.0),
        point_count: 12,
        title: "Indian Ocean Snapshot",
        description: "Synthesized float activity across the northern Indian Ocean basin.",
        dropdown_defaults: &[],
    },
    RegionConfig {
        id: "arabian_sea",
        label: "Arabian Sea",
        center: GeoPoint { lat: 18.0, lon: 64.0 },
        zoom: 4.1,
        lat_range: (12.0, 22.0),
        lon_range: (56.0, 70.0),
        point_count: 8,
        title: "Arabian Sea Focus",
        description: "Mock float trajectories concentrated along the Arabian Sea convection zone.",
        dropdown_defaults: &[("salin", "SALIN_2"), ("location", "LOCATION_3")],
    },
    RegionConfig {
        id: "bay_of_bengal",
        label: "Bay of Bengal",
        center: GeoPoint { lat: 15.0, lon: 88.0 },
        zoom: 4.2,
        lat_range: (5.0, 22.0),
        lon_range: (80.0, 95.0),
        point_count: 10,
        title: "Bay of Bengal Pulse",
        description: "Synthetic freshwater plume signatures across the Bay of Bengal.",
        dropdown_defaults: &[],
    },
    RegionConfig {
        id: "equatorial_band",
        label: "Equatorial Band",
        center: GeoPoint { lat: 0.0, lon: -20.0 },
        zoom: 3.2,
        lat_range: (-5.0, 5.0),
        lon_range: (-40.0, 10.0),
        point_count: 9,
        title: "Equatorial Salinity Section",
        description: "Fabricated salinity slice hugging the equatorial corridor.",
        dropdown_defaults: &[("salin", "SALIN_2")],
    },
    RegionConfig {
        id: "global_float_network",
        label: "Global Network",
        center: GeoPoint { lat: 5.0, lon: -30.0 },
        zoom: 1.7,
        lat_range: (-35.0, 35.0),
        lon_range: (-80.0, 60.0),
        point_count: 18,
        title: "Global Float Network",
        description: "Overview of placeholder float deployments across major basins.",
        dropdown_defaults: &[("location", "LOCATION_1")],
    },
    RegionConfig {
        id: "atlantic_basin",
        label: "Atlantic Ocean",
        center: GeoPoint { lat: 10.0, lon: -40.0 },
        zoom: 2.6,
        lat_range: (-40.0, 45.0),
        lon_range: (-80.0, 10.0),
        point_count: 20,
        title: "Atlantic Basin Overview",
        description: "Imagined float coverage across the wider Atlantic basin.",
        dropdown_defaults: &[],
    },
    RegionConfig {
        id: "pacific_basin",
        label: "Pacific Ocean",
        center: GeoPoint { lat: -5.0, lon: -150.0 },
        zoom: 2.3,
        lat_range: (-45.0, 35.0),
        lon_range: (-180.0, -100.0),
        point_count: 24,
        title: "Pacific Basin Overview",
        description: "Placeholder float density spanning the Pacific gyres.",
        dropdown_defaults: &[],
    },
    RegionConfig {
        id: "southern_ocean",
        label: "Southern Ocean",
        center: GeoPoint { lat: -55.0, lon: 20.0 },
        zoom: 2.8,
        lat_range: (-70.0, -45.0),
        lon_range: (-10.0, 80.0),
        point_count: 16,
        title: "Southern Ocean Transects",
        description: "Hypothetical polar float sampling around the Antarctic Circumpolar Current.",
        dropdown_defaults: &[],
    },
    RegionConfig {
        id: "deep_profile_window",
        label: "Deep Profile Corridor",
        center: GeoPoint { lat: -4.0, lon: 155.0 },
        zoom: 3.3,
        lat_range: (-10.0, 2.0),
        lon_range: (145.0, 165.0),
        point_count: 6,
        title: "Deep Profile Corridor",
        description: "Imagined deep profiling mission highlighting abyssal gradients.",
        dropdown_defaults: &[("temp", "TEMP_3"), ("pressure", "PRESSURE_2")],
    },
];

/// Exact lookup by region id.
pub fn find_region(region_id: &str) -> Option<&'static RegionConfig> {
    REGION_CONFIGS.iter().find(|r| r.id == region_id)
}

/// Lookup by region id, falling back to the default region on a miss.
pub fn get_region_config(region_id: &str) -> &'static RegionConfig {
    find_region(region_id).unwrap_or_else(default_region)
}

pub fn default_region() -> &'static RegionConfig {
    // The default id is a member of the static table.
    &REGION_CONFIGS[0]
}

/// Case-insensitive lookup by display label.
pub fn find_region_by_label(label: &str) -> Option<&'static RegionConfig> {
    REGION_CONFIGS
        .iter()
        .find(|r| r.label.eq_ignore_ascii_case(label.trim()))
}

pub fn region_ids() -> impl Iterator<Item = &'static str> {
    REGION_CONFIGS.iter().map(|r| r.id)
}
