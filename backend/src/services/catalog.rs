//! Synthetic float catalogs.
//!
//! Catalogs are generated per region from a label-seeded generator. Only the
//! dates depend on the reference day; every other field is a pure function of
//! `(region, count)`.

use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

use crate::models::{
    get_region_config, FilterSpec, FloatLocation, FloatRecord, FloatStatus, FloatType,
    RegionConfig, DEFAULT_REGION,
};
use crate::services::seed::{gaussian, pick, rng_for};
use crate::transformations::filtering::apply_filters;

const MAX_CATALOG_DEPTH: f64 = 4500.0;
const TIMESTAMP_WINDOW_DAYS: i64 = 30;
const LAST_PROFILE_WINDOW_DAYS: i64 = 15;
const MIN_CATALOG_SIZE: usize = 200;
const CATALOG_DENSITY_FACTOR: usize = 10;

const INSTITUTIONS: [&str; 5] = ["INCOIS", "NIOT", "CSIR-NIO", "IIT Mumbai", "NPOL"];
const MAX_DEPTH_CHOICES: [f64; 4] = [1000.0, 1500.0, 2000.0, 2500.0];
const WMO_ID_BASE: u32 = 5_900_000;

/// Number of records generated for a region's catalog.
pub fn catalog_size(region: &RegionConfig) -> usize {
    (region.point_count * CATALOG_DENSITY_FACTOR).max(MIN_CATALOG_SIZE)
}

/// Region-prefixed float id, e.g. `AR-007`.
pub fn float_id_for(region_id: &str, index: usize) -> String {
    let prefix: String = region_id.chars().take(2).collect::<String>().to_uppercase();
    format!("{}-{:03}", prefix, index + 1)
}

/// Generate `count` records for `region` relative to today's date.
pub fn generate_catalog(region: &RegionConfig, count: usize) -> Vec<FloatRecord> {
    generate_catalog_at(region, count, Local::now().date_naive())
}

/// Generate `count` records for `region` relative to `today`.
///
/// Each column is drawn in full before the next one, so adding a column never
/// perturbs the values of the columns drawn before it.
pub fn generate_catalog_at(region: &RegionConfig, count: usize, today: NaiveDate) -> Vec<FloatRecord> {
    let mut rng = rng_for(&format!("{}:catalog", region.id));
    let (lat_lo, lat_hi) = region.lat_range;
    let (lon_lo, lon_hi) = region.lon_range;

    let latitudes: Vec<f64> = (0..count).map(|_| rng.gen_range(lat_lo..lat_hi)).collect();
    let longitudes: Vec<f64> = (0..count).map(|_| rng.gen_range(lon_lo..lon_hi)).collect();
    let depths: Vec<f64> = (0..count)
        .map(|_| rng.gen_range(0.0..MAX_CATALOG_DEPTH))
        .collect();
    let statuses: Vec<FloatStatus> = (0..count)
        .map(|_| *pick(&mut rng, &FloatStatus::CATALOG))
        .collect();
    let types: Vec<FloatType> = (0..count)
        .map(|_| *pick(&mut rng, &FloatType::MISSION))
        .collect();
    let window_start = today - Duration::days(TIMESTAMP_WINDOW_DAYS);
    let timestamps: Vec<NaiveDate> = (0..count)
        .map(|_| window_start + Duration::days(rng.gen_range(0..TIMESTAMP_WINDOW_DAYS)))
        .collect();
    let temperatures: Vec<f64> = depths
        .iter()
        .map(|depth| 20.0 - 0.005 * depth + gaussian(&mut rng, 0.0, 0.35))
        .collect();
    let salinities: Vec<f64> = (0..count).map(|_| gaussian(&mut rng, 35.0, 0.2)).collect();
    let cycles: Vec<u32> = (0..count).map(|_| rng.gen_range(10..300)).collect();
    let batteries: Vec<f64> = (0..count).map(|_| rng.gen_range(15.0..100.0)).collect();
    let last_profiles: Vec<NaiveDate> = (0..count)
        .map(|_| today - Duration::days(rng.gen_range(0..LAST_PROFILE_WINDOW_DAYS)))
        .collect();

    (0..count)
        .map(|i| FloatRecord {
            float_id: float_id_for(region.id, i),
            region: region.id.to_string(),
            latitude: latitudes[i],
            longitude: longitudes[i],
            depth: depths[i],
            status: statuses[i],
            float_type: types[i],
            timestamp: timestamps[i],
            last_profile: last_profiles[i],
            temperature: temperatures[i],
            salinity: salinities[i],
            cycle_number: cycles[i],
            battery_level: batteries[i],
        })
        .collect()
}

/// Full catalog for a region id; unknown ids resolve to the default region.
pub fn generate_region_catalog(region_id: &str, today: NaiveDate) -> Vec<FloatRecord> {
    let region = get_region_config(region_id);
    if region.id != region_id {
        log::debug!("Unknown region '{}', using '{}'", region_id, region.id);
    }
    generate_catalog_at(region, catalog_size(region), today)
}

/// Concatenate the catalogs of `regions`, filter them, and order by timestamp.
///
/// An empty region list means the default region. The sort is stable, so
/// records sharing a timestamp keep their generation order.
pub fn build_filtered_dataset<S: AsRef<str>>(
    regions: &[S],
    spec: &FilterSpec,
    today: NaiveDate,
) -> Vec<FloatRecord> {
    let mut combined: Vec<FloatRecord> = Vec::new();
    if regions.is_empty() {
        combined.extend(generate_region_catalog(DEFAULT_REGION, today));
    } else {
        for region in regions {
            combined.extend(generate_region_catalog(region.as_ref(), today));
        }
    }

    let mut filtered = apply_filters(&combined, spec);
    filtered.sort_by_key(|r| r.timestamp);
    log::debug!(
        "Built dataset: {} of {} records kept across {} region(s)",
        filtered.len(),
        combined.len(),
        regions.len().max(1)
    );
    filtered
}

/// Platform-model catalog spread across `regions` (all regions when empty).
pub fn generate_float_locations(
    count: usize,
    regions: &[&RegionConfig],
    seed_label: &str,
    today: NaiveDate,
) -> Vec<FloatLocation> {
    let all: Vec<&RegionConfig> = crate::models::REGION_CONFIGS.iter().collect();
    let pool: &[&RegionConfig] = if regions.is_empty() { &all } else { regions };
    let mut rng = rng_for(seed_label);

    (0..count)
        .map(|i| {
            let region = *pick(&mut rng, pool);
            let latitude = rng.gen_range(region.lat_range.0..region.lat_range.1);
            let longitude = rng.gen_range(region.lon_range.0..region.lon_range.1);
            let float_type = *pick(&mut rng, &FloatType::PLATFORM);
            let institution = pick(&mut rng, &INSTITUTIONS).to_string();
            let deployment_date = today - Duration::days(rng.gen_range(0..=365 * 3));
            let last_profile = today - Duration::days(rng.gen_range(0..=30));
            let cycle_number = rng.gen_range(1..=200);
            let status = *pick(&mut rng, &FloatStatus::PLATFORM);
            let max_depth = *pick(&mut rng, &MAX_DEPTH_CHOICES);
            let battery_level = round_to(rng.gen_range(20.0..100.0), 1);
            let temperature_range = (
                round_to(rng.gen_range(0.0..5.0), 1),
                round_to(rng.gen_range(25.0..30.0), 1),
            );
            let salinity_range = (
                round_to(rng.gen_range(33.0..34.0), 2),
                round_to(rng.gen_range(35.0..37.0), 2),
            );

            FloatLocation {
                float_id: format!("WMO_{}", WMO_ID_BASE + i as u32),
                region: region.id.to_string(),
                latitude: round_to(latitude, 4),
                longitude: round_to(longitude, 4),
                float_type,
                institution,
                deployment_date,
                last_profile,
                cycle_number,
                status,
                max_depth,
                battery_level,
                temperature_range,
                salinity_range,
            }
        })
        .collect()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
