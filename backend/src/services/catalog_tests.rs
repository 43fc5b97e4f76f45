#[cfg(test)]
mod tests {
    use crate::models::{get_region_config, FilterSpec, FloatStatus, FloatType, REGION_CONFIGS};
    use crate::services::catalog::{
        build_filtered_dataset, catalog_size, float_id_for, generate_catalog_at,
        generate_float_locations, generate_region_catalog,
    };
    use crate::transformations::apply_filters;
    use chrono::{Duration, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_catalog_size_uses_density_floor() {
        // 8 * 10 = 80 is below the floor.
        assert_eq!(catalog_size(get_region_config("arabian_sea")), 200);
        assert_eq!(catalog_size(get_region_config("pacific_basin")), 240);
    }

    #[test]
    fn test_float_id_format() {
        assert_eq!(float_id_for("arabian_sea", 0), "AR-001");
        assert_eq!(float_id_for("bay_of_bengal", 41), "BA-042");
        assert_eq!(float_id_for("x", 999), "X-1000");
    }

    #[test]
    fn test_catalog_is_reproducible_for_same_day() {
        let region = get_region_config("bay_of_bengal");
        let a = generate_catalog_at(region, 50, day(2024, 5, 1));
        let b = generate_catalog_at(region, 50, day(2024, 5, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_date_fields_ignore_reference_day() {
        let region = get_region_config("southern_ocean");
        let a = generate_catalog_at(region, 40, day(2023, 1, 15));
        let b = generate_catalog_at(region, 40, day(2024, 9, 30));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.float_id, y.float_id);
            assert_eq!(x.latitude, y.latitude);
            assert_eq!(x.longitude, y.longitude);
            assert_eq!(x.depth, y.depth);
            assert_eq!(x.status, y.status);
            assert_eq!(x.float_type, y.float_type);
            assert_eq!(x.temperature, y.temperature);
            assert_eq!(x.salinity, y.salinity);
            assert_eq!(x.cycle_number, y.cycle_number);
            assert_eq!(x.battery_level, y.battery_level);
        }
    }

    #[test]
    fn test_records_respect_region_bounds_and_ranges() {
        let today = day(2024, 6, 1);
        for region in REGION_CONFIGS.iter() {
            for record in generate_catalog_at(region, 120, today) {
                assert!(region.contains(record.latitude, record.longitude), "{}", record.float_id);
                assert!((0.0..4500.0).contains(&record.depth));
                assert!(FloatStatus::CATALOG.contains(&record.status));
                assert!(FloatType::MISSION.contains(&record.float_type));
                assert!((10..300).contains(&record.cycle_number));
                assert!((15.0..100.0).contains(&record.battery_level));
                assert!(record.timestamp >= today - Duration::days(30));
                assert!(record.timestamp < today);
                assert!(record.last_profile <= today);
                assert!(record.last_profile > today - Duration::days(15));
            }
        }
    }

    #[test]
    fn test_temperature_decays_with_depth() {
        let records = generate_catalog_at(get_region_config("indian_ocean"), 200, day(2024, 6, 1));
        let shallow: Vec<f64> = records.iter().filter(|r| r.depth < 500.0).map(|r| r.temperature).collect();
        let deep: Vec<f64> = records.iter().filter(|r| r.depth > 3500.0).map(|r| r.temperature).collect();
        let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
        assert!(!shallow.is_empty() && !deep.is_empty());
        assert!(mean(&shallow) > mean(&deep) + 10.0);
    }

    #[test]
    fn test_unknown_region_generates_default_catalog() {
        let today = day(2024, 6, 1);
        let unknown = generate_region_catalog("atlantis", today);
        let default = generate_region_catalog("indian_ocean", today);
        assert_eq!(unknown, default);
        assert!(unknown[0].float_id.starts_with("IN-"));
    }

    #[test]
    fn test_build_filtered_dataset_sorted_by_timestamp() {
        let records = build_filtered_dataset(&["arabian_sea", "bay_of_bengal"], &FilterSpec::new(), day(2024, 6, 1));
        assert_eq!(records.len(), 400);
        assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_build_filtered_dataset_empty_regions_uses_default() {
        let empty: [&str; 0] = [];
        let records = build_filtered_dataset(&empty, &FilterSpec::new(), day(2024, 6, 1));
        assert!(records.iter().all(|r| r.region == "indian_ocean"));
        assert_eq!(records.len(), 200);
    }

    #[test]
    fn test_build_filtered_dataset_applies_spec() {
        let today = day(2024, 6, 1);
        let spec = FilterSpec::new().with_statuses([FloatStatus::Active]).with_depth_range(0.0, 1000.0);
        let records = build_filtered_dataset(&["indian_ocean"], &spec, today);
        let expected = apply_filters(&generate_region_catalog("indian_ocean", today), &spec);
        assert_eq!(records.len(), expected.len());
        assert!(records.iter().all(|r| r.status == FloatStatus::Active && r.depth <= 1000.0));
    }

    #[test]
    fn test_float_locations_are_seeded_and_bounded() {
        let today = day(2024, 6, 1);
        let regions = [get_region_config("arabian_sea"), get_region_config("bay_of_bengal")];
        let a = generate_float_locations(30, &regions, "explorer", today);
        let b = generate_float_locations(30, &regions, "explorer", today);
        assert_eq!(a, b);
        assert_eq!(a[0].float_id, "WMO_5900000");
        assert_eq!(a[29].float_id, "WMO_5900029");
        for float in &a {
            let region = get_region_config(&float.region);
            assert!(float.region == "arabian_sea" || float.region == "bay_of_bengal");
            assert!(region.contains(float.latitude, float.longitude));
            assert!(FloatType::PLATFORM.contains(&float.float_type));
            assert!([1000.0, 1500.0, 2000.0, 2500.0].contains(&float.max_depth));
            assert!((1..=200).contains(&float.cycle_number));
        }
    }
}
