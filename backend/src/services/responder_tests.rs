#[cfg(test)]
mod tests {
    use crate::api::PlotKind;
    use crate::models::{FilterSpec, FloatStatus};
    use crate::services::catalog::build_filtered_dataset;
    use crate::services::classifier::classify;
    use crate::services::responder::{
        canned_response, compose_text, map_needed, match_canned, quick_query, respond,
        sidebar_payload, CHAT_BASE_REGIONS, FALLBACK_RESPONSE, QUICK_QUERIES,
    };
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    fn base() -> Vec<crate::models::FloatRecord> {
        build_filtered_dataset(&CHAT_BASE_REGIONS, &FilterSpec::new(), today())
    }

    #[test]
    fn test_canned_responses_need_all_keywords() {
        assert!(canned_response("ARGO summary please").starts_with("ARGO program snapshot"));
        assert!(canned_response("compare pacific and atlantic").starts_with("Comparison placeholder"));
        assert_eq!(canned_response("compare pacific"), FALLBACK_RESPONSE);
        assert_eq!(match_canned("hello"), None);
    }

    #[test]
    fn test_quick_query_lookup() {
        assert_eq!(QUICK_QUERIES.len(), 8);
        assert_eq!(quick_query("salinity_bengal"), Some("Salinity profile in Bay of Bengal"));
        assert_eq!(quick_query("nope"), None);
    }

    #[test]
    fn test_map_needed_keywords() {
        assert!(map_needed("Where are the floats?"));
        assert!(map_needed("anything in the Pacific"));
        assert!(!map_needed("salinity trend"));
    }

    #[test]
    fn test_compose_text_for_empty_result() {
        let classification = classify("hello");
        let text = compose_text("hello", &[], &classification);
        assert_eq!(
            text,
            "No floats match your current query. Try adjusting your criteria. \
             Try asking about temperature profiles, salinity data, float locations, or regional comparisons."
        );
    }

    #[test]
    fn test_compose_text_mentions_count_average_and_region() {
        let query = "temperature in the Arabian Sea";
        let classification = classify(query);
        let records: Vec<_> = base().into_iter().filter(|r| r.region == "arabian_sea").collect();
        let text = compose_text(query, &records, &classification);
        assert!(text.starts_with(&format!("Found {} ARGO floats matching your query.", records.len())));
        assert!(text.contains("Average temperature:"));
        assert!(text.contains("Focus region(s): Arabian Sea"));
        assert!(text.contains("Applied filters: Parameter focus: Temperature"));
        assert!(text.contains("known for high salinity waters"));
    }

    #[test]
    fn test_status_filters_are_acknowledged() {
        let classification = classify("inactive");
        let text = compose_text("inactive", &[], &classification);
        assert!(text.contains("Applied filters: Float status: Inactive"));
        assert!(!text.contains("Analysis complete"));

        let records = base();
        let classification = classify("operational");
        let text = compose_text("operational", &records[..3], &classification);
        assert!(text.contains("Applied filters: Float status: Active"));
    }

    #[test]
    fn test_respond_filters_the_base_dataset() {
        let response = respond("Where are the active floats currently reporting?", &base(), today());
        let expected = base().iter().filter(|r| r.status == FloatStatus::Active).count();
        assert_eq!(response.filtered_count, expected);
        assert!(response.map_needed);
        assert_eq!(response.plots.len(), 1);
        assert_eq!(response.plots[0].kind, PlotKind::Overview);
        let sidebar = response.sidebar.unwrap();
        assert_eq!(sidebar.region, "indian_ocean");
        assert_eq!(sidebar.filtered_count, expected);
    }

    #[test]
    fn test_respond_prefers_canned_reply_for_unclassified_queries() {
        let response = respond("argo summary", &base(), today());
        assert!(response.text.starts_with("ARGO program snapshot"));
        let sidebar = response.sidebar.unwrap();
        assert_eq!(sidebar.region, "global_float_network");
        assert_eq!(sidebar.dropdown("location"), Some("LOCATION_1"));
    }

    #[test]
    fn test_sidebar_uses_presets_then_classification() {
        let query = "deep profile please";
        let payload = sidebar_payload(query, &classify(query), 0, Vec::new());
        assert_eq!(payload.region, "deep_profile_window");
        assert_eq!(payload.dropdown("pressure"), Some("PRESSURE_2"));

        let query = "salinity in the bay of bengal";
        let payload = sidebar_payload(query, &classify(query), 12, Vec::new());
        assert_eq!(payload.region, "bay_of_bengal");
        assert_eq!(payload.dropdown("salin"), Some("SALIN_1"));
        assert_eq!(payload.filtered_count, 12);
    }

    #[test]
    fn test_temperature_query_plots_temperature_profile() {
        let response = respond("Show me temperature profile in the Arabian Sea region.", &base(), today());
        assert_eq!(response.classification.plot, PlotKind::TemperatureProfile);
        assert!(response.filtered_count > 0);
        let sidebar = response.sidebar.unwrap();
        assert_eq!(sidebar.region, "arabian_sea");
        assert_eq!(sidebar.dropdown("salin"), Some("SALIN_2"));
    }
}
