//! Chat answers: canned replies, response text, plots and sidebar state.

use chrono::NaiveDate;

use crate::api::{ChatResponse, QueryClassification, QuickQuery, SidebarPayload};
use crate::models::{find_region, FloatRecord, Parameter, DEFAULT_REGION};
use crate::services::classifier::{classify, contains_any, describe_filters, SALINITY_WORDS};
use crate::services::plots::render_plot;
use crate::services::summary::average_of;
use crate::transformations::apply_filters;

/// Regions whose catalogs make up the chat base dataset.
pub const CHAT_BASE_REGIONS: [&str; 3] = ["arabian_sea", "bay_of_bengal", "indian_ocean"];

pub const FALLBACK_RESPONSE: &str =
    "Query not recognized yet. Try asking about salinity, temperature, or float locations.";

const CANNED_RESPONSES: &[(&[&str], &str)] = &[
    (
        &["salinity", "equator"],
        "Synthetic salinity profiles near the equator: average 35 PSU at 100m depth, slight freshening toward 400m.",
    ),
    (
        &["temperature", "north atlantic"],
        "Mock North Atlantic temperature slice: surface 18°C, thermocline drop to 6°C by 600m.",
    ),
    (
        &["float", "locations"],
        "Currently tracking 42 placeholder floats clustered around 15°N, 45°W with weekly deployment cadence.",
    ),
    (
        &["depth", "profile"],
        "Deep profile mock-up: synthetic float shows stable gradient from 2°C at 1000m to 1.2°C at 4000m.",
    ),
    (
        &["compare", "pacific", "atlantic"],
        "Comparison placeholder: Pacific mixed layer salinity 34.5 PSU vs Atlantic 35.1 PSU this quarter.",
    ),
    (
        &["argo", "summary"],
        "ARGO program snapshot (simulated): 3,900 floats reporting, 97% telemetry uptime, datasets refreshed daily.",
    ),
];

pub const QUICK_QUERIES: [QuickQuery; 8] = [
    QuickQuery {
        key: "temperature_arabian",
        label: "Temperature in Arabian Sea",
        query: "Show me temperature profile in the Arabian Sea region.",
    },
    QuickQuery {
        key: "salinity_bengal",
        label: "Salinity in Bay of Bengal",
        query: "Salinity profile in Bay of Bengal",
    },
    QuickQuery {
        key: "active_floats",
        label: "Active Float Locations",
        query: "Where are the active floats currently reporting?",
    },
    QuickQuery {
        key: "temp_sal_comparison",
        label: "Compare Temperature & Salinity",
        query: "Compare temperature and salinity trends",
    },
    QuickQuery {
        key: "monthly_trends",
        label: "Monthly Temperature Trends",
        query: "Show monthly average temperature trend",
    },
    QuickQuery {
        key: "depth_profiles",
        label: "Depth Profile Analysis",
        query: "Depth profile of temperature and salinity",
    },
    QuickQuery {
        key: "regional_comparison",
        label: "Regional Ocean Comparison",
        query: "Compare ocean regions temperature data",
    },
    QuickQuery {
        key: "correlation_analysis",
        label: "Temperature-Salinity Correlation",
        query: "Show correlation between temperature and salinity",
    },
];

struct SidebarPreset {
    keywords: &'static [&'static str],
    region: &'static str,
    dropdowns: &'static [(&'static str, &'static str)],
}

const SIDEBAR_PRESETS: &[SidebarPreset] = &[
    SidebarPreset {
        keywords: &["arabian", "sea"],
        region: "arabian_sea",
        dropdowns: &[("salin", "SALIN_2"), ("location", "LOCATION_3")],
    },
    SidebarPreset {
        keywords: &["salinity", "equator"],
        region: "equatorial_band",
        dropdowns: &[("salin", "SALIN_2")],
    },
    SidebarPreset {
        keywords: &["float", "locations"],
        region: "global_float_network",
        dropdowns: &[("location", "LOCATION_2")],
    },
    SidebarPreset {
        keywords: &["argo", "summary"],
        region: "global_float_network",
        dropdowns: &[("location", "LOCATION_1")],
    },
    SidebarPreset {
        keywords: &["map"],
        region: "global_float_network",
        dropdowns: &[],
    },
    SidebarPreset {
        keywords: &["deep", "profile"],
        region: "deep_profile_window",
        dropdowns: &[("temp", "TEMP_3"), ("pressure", "PRESSURE_2")],
    },
];

const MAP_WORDS: &[&str] = &[
    "map",
    "location",
    "where",
    "floats",
    "region",
    "arabian sea",
    "bay of bengal",
    "indian ocean",
    "pacific",
    "atlantic",
];

fn contains_all(text: &str, words: &[&str]) -> bool {
    words.iter().all(|w| text.contains(w))
}

/// Canned reply whose keywords all appear in `message`, if any.
pub fn match_canned(message: &str) -> Option<&'static str> {
    let normalized = message.to_lowercase();
    CANNED_RESPONSES
        .iter()
        .find(|(keywords, _)| contains_all(&normalized, keywords))
        .map(|(_, reply)| *reply)
}

pub fn canned_response(message: &str) -> &'static str {
    match_canned(message).unwrap_or(FALLBACK_RESPONSE)
}

pub fn quick_query(key: &str) -> Option<&'static str> {
    QUICK_QUERIES.iter().find(|q| q.key == key).map(|q| q.query)
}

/// Whether the answer should refresh the map view.
pub fn map_needed(query: &str) -> bool {
    contains_any(&query.to_lowercase(), MAP_WORDS)
}

fn region_label(region_id: &str) -> &str {
    find_region(region_id).map(|r| r.label).unwrap_or(region_id)
}

/// Compose the assistant's text for a classified query and its result set.
pub fn compose_text(query: &str, records: &[FloatRecord], classification: &QueryClassification) -> String {
    let text = query.to_lowercase();
    let mut parts: Vec<String> = Vec::new();

    if records.is_empty() {
        parts.push("No floats match your current query. Try adjusting your criteria.".into());
    } else {
        parts.push(format!("Found {} ARGO floats matching your query.", records.len()));
        match classification.parameter_focus {
            Some(Parameter::Temperature) => {
                if let Some(avg) = average_of(records, Parameter::Temperature) {
                    parts.push(format!("Average temperature: {:.1}°C across selected floats.", avg));
                }
            }
            Some(Parameter::Salinity) => {
                if let Some(avg) = average_of(records, Parameter::Salinity) {
                    parts.push(format!("Average salinity: {:.2} PSU across selected floats.", avg));
                }
            }
            _ => {}
        }
        if let Some(regions) = classification.filters.region_list() {
            let names: Vec<&str> = regions.iter().map(|r| region_label(r)).collect();
            parts.push(format!("Focus region(s): {}", names.join(", ")));
        }
    }

    let applied = describe_filters(classification);
    if !applied.is_empty() {
        parts.push(format!("Applied filters: {}", applied.join("; ")));
    }

    let acknowledgments: [(&[&str], &str); 7] = [
        (&["temperature", "temp"], "Temperature profile analysis generated."),
        (SALINITY_WORDS, "Salinity profile analysis included."),
        (&["time", "trend", "temporal", "monthly"], "Time series analysis prepared."),
        (&["compare", "comparison", "versus", "vs"], "Regional comparison analysis completed."),
        (&["correlation", "relationship"], "Correlation analysis generated."),
        (&["map", "location", "where", "floats"], "Map view updated with filtered float locations."),
        (&["profile", "depth"], "Depth profile visualization created."),
    ];
    for (words, line) in acknowledgments {
        if contains_any(&text, words) {
            parts.push(line.to_string());
        }
    }

    if text.contains("arabian sea") {
        parts.push("Arabian Sea region selected - known for high salinity waters.".into());
    } else if text.contains("bay of bengal") {
        parts.push(
            "Bay of Bengal region selected - characterized by lower salinity due to river discharge.".into(),
        );
    } else if text.contains("indian ocean") {
        parts.push("Indian Ocean region selected - diverse thermal and salinity characteristics.".into());
    }

    if parts.len() == 1 {
        if classification.is_empty() {
            parts.push(
                "Try asking about temperature profiles, salinity data, float locations, or regional comparisons."
                    .into(),
            );
        } else {
            parts.push(
                "Analysis complete. Use the sidebar to explore the filtered data and visualizations.".into(),
            );
        }
    }

    parts.join(" ")
}

/// Sidebar state for a message: keyword presets first, then the classified
/// region and parameter focus.
pub fn sidebar_payload(
    message: &str,
    classification: &QueryClassification,
    filtered_count: usize,
    plots: Vec<crate::api::PlotData>,
) -> SidebarPayload {
    let normalized = message.to_lowercase();
    let owned = |pairs: &[(&str, &str)]| -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    };

    if let Some(preset) = SIDEBAR_PRESETS.iter().find(|p| contains_all(&normalized, p.keywords)) {
        return SidebarPayload {
            region: preset.region.to_string(),
            dropdowns: owned(preset.dropdowns),
            source_query: message.to_string(),
            classification: Some(classification.clone()),
            filtered_count,
            plots,
        };
    }

    let region = classification
        .filters
        .region_list()
        .and_then(|r| r.first().cloned())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());
    let dropdowns = match classification.parameter_focus {
        Some(Parameter::Temperature) => owned(&[("temp", "TEMP_1")]),
        Some(Parameter::Salinity) => owned(&[("salin", "SALIN_1")]),
        Some(Parameter::Depth) => owned(&[("location", "LOCATION_1")]),
        _ => Vec::new(),
    };

    SidebarPayload {
        region,
        dropdowns,
        source_query: message.to_string(),
        classification: Some(classification.clone()),
        filtered_count,
        plots,
    }
}

/// Answer `message` against `base` (normally the chat base dataset).
pub fn respond(message: &str, base: &[FloatRecord], today: NaiveDate) -> ChatResponse {
    let classification = classify(message);
    let filtered = apply_filters(base, &classification.filters);

    let text = match match_canned(message) {
        Some(reply) if classification.is_empty() => reply.to_string(),
        _ => compose_text(message, &filtered, &classification),
    };

    let plots = if classification.plot == crate::api::PlotKind::Overview && filtered.is_empty() {
        Vec::new()
    } else {
        vec![render_plot(&classification, &filtered, today)]
    };

    let needs_map = map_needed(message);
    let sidebar = if needs_map || !plots.is_empty() {
        Some(sidebar_payload(message, &classification, filtered.len(), plots.clone()))
    } else {
        None
    };

    log::info!(
        "Chat query answered: {} of {} records, {} plot(s), map_needed={}",
        filtered.len(),
        base.len(),
        plots.len(),
        needs_map
    );

    ChatResponse {
        text,
        classification,
        filtered_count: filtered.len(),
        map_needed: needs_map,
        plots,
        sidebar,
    }
}

#[cfg(test)]
#[path = "responder_tests.rs"]
mod responder_tests;
