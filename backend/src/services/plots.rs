//! Chart-ready series for each plot branch.
//!
//! Every generator draws from its own label-seeded source so a given float,
//! region or parameter always renders the same curve.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use std::f64::consts::PI;

use crate::api::{DepthTimeProfile, HovmollerGrid, PlotData, PlotKind, PlotTrace, QueryClassification};
use crate::models::{find_region, FloatRecord, Parameter};
use crate::services::catalog::round_to;
use crate::services::seed::{gaussian, rng_for};

const PROFILE_MAX_DEPTH: u32 = 2000;
const PROFILE_STEP: u32 = 25;
const FALLBACK_FLOAT_ID: &str = "DEMO-001";
const FALLBACK_REGION_LABEL: &str = "Indian Ocean";
const COMPARISON_FALLBACK_REGIONS: [&str; 3] = ["arabian_sea", "bay_of_bengal", "indian_ocean"];

fn profile_depths() -> Vec<f64> {
    (0..=PROFILE_MAX_DEPTH)
        .step_by(PROFILE_STEP as usize)
        .map(f64::from)
        .collect()
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Temperature against depth for one float. Depths are plotted negative.
pub fn temperature_profile(float_id: &str, region_label: &str) -> PlotData {
    let mut rng = rng_for(&format!("{}:profile:temperature", float_id));
    let surface = rng.gen_range(20.0..30.0);
    let deep = rng.gen_range(2.0..5.0);
    let depths = profile_depths();
    let values: Vec<f64> = depths
        .iter()
        .map(|d| round_to(surface * (-d / 1000.0).exp() + deep + gaussian(&mut rng, 0.0, 0.5), 2))
        .collect();

    PlotData {
        kind: PlotKind::TemperatureProfile,
        title: format!("Temperature Profile in {}", region_label),
        x_label: "Temperature (°C)".into(),
        y_label: "Depth (m)".into(),
        traces: vec![PlotTrace::numeric(
            format!("Temperature Profile - {}", float_id),
            values,
            depths.iter().map(|d| -d).collect(),
        )],
    }
}

/// Salinity against depth for one float, with a halocline shift between
/// 100 m and 500 m.
pub fn salinity_profile(float_id: &str, region_label: &str) -> PlotData {
    let mut rng = rng_for(&format!("{}:profile:salinity", float_id));
    let surface = rng.gen_range(34.0..36.0);
    let halocline_shift = rng.gen_range(-0.5..0.5);
    let depths = profile_depths();
    let values: Vec<f64> = depths
        .iter()
        .map(|d| {
            let mut s = surface + gaussian(&mut rng, 0.0, 0.2);
            if *d > 100.0 && *d < 500.0 {
                s += halocline_shift;
            }
            round_to(s, 3)
        })
        .collect();

    PlotData {
        kind: PlotKind::SalinityProfile,
        title: format!("Salinity Profile in {}", region_label),
        x_label: "Salinity (PSU)".into(),
        y_label: "Depth (m)".into(),
        traces: vec![PlotTrace::numeric(
            format!("Salinity Profile - {}", float_id),
            values,
            depths.iter().map(|d| -d).collect(),
        )],
    }
}

fn base_value(parameter: Parameter, region_label: &str) -> f64 {
    let table: &[(&str, f64)] = match parameter {
        Parameter::Temperature => &[
            ("Arabian Sea", 27.0),
            ("Bay of Bengal", 28.0),
            ("Indian Ocean", 24.0),
            ("Pacific Ocean", 22.0),
            ("Atlantic Ocean", 20.0),
            ("Southern Ocean", 5.0),
        ],
        Parameter::Salinity => &[
            ("Arabian Sea", 36.5),
            ("Bay of Bengal", 34.5),
            ("Indian Ocean", 35.2),
            ("Pacific Ocean", 34.8),
            ("Atlantic Ocean", 35.0),
            ("Southern Ocean", 34.2),
        ],
        _ => &[],
    };
    table
        .iter()
        .find(|(label, _)| *label == region_label)
        .map(|(_, v)| *v)
        .unwrap_or(20.0)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}

/// `count` consecutive month ends, the first one on or after `start`.
pub fn month_ends(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(count);
    let (mut year, mut month) = (start.year(), start.month());
    while out.len() < count {
        match last_day_of_month(year, month) {
            Some(day) => out.push(day),
            None => break,
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    out
}

/// Monthly values for a region with a yearly seasonal swing.
pub fn time_series(parameter: Parameter, region_id: &str, months: usize, today: NaiveDate) -> PlotData {
    let label = find_region(region_id).map(|r| r.label).unwrap_or(FALLBACK_REGION_LABEL);
    let base = base_value(parameter, label);
    let mut rng = rng_for(&format!("{}:{}:time-series", region_id, parameter));
    let dates = month_ends(today - Duration::days(months as i64 * 30), months);
    let values: Vec<f64> = (0..dates.len())
        .map(|i| {
            let seasonal = (2.0 * PI * i as f64 / 12.0).sin();
            round_to(base + seasonal * base * 0.1 + gaussian(&mut rng, 0.0, base * 0.05), 2)
        })
        .collect();

    PlotData {
        kind: PlotKind::TimeSeries,
        title: format!("{} Trend Over Time", parameter),
        x_label: "Date".into(),
        y_label: format!("{} ({})", parameter, parameter.unit()),
        traces: vec![PlotTrace::categorical(
            format!("{} Time Series", parameter),
            dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
            values,
        )],
    }
}

fn region_label(region_id: &str) -> &str {
    find_region(region_id).map(|r| r.label).unwrap_or(region_id)
}

/// Temperature distribution per region, in order of first appearance.
/// Traces are named by region label.
pub fn regional_comparison(records: &[FloatRecord]) -> PlotData {
    let mut traces: Vec<PlotTrace> = Vec::new();

    if records.is_empty() {
        let mut rng = rng_for("regional-comparison");
        for region in COMPARISON_FALLBACK_REGIONS {
            let values: Vec<f64> = (0..20).map(|_| gaussian(&mut rng, 25.0, 3.0)).collect();
            traces.push(PlotTrace::numeric(region_label(region), Vec::new(), values));
        }
    } else {
        for record in records {
            let name = region_label(&record.region);
            match traces.iter_mut().find(|t| t.name == name) {
                Some(trace) => trace.y.push(record.temperature),
                None => traces.push(PlotTrace::numeric(name, Vec::new(), vec![record.temperature])),
            }
        }
    }

    PlotData {
        kind: PlotKind::RegionalComparison,
        title: "Regional Parameter Comparison".into(),
        x_label: "Region".into(),
        y_label: "Temperature (°C)".into(),
        traces,
    }
}

/// Temperature against depth scatter; synthesized when fewer than two records.
pub fn correlation(records: &[FloatRecord]) -> PlotData {
    let (depths, temps): (Vec<f64>, Vec<f64>) = if records.len() < 2 {
        let mut rng = rng_for("correlation");
        let depths: Vec<f64> = (0..50).map(|_| rng.gen_range(0.0..2000.0)).collect();
        let temps = depths
            .iter()
            .map(|d| 30.0 - 0.01 * d + gaussian(&mut rng, 0.0, 2.0))
            .collect();
        (depths, temps)
    } else {
        records.iter().map(|r| (r.depth, r.temperature)).unzip()
    };

    PlotData {
        kind: PlotKind::Correlation,
        title: "Parameter Correlation Analysis".into(),
        x_label: "Depth (m)".into(),
        y_label: "Temperature (°C)".into(),
        traces: vec![PlotTrace::numeric("Data Points", depths, temps)],
    }
}

/// Float counts per region, largest first.
pub fn overview(records: &[FloatRecord]) -> PlotData {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(region, _)| *region == record.region) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.region.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let (labels, values): (Vec<String>, Vec<f64>) =
        counts.into_iter().map(|(region, n)| (region, n as f64)).unzip();
    let title = if labels.is_empty() {
        "No data available for visualization"
    } else {
        "ARGO Floats by Region"
    };

    PlotData {
        kind: PlotKind::Overview,
        title: title.into(),
        x_label: "Region".into(),
        y_label: "Number of Floats".into(),
        traces: if labels.is_empty() {
            Vec::new()
        } else {
            vec![PlotTrace::categorical("Float Count by Region", labels, values)]
        },
    }
}

/// Single-parameter profile over 40 depth levels.
pub fn depth_time_profile(region_id: &str, parameter: Parameter) -> DepthTimeProfile {
    let mut rng = rng_for(&format!("{}-depth-time", region_id));
    let depths = linspace(0.0, 2000.0, 40);
    let (values, name): (Vec<f64>, String) = match parameter {
        Parameter::Temperature => (
            depths.iter().map(|d| 20.0 - 0.008 * d + gaussian(&mut rng, 0.0, 0.4)).collect(),
            "Temperature (°C)".into(),
        ),
        Parameter::Salinity => (
            depths.iter().map(|d| 35.0 + 0.0001 * d + gaussian(&mut rng, 0.0, 0.15)).collect(),
            "Salinity (PSU)".into(),
        ),
        other => (
            depths.iter().map(|d| 20.0 - 0.008 * d + gaussian(&mut rng, 0.0, 0.3)).collect(),
            format!("{} Profile", other),
        ),
    };
    DepthTimeProfile {
        title: name,
        depths,
        values,
    }
}

/// Month by depth grid: 12 months, 24 levels between 0 and 2000 m.
pub fn hovmoller(region_id: &str, parameter: Parameter) -> HovmollerGrid {
    let mut rng = rng_for(&format!("{}-hovmoller", region_id));
    let depths = linspace(0.0, 2000.0, 24);
    let (baseline, phase, amplitude, decay, jitter) = match parameter {
        Parameter::Temperature => (linspace(22.0, 4.0, depths.len()), 3.0, 1.0, 500.0, 1.2),
        Parameter::Salinity => (linspace(34.5, 35.2, depths.len()), 6.0, 0.1, 800.0, 0.3),
        _ => (linspace(10.0, 2.0, depths.len()), 4.0, 1.0, 600.0, 0.8),
    };

    let values: Vec<Vec<f64>> = (1..=12)
        .map(|month| {
            let season = (2.0 * PI * (month as f64 - phase) / 12.0).sin() * amplitude;
            depths
                .iter()
                .zip(&baseline)
                .map(|(d, base)| base + season * (-d / decay).exp() + rng.gen_range(-jitter..jitter))
                .collect()
        })
        .collect();

    HovmollerGrid {
        title: format!("{} Hovmoller", parameter),
        months: (1..=12).map(|m| format!("{:02}", m)).collect(),
        depths,
        values,
    }
}

/// Render the plot for a classified query over its filtered records.
pub fn render_plot(classification: &QueryClassification, records: &[FloatRecord], today: NaiveDate) -> PlotData {
    let float_id = records
        .first()
        .map(|r| r.float_id.as_str())
        .unwrap_or(FALLBACK_FLOAT_ID);
    let region_ids = classification.filters.region_list().unwrap_or(&[]);
    let region_label = if region_ids.is_empty() {
        FALLBACK_REGION_LABEL.to_string()
    } else {
        region_ids
            .iter()
            .map(|id| find_region(id).map(|r| r.label).unwrap_or(id.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    match classification.plot {
        PlotKind::TemperatureProfile => temperature_profile(float_id, &region_label),
        PlotKind::SalinityProfile => salinity_profile(float_id, &region_label),
        PlotKind::TimeSeries => {
            let parameter = classification.parameter_focus.unwrap_or(Parameter::Temperature);
            let region = region_ids.first().map(String::as_str).unwrap_or(crate::models::DEFAULT_REGION);
            time_series(parameter, region, 12, today)
        }
        PlotKind::RegionalComparison => regional_comparison(records),
        PlotKind::Correlation => correlation(records),
        PlotKind::Overview => overview(records),
    }
}
