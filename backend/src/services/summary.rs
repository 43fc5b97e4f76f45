//! Summary card statistics.

use std::collections::HashSet;

use crate::api::{ParameterSnapshot, ParameterStats};
use crate::models::{AggregationMethod, FloatRecord, Parameter};

/// Compute mean, median, population standard deviation, min and max.
/// Returns `None` for an empty slice.
pub fn compute_stats(values: &[f64]) -> Option<ParameterStats> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(ParameterStats {
        count,
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
    })
}

/// Summarize one parameter over `records`. `None` when there is nothing to
/// summarize.
pub fn summarize(
    records: &[FloatRecord],
    parameter: Parameter,
    method: AggregationMethod,
) -> Option<ParameterSnapshot> {
    if records.is_empty() {
        return None;
    }

    if parameter == Parameter::Location {
        let unique: HashSet<&str> = records.iter().map(|r| r.float_id.as_str()).collect();
        return Some(ParameterSnapshot {
            label: "Unique Floats".to_string(),
            value: unique.len() as f64,
            unit: parameter.unit().to_string(),
            method: "Count".to_string(),
        });
    }

    let values: Vec<f64> = records.iter().filter_map(|r| parameter.value_of(r)).collect();
    let stats = compute_stats(&values)?;
    let value = match method {
        AggregationMethod::Mean => stats.mean,
        AggregationMethod::Median => stats.median,
        AggregationMethod::Min => stats.min,
        AggregationMethod::Max => stats.max,
    };

    Some(ParameterSnapshot {
        label: parameter.to_string(),
        value,
        unit: parameter.unit().to_string(),
        method: method.to_string(),
    })
}

/// String-keyed variant for UI input: unknown parameters yield `None`,
/// unknown methods fall back to the mean.
pub fn summarize_named(records: &[FloatRecord], parameter: &str, method: &str) -> Option<ParameterSnapshot> {
    let parameter = match parameter.parse::<Parameter>() {
        Ok(p) => p,
        Err(e) => {
            log::debug!("Skipping summary: {}", e);
            return None;
        }
    };
    summarize(records, parameter, AggregationMethod::parse_or_default(method))
}

/// Column means used by the chat text ("Average temperature: ...").
pub fn average_of(records: &[FloatRecord], parameter: Parameter) -> Option<f64> {
    summarize(records, parameter, AggregationMethod::Mean).map(|s| s.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FloatStatus, FloatType};
    use chrono::NaiveDate;

    fn with_salinity(id: &str, salinity: f64) -> FloatRecord {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        FloatRecord {
            float_id: id.to_string(),
            region: "indian_ocean".into(),
            latitude: 0.0,
            longitude: 75.0,
            depth: salinity * 10.0,
            status: FloatStatus::Active,
            float_type: FloatType::Core,
            timestamp: day,
            last_profile: day,
            temperature: 20.0,
            salinity,
            cycle_number: 12,
            battery_level: 90.0,
        }
    }

    #[test]
    fn test_compute_stats() {
        let stats = compute_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.std_dev - std::f64::consts::SQRT_2).abs() < 0.001);
    }

    #[test]
    fn test_compute_stats_even_count_median() {
        let stats = compute_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_compute_stats_empty() {
        assert!(compute_stats(&[]).is_none());
    }

    #[test]
    fn test_salinity_mean() {
        let records = vec![with_salinity("A", 34.0), with_salinity("B", 35.0), with_salinity("C", 36.0)];
        let snapshot = summarize(&records, Parameter::Salinity, AggregationMethod::Mean).unwrap();
        assert_eq!(
            snapshot,
            ParameterSnapshot {
                label: "Salinity".into(),
                value: 35.0,
                unit: "PSU".into(),
                method: "Mean".into(),
            }
        );
    }

    #[test]
    fn test_min_max_median() {
        let records = vec![with_salinity("A", 34.0), with_salinity("B", 36.5), with_salinity("C", 35.0)];
        assert_eq!(summarize(&records, Parameter::Salinity, AggregationMethod::Min).unwrap().value, 34.0);
        assert_eq!(summarize(&records, Parameter::Salinity, AggregationMethod::Max).unwrap().value, 36.5);
        assert_eq!(summarize(&records, Parameter::Salinity, AggregationMethod::Median).unwrap().value, 35.0);
        assert_eq!(summarize(&records, Parameter::Depth, AggregationMethod::Max).unwrap().unit, "m");
    }

    #[test]
    fn test_location_counts_unique_floats() {
        let records = vec![with_salinity("A", 34.0), with_salinity("A", 35.0), with_salinity("B", 36.0)];
        let snapshot = summarize(&records, Parameter::Location, AggregationMethod::Max).unwrap();
        assert_eq!(snapshot.label, "Unique Floats");
        assert_eq!(snapshot.value, 2.0);
        assert_eq!(snapshot.unit, "count");
        assert_eq!(snapshot.method, "Count");
    }

    #[test]
    fn test_empty_input_has_no_snapshot() {
        assert!(summarize(&[], Parameter::Temperature, AggregationMethod::Mean).is_none());
        assert!(summarize(&[], Parameter::Location, AggregationMethod::Mean).is_none());
    }

    #[test]
    fn test_summarize_named_falls_back_to_mean() {
        let records = vec![with_salinity("A", 34.0), with_salinity("B", 36.0)];
        let snapshot = summarize_named(&records, "salinity", "geometric").unwrap();
        assert_eq!(snapshot.method, "Mean");
        assert_eq!(snapshot.value, 35.0);
        assert!(summarize_named(&records, "oxygen", "Mean").is_none());
    }
}
