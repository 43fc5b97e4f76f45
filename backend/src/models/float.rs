//! Float records and their categorical fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status of a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloatStatus {
    Active,
    Inactive,
    Maintenance,
    Deployed,
}

impl FloatStatus {
    /// Statuses drawn by the regional catalog generator.
    pub const CATALOG: [FloatStatus; 3] = [
        FloatStatus::Active,
        FloatStatus::Inactive,
        FloatStatus::Maintenance,
    ];

    /// Statuses drawn for the platform-model catalog.
    pub const PLATFORM: [FloatStatus; 4] = [
        FloatStatus::Active,
        FloatStatus::Inactive,
        FloatStatus::Maintenance,
        FloatStatus::Deployed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FloatStatus::Active => "Active",
            FloatStatus::Inactive => "Inactive",
            FloatStatus::Maintenance => "Maintenance",
            FloatStatus::Deployed => "Deployed",
        }
    }
}

impl fmt::Display for FloatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FloatStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloatStatus::PLATFORM
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown float status '{}'", s))
    }
}

/// Float class: mission classes used by the regional catalog, and platform
/// models used by the map explorer catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloatType {
    Core,
    Bio,
    Deep,
    #[serde(rename = "APEX")]
    Apex,
    #[serde(rename = "NOVA")]
    Nova,
    #[serde(rename = "ARVOR")]
    Arvor,
    #[serde(rename = "PROVOR")]
    Provor,
    #[serde(rename = "SOLO")]
    Solo,
}

impl FloatType {
    pub const MISSION: [FloatType; 3] = [FloatType::Core, FloatType::Bio, FloatType::Deep];

    pub const PLATFORM: [FloatType; 5] = [
        FloatType::Apex,
        FloatType::Nova,
        FloatType::Arvor,
        FloatType::Provor,
        FloatType::Solo,
    ];

    pub const ALL: [FloatType; 8] = [
        FloatType::Core,
        FloatType::Bio,
        FloatType::Deep,
        FloatType::Apex,
        FloatType::Nova,
        FloatType::Arvor,
        FloatType::Provor,
        FloatType::Solo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FloatType::Core => "Core",
            FloatType::Bio => "Bio",
            FloatType::Deep => "Deep",
            FloatType::Apex => "APEX",
            FloatType::Nova => "NOVA",
            FloatType::Arvor => "ARVOR",
            FloatType::Provor => "PROVOR",
            FloatType::Solo => "SOLO",
        }
    }
}

impl fmt::Display for FloatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FloatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloatType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown float type '{}'", s))
    }
}

/// One synthetic observation summary from the regional catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatRecord {
    pub float_id: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub status: FloatStatus,
    pub float_type: FloatType,
    pub timestamp: NaiveDate,
    pub last_profile: NaiveDate,
    pub temperature: f64,
    pub salinity: f64,
    pub cycle_number: u32,
    pub battery_level: f64,
}

/// Platform-model float as shown on the map explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatLocation {
    pub float_id: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub float_type: FloatType,
    pub institution: String,
    pub deployment_date: NaiveDate,
    pub last_profile: NaiveDate,
    pub cycle_number: u32,
    pub status: FloatStatus,
    /// Rated profiling depth in meters.
    pub max_depth: f64,
    pub battery_level: f64,
    pub temperature_range: (f64, f64),
    pub salinity_range: (f64, f64),
}

/// Measured quantity that can be summarized or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Temperature,
    Salinity,
    Depth,
    Location,
}

impl Parameter {
    /// Parameters backed by a numeric record column.
    pub const MEASURED: [Parameter; 3] =
        [Parameter::Temperature, Parameter::Salinity, Parameter::Depth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::Salinity => "Salinity",
            Parameter::Depth => "Depth",
            Parameter::Location => "Location",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Temperature => "°C",
            Parameter::Salinity => "PSU",
            Parameter::Depth => "m",
            Parameter::Location => "count",
        }
    }

    /// Numeric value of this parameter on a record, `None` for `Location`.
    pub fn value_of(&self, record: &FloatRecord) -> Option<f64> {
        match self {
            Parameter::Temperature => Some(record.temperature),
            Parameter::Salinity => Some(record.salinity),
            Parameter::Depth => Some(record.depth),
            Parameter::Location => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "temp" => Ok(Parameter::Temperature),
            "salinity" | "salt" | "psu" => Ok(Parameter::Salinity),
            "depth" => Ok(Parameter::Depth),
            "location" => Ok(Parameter::Location),
            other => Err(format!("Unknown parameter '{}'", other)),
        }
    }
}

/// Reduction applied by the summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AggregationMethod {
    #[default]
    Mean,
    Median,
    Min,
    Max,
}

impl AggregationMethod {
    /// Lenient parse used by the UI boundary: anything unrecognized is `Mean`.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "median" => AggregationMethod::Median,
            "min" | "minimum" => AggregationMethod::Min,
            "max" | "maximum" => AggregationMethod::Max,
            _ => AggregationMethod::Mean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMethod::Mean => "Mean",
            AggregationMethod::Median => "Median",
            AggregationMethod::Min => "Min",
            AggregationMethod::Max => "Max",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!("active".parse::<FloatStatus>(), Ok(FloatStatus::Active));
        assert_eq!(" Deployed ".parse::<FloatStatus>(), Ok(FloatStatus::Deployed));
        assert!("lost".parse::<FloatStatus>().is_err());
    }

    #[test]
    fn test_float_type_platform_names_round_trip_through_serde() {
        let json = serde_json::to_string(&FloatType::Provor).unwrap();
        assert_eq!(json, "\"PROVOR\"");
        let back: FloatType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FloatType::Provor);
        assert_eq!("apex".parse::<FloatType>(), Ok(FloatType::Apex));
    }

    #[test]
    fn test_unknown_method_parses_to_mean() {
        assert_eq!(AggregationMethod::parse_or_default("mode"), AggregationMethod::Mean);
        assert_eq!(AggregationMethod::parse_or_default("MEDIAN"), AggregationMethod::Median);
    }

    #[test]
    fn test_parameter_units() {
        assert_eq!(Parameter::Temperature.unit(), "°C");
        assert_eq!(Parameter::Salinity.unit(), "PSU");
        assert_eq!(Parameter::Depth.unit(), "m");
        assert_eq!("salt".parse::<Parameter>(), Ok(Parameter::Salinity));
    }
}
