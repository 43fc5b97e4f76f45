//! Export projection and CSV rendering.

use crate::api::{ExportTable, ExportValue};
use crate::error::FloatChatResult;
use crate::models::{FloatRecord, Parameter};

/// Record columns in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordColumn {
    FloatId,
    Region,
    Latitude,
    Longitude,
    Timestamp,
    FloatStatus,
    FloatType,
    Depth,
    CycleNumber,
    BatteryLevel,
    LastProfile,
    Temperature,
    Salinity,
}

impl RecordColumn {
    pub const BASE: [RecordColumn; 11] = [
        RecordColumn::FloatId,
        RecordColumn::Region,
        RecordColumn::Latitude,
        RecordColumn::Longitude,
        RecordColumn::Timestamp,
        RecordColumn::FloatStatus,
        RecordColumn::FloatType,
        RecordColumn::Depth,
        RecordColumn::CycleNumber,
        RecordColumn::BatteryLevel,
        RecordColumn::LastProfile,
    ];

    /// Column backing a measured parameter.
    pub fn for_parameter(parameter: Parameter) -> Option<RecordColumn> {
        match parameter {
            Parameter::Temperature => Some(RecordColumn::Temperature),
            Parameter::Salinity => Some(RecordColumn::Salinity),
            Parameter::Depth => Some(RecordColumn::Depth),
            Parameter::Location => None,
        }
    }

    /// Header written to the export file.
    pub fn display_name(&self) -> &'static str {
        match self {
            RecordColumn::FloatId => "float_id",
            RecordColumn::Region => "region",
            RecordColumn::Latitude => "Latitude",
            RecordColumn::Longitude => "Longitude",
            RecordColumn::Timestamp => "Date",
            RecordColumn::FloatStatus => "float_status",
            RecordColumn::FloatType => "float_type",
            RecordColumn::Depth => "Depth_m",
            RecordColumn::CycleNumber => "cycle_number",
            RecordColumn::BatteryLevel => "battery_level",
            RecordColumn::LastProfile => "last_profile",
            RecordColumn::Temperature => "Temp_C",
            RecordColumn::Salinity => "Salinity_PSU",
        }
    }

    fn value(&self, record: &FloatRecord) -> ExportValue {
        match self {
            RecordColumn::FloatId => ExportValue::Text(record.float_id.clone()),
            RecordColumn::Region => ExportValue::Text(record.region.clone()),
            RecordColumn::Latitude => ExportValue::Number(record.latitude),
            RecordColumn::Longitude => ExportValue::Number(record.longitude),
            RecordColumn::Timestamp => ExportValue::Date(record.timestamp),
            RecordColumn::FloatStatus => ExportValue::Text(record.status.to_string()),
            RecordColumn::FloatType => ExportValue::Text(record.float_type.to_string()),
            RecordColumn::Depth => ExportValue::Number(record.depth),
            RecordColumn::CycleNumber => ExportValue::Integer(record.cycle_number),
            RecordColumn::BatteryLevel => ExportValue::Number(record.battery_level),
            RecordColumn::LastProfile => ExportValue::Date(record.last_profile),
            RecordColumn::Temperature => ExportValue::Number(record.temperature),
            RecordColumn::Salinity => ExportValue::Number(record.salinity),
        }
    }
}

/// Base columns followed by the selected parameter columns, deduplicated.
/// A selection that maps to no column (none, empty, or only `Location`)
/// means all measured parameters.
pub fn export_columns(parameters: Option<&[Parameter]>) -> Vec<RecordColumn> {
    let mut selected: Vec<RecordColumn> = parameters
        .unwrap_or_default()
        .iter()
        .filter_map(|p| RecordColumn::for_parameter(*p))
        .collect();
    if selected.is_empty() {
        selected = Parameter::MEASURED
            .iter()
            .filter_map(|p| RecordColumn::for_parameter(*p))
            .collect();
    }

    let mut columns = RecordColumn::BASE.to_vec();
    for column in selected {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    columns
}

pub fn project_for_export(records: &[FloatRecord], parameters: Option<&[Parameter]>) -> ExportTable {
    let columns = export_columns(parameters);
    ExportTable {
        columns: columns.iter().map(|c| c.display_name().to_string()).collect(),
        rows: records
            .iter()
            .map(|record| columns.iter().map(|c| c.value(record)).collect())
            .collect(),
    }
}

impl ExportTable {
    /// Header row followed by one line per record.
    pub fn to_csv(&self) -> FloatChatResult<String> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes).map_err(|e| {
            crate::error::FloatChatError::InvalidInput(format!("CSV output is not UTF-8: {}", e))
        })
    }
}
