//! Core data structures and types for EV charging station processing.
//!
//! Defines the typed station record that flows through the pipeline, the
//! closed charger-type enumeration, the numeric fields that range filters
//! operate on, and the run-level statistics returned to the CLI.

use crate::constants::columns;
use crate::pipeline::ProcessingStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Canonical charger classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChargerType {
    L1,
    L2,
    DC,
}

impl ChargerType {
    /// All charger classes, fastest first
    pub const ALL: [ChargerType; 3] = [ChargerType::DC, ChargerType::L2, ChargerType::L1];

    /// Short code written to the output dataset
    pub fn code(&self) -> &'static str {
        match self {
            ChargerType::L1 => "L1",
            ChargerType::L2 => "L2",
            ChargerType::DC => "DC",
        }
    }

    /// Parse a canonical short code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L1" => Some(ChargerType::L1),
            "L2" => Some(ChargerType::L2),
            "DC" => Some(ChargerType::DC),
            _ => None,
        }
    }
}

impl fmt::Display for ChargerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Numeric fields that can be range filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    CostPerKwh,
    RatingScore,
    InstallationYear,
    ChargingCapacity,
}

impl NumericField {
    /// Column holding this field in the dataset
    pub fn column_name(&self) -> &'static str {
        match self {
            NumericField::CostPerKwh => columns::COST_PER_KWH,
            NumericField::RatingScore => columns::RATING,
            NumericField::InstallationYear => columns::INSTALLATION_YEAR,
            NumericField::ChargingCapacity => columns::CHARGING_CAPACITY,
        }
    }

    /// Read this field from a record
    pub fn value(&self, record: &StationRecord) -> Option<f64> {
        match self {
            NumericField::CostPerKwh => record.cost_per_kwh,
            NumericField::RatingScore => record.rating_score,
            NumericField::InstallationYear => record.installation_year.map(f64::from),
            NumericField::ChargingCapacity => record.charging_capacity_kw,
        }
    }
}

/// One charging station observation after field coercion
///
/// Fields that a normalizer rewrites into a different type keep their raw
/// text alongside the normalized value: `charger_type_label` is the input
/// label and `charger_type` the mapped class, `connector_types_raw` the
/// delimited input and `connector_types` the parsed list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationRecord {
    pub station_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub availability: Option<String>,
    pub charger_type_label: Option<String>,
    pub charger_type: Option<ChargerType>,
    pub connector_types_raw: Option<String>,
    pub connector_types: Vec<String>,
    pub cost_per_kwh: Option<f64>,
    pub rating_score: Option<f64>,
    pub installation_year: Option<i32>,
    pub charging_capacity_kw: Option<f64>,
    pub is_24_hours: bool,
    pub is_high_power: bool,
    /// Passthrough values, aligned with `ColumnLayout::extra_columns`
    pub extras: Vec<Option<String>>,
}

impl StationRecord {
    /// Get a passthrough value by its position in the layout's extra columns
    pub fn extra(&self, index: usize) -> Option<&str> {
        self.extras.get(index).and_then(|value| value.as_deref())
    }
}

/// Statistics for a complete run of the dataset processor
#[derive(Debug, Default)]
pub struct RunStats {
    /// Rows read from the input file
    pub input_rows: usize,
    /// Rows surviving the pipeline
    pub output_rows: usize,
    /// Cleaned CSV path (None in validate-only mode)
    pub output_path: Option<PathBuf>,
    /// Chart specifications written
    pub chart_paths: Vec<PathBuf>,
    /// Per-stage pipeline statistics
    pub pipeline: ProcessingStats,
    pub processing_time_ms: u128,
}
