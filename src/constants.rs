//! Application constants for the EV charging station processor
//!
//! This module contains the column contract of the input dataset, the
//! canonical values written by the normalizers, default validation bounds,
//! and the default file locations used by the CLI.

// =============================================================================
// Column Names
// =============================================================================

/// Column names of the charging station dataset
pub mod columns {
    pub const STATION_ID: &str = "Station ID";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const ADDRESS: &str = "Address";
    pub const AVAILABILITY: &str = "Availability";
    pub const CHARGER_TYPE: &str = "Charger Type";
    pub const CONNECTOR_TYPES: &str = "Connector Types";
    pub const COST_PER_KWH: &str = "Cost (USD/kWh)";
    pub const RATING: &str = "Reviews (Rating)";
    pub const INSTALLATION_YEAR: &str = "Installation Year";
    pub const CHARGING_CAPACITY: &str = "Charging Capacity (kW)";

    /// Derived columns appended to the output
    pub const IS_24_HOURS: &str = "Is24Hours";
    pub const IS_HIGH_POWER: &str = "IsHighPower";

    // Passthrough columns read by the chart generators
    pub const STATION_NAME: &str = "Station Name";
    pub const CITY: &str = "City";
    pub const USAGE_PER_DAY: &str = "Usage Stats (avg users/day)";
    pub const DISTANCE_TO_CITY: &str = "Distance to City (miles)";
    pub const PARKING_SPOTS: &str = "Number of Parking Spots";
    pub const RENEWABLE_ENERGY: &str = "Renewable Energy";

    /// Columns the validators cannot work without
    pub const REQUIRED: &[&str] = &[LATITUDE, LONGITUDE, ADDRESS];

    /// Columns recomputed on every run and therefore ignored on input
    pub const DERIVED: &[&str] = &[IS_24_HOURS, IS_HIGH_POWER];
}

// =============================================================================
// Canonical Values
// =============================================================================

/// Availability sentinel meaning "always open"
pub const AVAILABILITY_ALWAYS_OPEN: &str = "24/7";

/// Canonical interval written in place of the always-open sentinel
pub const AVAILABILITY_FULL_DAY: &str = "00:00-24:00";

/// Delimiter between connector types in the raw column
pub const CONNECTOR_DELIMITER: char = ',';

/// Separator used when serializing a parsed connector list
pub const CONNECTOR_OUTPUT_SEPARATOR: &str = ", ";

// =============================================================================
// Validation Bounds
// =============================================================================

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Shortest trimmed address that can hold a street number and name
pub const MIN_ADDRESS_LENGTH: usize = 10;

/// Lower-cased address patterns produced by synthetic data generators
pub const ADDRESS_DENYLIST_PATTERNS: &[&str] = &[
    r"random",
    r"city \d+",
    r"country$",
    r"^\d+\s+\d+$",
    r"unknown",
    r"test",
    r"sample",
];

pub const DEFAULT_COST_RANGE: (f64, f64) = (0.0, 2.0);
pub const DEFAULT_RATING_RANGE: (f64, f64) = (1.0, 5.0);
pub const EARLIEST_INSTALLATION_YEAR: i32 = 2000;

/// Capacity above which a station counts as high power (kW)
pub const HIGH_POWER_THRESHOLD_KW: f64 = 100.0;

// =============================================================================
// Output Configuration
// =============================================================================

pub const DEFAULT_INPUT_PATH: &str = "data/detailed_ev_charging_stations.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_FILENAME: &str = "processed_ev_charging_stations.csv";
pub const DEFAULT_CHARTS_SUBDIR: &str = "charts";

/// Decimal places written for float columns
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Most decimal places an f64 can carry without spurious digits
pub const MAX_FLOAT_PRECISION: usize = 15;

pub const HEATMAP_SPEC_FILENAME: &str = "heatmap_spec.json";
pub const SCATTER_SPEC_FILENAME: &str = "scatter_spec.json";
pub const TREND_SPEC_FILENAME: &str = "trend_spec.json";

/// Vega-Lite schema referenced by every chart specification
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Check whether a column is recomputed by the pipeline
pub fn is_derived_column(column_name: &str) -> bool {
    columns::DERIVED.contains(&column_name)
}
