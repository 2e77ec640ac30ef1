//! Tests for the record pipeline
//!
//! Stage-level unit tests live next to each stage; these cover the
//! orchestrated pipeline, deduplication and statistics.


// Test helper functions and fixtures
use crate::schema::{ColumnLayout, RawRow, RawTable};

/// Header row used by the fixtures, in input order
pub const TEST_HEADERS: [&str; 12] = [
    "Station ID",
    "Latitude",
    "Longitude",
    "Address",
    "Availability",
    "Charger Type",
    "Connector Types",
    "Cost (USD/kWh)",
    "Reviews (Rating)",
    "Installation Year",
    "Charging Capacity (kW)",
    "City",
];

/// Create the fixture column layout
pub fn create_test_layout() -> ColumnLayout {
    ColumnLayout::analyze(&TEST_HEADERS)
}

/// Create a row that passes every stage
pub fn create_valid_row(station_id: &str) -> RawRow {
    [
        station_id,
        "40.7128",
        "-74.0060",
        "123 Main Street, Springfield",
        "24/7",
        "AC Level 2",
        "CCS, Type 2",
        "0.25",
        "4.5",
        "2018",
        "50",
        "Springfield",
    ]
    .iter()
    .map(|cell| Some(cell.to_string()))
    .collect()
}

/// Replace one cell of a fixture row; `None` empties it
pub fn with_cell(mut row: RawRow, column: &str, value: Option<&str>) -> RawRow {
    let index = TEST_HEADERS
        .iter()
        .position(|header| *header == column)
        .unwrap_or_else(|| panic!("unknown fixture column {column}"));
    row[index] = value.map(str::to_string);
    row
}

/// Wrap fixture rows in a raw table
pub fn create_test_table(rows: Vec<RawRow>) -> RawTable {
    RawTable::new(create_test_layout(), rows)
}
