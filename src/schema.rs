//! Column layout of the charging station dataset.
//!
//! Maps the header row onto the known columns that coercion types, and keeps
//! every other column as an ordered passthrough so the output preserves the
//! input's column order.

use crate::constants::{columns, is_derived_column};
use std::collections::HashMap;
use tracing::debug;

/// Columns with a typed counterpart in `StationRecord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreColumn {
    StationId,
    Latitude,
    Longitude,
    Address,
    Availability,
    ChargerType,
    ConnectorTypes,
    CostPerKwh,
    Rating,
    InstallationYear,
    ChargingCapacity,
}

impl CoreColumn {
    pub const ALL: [CoreColumn; 11] = [
        CoreColumn::StationId,
        CoreColumn::Latitude,
        CoreColumn::Longitude,
        CoreColumn::Address,
        CoreColumn::Availability,
        CoreColumn::ChargerType,
        CoreColumn::ConnectorTypes,
        CoreColumn::CostPerKwh,
        CoreColumn::Rating,
        CoreColumn::InstallationYear,
        CoreColumn::ChargingCapacity,
    ];

    /// Header text of the column
    pub fn header(&self) -> &'static str {
        match self {
            CoreColumn::StationId => columns::STATION_ID,
            CoreColumn::Latitude => columns::LATITUDE,
            CoreColumn::Longitude => columns::LONGITUDE,
            CoreColumn::Address => columns::ADDRESS,
            CoreColumn::Availability => columns::AVAILABILITY,
            CoreColumn::ChargerType => columns::CHARGER_TYPE,
            CoreColumn::ConnectorTypes => columns::CONNECTOR_TYPES,
            CoreColumn::CostPerKwh => columns::COST_PER_KWH,
            CoreColumn::Rating => columns::RATING,
            CoreColumn::InstallationYear => columns::INSTALLATION_YEAR,
            CoreColumn::ChargingCapacity => columns::CHARGING_CAPACITY,
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.header() == header)
    }
}

/// Source of an output column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputColumn {
    Core(CoreColumn),
    /// Index into `ColumnLayout::extra_columns`
    Extra(usize),
}

/// One input row, cells in layout order; empty cells are `None`
pub type RawRow = Vec<Option<String>>;

/// Column layout derived from a header row
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    /// Retained headers in input order (derived columns removed)
    headers: Vec<String>,

    /// Header to position in `headers`
    name_to_index: HashMap<String, usize>,

    /// Headers without a typed counterpart, in input order
    extra_columns: Vec<String>,

    /// Input columns dropped because they are recomputed
    ignored_columns: Vec<String>,
}

impl ColumnLayout {
    /// Analyze a header row
    pub fn analyze<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut layout = ColumnLayout::default();

        for header in headers {
            let column_name = header.as_ref().trim().to_string();

            if is_derived_column(&column_name) {
                layout.ignored_columns.push(column_name);
                continue;
            }

            layout
                .name_to_index
                .insert(column_name.clone(), layout.headers.len());
            if CoreColumn::from_header(&column_name).is_none() {
                layout.extra_columns.push(column_name.clone());
            }
            layout.headers.push(column_name);
        }

        debug!(
            "Column layout: {} columns ({} passthrough, {} ignored)",
            layout.headers.len(),
            layout.extra_columns.len(),
            layout.ignored_columns.len()
        );

        layout
    }

    /// Required columns absent from the header
    pub fn missing_required(&self) -> Vec<String> {
        columns::REQUIRED
            .iter()
            .filter(|name| !self.name_to_index.contains_key(**name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Retained headers in input order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn ignored_columns(&self) -> &[String] {
        &self.ignored_columns
    }

    /// Position of a column within a raw row
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Position of a passthrough column within `StationRecord::extras`
    pub fn extra_index(&self, column_name: &str) -> Option<usize> {
        self.extra_columns
            .iter()
            .position(|name| name == column_name)
    }

    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Output columns in input order, each paired with its value source
    pub fn output_columns(&self) -> Vec<(&str, OutputColumn)> {
        let mut extra_position = 0;
        self.headers
            .iter()
            .map(|header| match CoreColumn::from_header(header) {
                Some(core) => (header.as_str(), OutputColumn::Core(core)),
                None => {
                    let source = OutputColumn::Extra(extra_position);
                    extra_position += 1;
                    (header.as_str(), source)
                }
            })
            .collect()
    }
}

/// Rows of a dataset as read, before any coercion
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub layout: ColumnLayout,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(layout: ColumnLayout, rows: Vec<RawRow>) -> Self {
        Self { layout, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_headers() -> Vec<&'static str> {
        vec![
            "Station ID",
            "Latitude",
            "Longitude",
            "Address",
            "Station Name",
            "Charger Type",
            "Is24Hours",
            "City",
        ]
    }

    #[test]
    fn test_analyze_separates_core_and_extra_columns() {
        let layout = ColumnLayout::analyze(&sample_headers());

        assert_eq!(layout.headers().len(), 7);
        assert_eq!(layout.extra_columns(), &["Station Name", "City"]);
        assert_eq!(layout.ignored_columns(), &["Is24Hours"]);
        assert_eq!(layout.get_index("City"), Some(6));
        assert_eq!(layout.extra_index("City"), Some(1));
        assert!(layout.missing_required().is_empty());
    }

    #[test]
    fn test_missing_required_columns() {
        let layout = ColumnLayout::analyze(&["Station ID", "Latitude"]);
        assert_eq!(layout.missing_required(), vec!["Longitude", "Address"]);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let layout = ColumnLayout::analyze(&[" Latitude ", "Longitude", "Address  "]);
        assert!(layout.has_column("Latitude"));
        assert!(layout.has_column("Address"));
    }

    #[test]
    fn test_output_columns_keep_input_order() {
        let layout = ColumnLayout::analyze(&sample_headers());
        let output = layout.output_columns();

        let names: Vec<_> = output.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "Station ID",
                "Latitude",
                "Longitude",
                "Address",
                "Station Name",
                "Charger Type",
                "City"
            ]
        );
        assert_eq!(output[4].1, OutputColumn::Extra(0));
        assert_eq!(output[5].1, OutputColumn::Core(CoreColumn::ChargerType));
        assert_eq!(output[6].1, OutputColumn::Extra(1));
    }

    #[test]
    fn test_core_column_round_trip_by_header() {
        for column in CoreColumn::ALL {
            assert_eq!(CoreColumn::from_header(column.header()), Some(column));
        }
        assert_eq!(CoreColumn::from_header("latitude"), None);
    }
}
