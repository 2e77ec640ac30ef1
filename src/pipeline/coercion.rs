//! Field coercion from raw text cells to a typed `StationRecord`
//!
//! Runs once per row before any validator or normalizer. A cell that is
//! present but cannot be parsed into its field's type becomes `None` and is
//! counted; coercion never rejects a row. Float fields are rounded to the
//! output precision here, so every later stage sees the value as written.

use super::stats::CoercionStats;
use crate::constants::MAX_FLOAT_PRECISION;
use crate::models::StationRecord;
use crate::schema::{ColumnLayout, CoreColumn, RawRow};

/// Largest magnitude below which every integer is an exact f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Coerce every raw row into a typed record
pub fn coerce_rows(
    rows: Vec<RawRow>,
    layout: &ColumnLayout,
    float_precision: usize,
    stats: &mut CoercionStats,
) -> Vec<StationRecord> {
    rows.iter()
        .map(|row| coerce_row(row, layout, float_precision, stats))
        .collect()
}

/// Coerce a single raw row
pub fn coerce_row(
    row: &RawRow,
    layout: &ColumnLayout,
    float_precision: usize,
    stats: &mut CoercionStats,
) -> StationRecord {
    let text = |column: CoreColumn| get_optional_field(row, layout, column.header());
    let mut float = |column: CoreColumn| {
        coerce_float(row, layout, column, stats)
            .map(|value| round_to_precision(value, float_precision))
    };

    let latitude = float(CoreColumn::Latitude);
    let longitude = float(CoreColumn::Longitude);
    let cost_per_kwh = float(CoreColumn::CostPerKwh);
    let rating_score = float(CoreColumn::Rating);
    let charging_capacity_kw = float(CoreColumn::ChargingCapacity);

    let raw_year = text(CoreColumn::InstallationYear);
    let installation_year = raw_year.and_then(parse_year);
    if raw_year.is_some() && installation_year.is_none() {
        stats.record_nulled(CoreColumn::InstallationYear.header());
    }

    let extras = layout
        .extra_columns()
        .iter()
        .map(|column| get_optional_field(row, layout, column).map(str::to_string))
        .collect();

    StationRecord {
        station_id: text(CoreColumn::StationId).map(str::to_string),
        latitude,
        longitude,
        address: text(CoreColumn::Address).map(str::to_string),
        availability: text(CoreColumn::Availability).map(str::to_string),
        charger_type_label: text(CoreColumn::ChargerType).map(str::to_string),
        charger_type: None,
        connector_types_raw: text(CoreColumn::ConnectorTypes).map(str::to_string),
        connector_types: Vec::new(),
        cost_per_kwh,
        rating_score,
        installation_year,
        charging_capacity_kw,
        is_24_hours: false,
        is_high_power: false,
        extras,
    }
}

fn coerce_float(
    row: &RawRow,
    layout: &ColumnLayout,
    column: CoreColumn,
    stats: &mut CoercionStats,
) -> Option<f64> {
    let raw = get_optional_field(row, layout, column.header());
    let value = raw.and_then(parse_float);
    if raw.is_some() && value.is_none() {
        stats.record_nulled(column.header());
    }
    value
}

/// Parse a finite float, tolerating surrounding whitespace
pub fn parse_float(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Round to `precision` decimal places
///
/// Values too large to scale exactly are returned unchanged; their decimal
/// expansion at that precision already reads back to the same float.
pub fn round_to_precision(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_FLOAT_PRECISION) as i32);
    let scaled = (value * scale).round();
    if scaled.is_finite() && scaled.abs() < MAX_EXACT_INTEGER {
        scaled / scale
    } else {
        value
    }
}

/// Parse a calendar year; fractional values are not years
pub fn parse_year(value: &str) -> Option<i32> {
    parse_float(value)
        .filter(|year| year.fract() == 0.0 && year.abs() <= i32::MAX as f64)
        .map(|year| year as i32)
}

/// Get a cell by column name; missing columns and empty cells are `None`
pub fn get_optional_field<'a>(
    row: &'a RawRow,
    layout: &ColumnLayout,
    column_name: &str,
) -> Option<&'a str> {
    layout
        .get_index(column_name)
        .and_then(|index| row.get(index))
        .and_then(|cell| cell.as_deref())
        .filter(|cell| !cell.is_empty())
}
