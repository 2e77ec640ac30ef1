//! Field normalizers
//!
//! Normalizers rewrite a field into canonical form and never affect whether a
//! record survives. Each stage function consumes the record set and returns it
//! with the field rewritten in place.

use crate::constants::{AVAILABILITY_ALWAYS_OPEN, AVAILABILITY_FULL_DAY, CONNECTOR_DELIMITER};
use crate::models::{ChargerType, StationRecord};
use tracing::{debug, info};

/// Canonicalize an availability string
///
/// Missing values and the `24/7` sentinel become `00:00-24:00`; any other
/// value is assumed to already be an interval and passes through unchanged.
pub fn normalize_availability(availability: Option<&str>) -> String {
    match availability {
        None => AVAILABILITY_FULL_DAY.to_string(),
        Some(value) if value.trim() == AVAILABILITY_ALWAYS_OPEN => {
            AVAILABILITY_FULL_DAY.to_string()
        }
        Some(value) => value.to_string(),
    }
}

/// Map a charger type label onto the closed set of charger classes
///
/// Labels are matched exactly. Canonical codes map to themselves so that
/// already-cleaned data keeps its classes.
pub fn normalize_charger_type(label: &str) -> Option<ChargerType> {
    match label {
        "AC Level 1" => Some(ChargerType::L1),
        "AC Level 2" => Some(ChargerType::L2),
        "DC Fast Charger" => Some(ChargerType::DC),
        code => ChargerType::from_code(code),
    }
}

/// Split a delimited connector list into trimmed tokens
pub fn parse_connector_types(connectors: Option<&str>) -> Vec<String> {
    connectors
        .map(|raw| {
            raw.split(CONNECTOR_DELIMITER)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Rewrite every record's availability into canonical form
pub fn apply_availability_normalization(mut records: Vec<StationRecord>) -> Vec<StationRecord> {
    let mut expanded = 0;

    for record in &mut records {
        let normalized = normalize_availability(record.availability.as_deref());
        if record.availability.as_deref() != Some(normalized.as_str()) {
            expanded += 1;
        }
        record.availability = Some(normalized);
    }

    debug!("Availability normalization: {} values expanded", expanded);
    records
}

/// Map every record's charger type label to a charger class
pub fn apply_charger_type_normalization(mut records: Vec<StationRecord>) -> Vec<StationRecord> {
    let mut unmapped = 0;

    for record in &mut records {
        record.charger_type = record
            .charger_type_label
            .as_deref()
            .and_then(normalize_charger_type);

        if record.charger_type.is_none() {
            unmapped += 1;
            debug!(
                "Record {:?}: charger type {:?} not mapped",
                record.station_id, record.charger_type_label
            );
        }
    }

    if unmapped > 0 {
        info!(
            "Charger type normalization: {} of {} records have no recognised charger type",
            unmapped,
            records.len()
        );
    }
    records
}

/// Parse every record's connector list
pub fn apply_connector_parsing(mut records: Vec<StationRecord>) -> Vec<StationRecord> {
    for record in &mut records {
        record.connector_types = parse_connector_types(record.connector_types_raw.as_deref());
    }
    records
}
