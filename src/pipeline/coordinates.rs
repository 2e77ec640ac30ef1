//! Geocoordinate plausibility filtering
//!
//! Hard geographic bounds are combined with two placeholder heuristics:
//! `(0, 0)` and pairs where both components are whole numbers are treated as
//! generated rather than surveyed locations.

use super::coercion::parse_float;
use crate::constants::{LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::models::StationRecord;
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Check whether a latitude/longitude pair is a plausible station location
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    if !latitude.is_finite() || !longitude.is_finite() {
        return false;
    }

    if latitude < LATITUDE_RANGE.0 || latitude > LATITUDE_RANGE.1 {
        return false;
    }
    if longitude < LONGITUDE_RANGE.0 || longitude > LONGITUDE_RANGE.1 {
        return false;
    }

    if latitude == 0.0 && longitude == 0.0 {
        return false;
    }

    if latitude.fract() == 0.0 && longitude.fract() == 0.0 {
        return false;
    }

    true
}

/// Check a coerced pair; a missing component is never valid
pub fn is_valid_coordinate_pair(latitude: Option<f64>, longitude: Option<f64>) -> bool {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => is_valid_coordinate(lat, lon),
        _ => false,
    }
}

/// Check a pair given as text
pub fn is_valid_coordinate_text(latitude: &str, longitude: &str) -> bool {
    is_valid_coordinate_pair(parse_float(latitude), parse_float(longitude))
}

/// Keep only records with plausible coordinates
pub fn apply_coordinate_filter(
    records: Vec<StationRecord>,
    progress_bar: Option<&ProgressBar>,
) -> Vec<StationRecord> {
    let input_count = records.len();

    let filtered: Vec<StationRecord> = records
        .into_iter()
        .filter(|record| {
            if let Some(pb) = progress_bar {
                pb.inc(1);
            }
            let valid = is_valid_coordinate_pair(record.latitude, record.longitude);
            if !valid {
                debug!(
                    "Record {:?} filtered out: implausible coordinates ({:?}, {:?})",
                    record.station_id, record.latitude, record.longitude
                );
            }
            valid
        })
        .collect();

    info!(
        "Coordinate validation complete: {} -> {} records ({} filtered out)",
        input_count,
        filtered.len(),
        input_count - filtered.len()
    );

    filtered
}
