//! Derived boolean flags computed from normalized fields

use crate::constants::AVAILABILITY_FULL_DAY;
use crate::models::StationRecord;
use tracing::info;

/// Set `is_24_hours` and `is_high_power` on a record
///
/// Availability must already be normalized. A missing capacity counts as
/// zero, so it is never high power.
pub fn compute_derived_fields(record: &mut StationRecord, high_power_threshold_kw: f64) {
    record.is_24_hours = record.availability.as_deref() == Some(AVAILABILITY_FULL_DAY);
    record.is_high_power = record.charging_capacity_kw.unwrap_or(0.0) > high_power_threshold_kw;
}

/// Compute derived fields for every record
pub fn apply_derived_fields(
    mut records: Vec<StationRecord>,
    high_power_threshold_kw: f64,
) -> Vec<StationRecord> {
    for record in &mut records {
        compute_derived_fields(record, high_power_threshold_kw);
    }

    let always_open = records.iter().filter(|r| r.is_24_hours).count();
    let high_power = records.iter().filter(|r| r.is_high_power).count();
    info!(
        "Derived fields computed: {} open 24 hours, {} high power (> {} kW) of {} records",
        always_open,
        high_power,
        high_power_threshold_kw,
        records.len()
    );

    records
}
