//! Numeric range filtering
//!
//! Values were already coerced to numbers, so a null here means the cell was
//! missing or unparseable. Whether such records survive is decided by the
//! configured [`NumericNullPolicy`].

use crate::config::{NumericNullPolicy, NumericRange};
use crate::models::StationRecord;
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Check one value against a range under the given null policy
pub fn value_in_range(value: Option<f64>, range: &NumericRange, policy: NumericNullPolicy) -> bool {
    match value {
        Some(value) => range.contains(value),
        None => policy == NumericNullPolicy::Retain,
    }
}

/// Keep records whose field value is within the range (or null, if retained)
pub fn apply_numeric_range(
    records: Vec<StationRecord>,
    range: &NumericRange,
    policy: NumericNullPolicy,
    progress_bar: Option<&ProgressBar>,
) -> Vec<StationRecord> {
    let input_count = records.len();
    let mut nulls_seen = 0;

    let filtered: Vec<StationRecord> = records
        .into_iter()
        .filter(|record| {
            if let Some(pb) = progress_bar {
                pb.inc(1);
            }
            let value = range.field.value(record);
            if value.is_none() {
                nulls_seen += 1;
            }
            let keep = value_in_range(value, range, policy);
            if !keep {
                debug!(
                    "Record {:?} filtered out: {} value {:?} outside [{}, {}]",
                    record.station_id,
                    range.field.column_name(),
                    value,
                    range.min,
                    range.max
                );
            }
            keep
        })
        .collect();

    info!(
        "Range filter on {} complete: {} -> {} records ({} filtered out, {} null values)",
        range.field.column_name(),
        input_count,
        filtered.len(),
        input_count - filtered.len(),
        nulls_seen
    );

    filtered
}
