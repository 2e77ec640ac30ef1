//! Exact-duplicate removal
//!
//! Two passes share the same first-occurrence rule. [`deduplicate_rows`]
//! runs on raw rows before coercion and drops textually identical rows.
//! [`deduplicate_records`] runs after the derived fields and compares the
//! record as it will be written, so rows that only differ in spellings that
//! normalize to the same value (`24/7` and `00:00-24:00`, `40.7128` and
//! `40.71280`, two unmapped charger labels) collapse as well.

use crate::models::{ChargerType, StationRecord};
use crate::schema::RawRow;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, info};

/// Drop exact-duplicate rows, keeping the first occurrence
///
/// # Arguments
///
/// * `rows` - Raw rows in input order
/// * `progress_bar` - Optional progress bar for tracking progress
///
/// # Returns
///
/// Unique rows in order of first occurrence
pub fn deduplicate_rows(rows: Vec<RawRow>, progress_bar: Option<&ProgressBar>) -> Vec<RawRow> {
    let input_count = rows.len();
    let first = first_occurrences(&rows, progress_bar, |row| row);
    let deduplicated = retain_marked(rows, first);

    info!(
        "Deduplication complete: {} -> {} rows ({} duplicates removed)",
        input_count,
        deduplicated.len(),
        input_count - deduplicated.len()
    );

    deduplicated
}

/// Drop records whose written form equals an earlier record's
pub fn deduplicate_records(
    records: Vec<StationRecord>,
    progress_bar: Option<&ProgressBar>,
) -> Vec<StationRecord> {
    let input_count = records.len();
    let first = first_occurrences(&records, progress_bar, OutputKey::from_record);
    let deduplicated = retain_marked(records, first);

    info!(
        "Output deduplication complete: {} -> {} records ({} duplicates removed)",
        input_count,
        deduplicated.len(),
        input_count - deduplicated.len()
    );

    deduplicated
}

/// Mark each item that is the first with its key
fn first_occurrences<'a, T, K>(
    items: &'a [T],
    progress_bar: Option<&ProgressBar>,
    key: impl Fn(&'a T) -> K,
) -> Vec<bool>
where
    K: Hash + Eq,
{
    let mut seen: HashSet<K> = HashSet::with_capacity(items.len());

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if let Some(pb) = progress_bar {
                pb.inc(1);
            }
            let first = seen.insert(key(item));
            if !first {
                debug!("Entry {} is an exact duplicate of an earlier entry", index + 1);
            }
            first
        })
        .collect()
}

fn retain_marked<T>(items: Vec<T>, keep: Vec<bool>) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Every value of a record that reaches the output file
///
/// Floats are compared bit for bit; coercion has already rounded them to the
/// output precision. The raw charger label and connector text are left out
/// because only their normalized forms are written.
#[derive(Debug, PartialEq, Eq, Hash)]
struct OutputKey<'a> {
    station_id: Option<&'a str>,
    latitude: Option<u64>,
    longitude: Option<u64>,
    address: Option<&'a str>,
    availability: Option<&'a str>,
    charger_type: Option<ChargerType>,
    connector_types: &'a [String],
    cost_per_kwh: Option<u64>,
    rating_score: Option<u64>,
    installation_year: Option<i32>,
    charging_capacity_kw: Option<u64>,
    is_24_hours: bool,
    is_high_power: bool,
    extras: &'a [Option<String>],
}

impl<'a> OutputKey<'a> {
    fn from_record(record: &'a StationRecord) -> Self {
        let bits = |value: Option<f64>| value.map(f64::to_bits);
        Self {
            station_id: record.station_id.as_deref(),
            latitude: bits(record.latitude),
            longitude: bits(record.longitude),
            address: record.address.as_deref(),
            availability: record.availability.as_deref(),
            charger_type: record.charger_type,
            connector_types: &record.connector_types,
            cost_per_kwh: bits(record.cost_per_kwh),
            rating_score: bits(record.rating_score),
            installation_year: record.installation_year,
            charging_capacity_kw: bits(record.charging_capacity_kw),
            is_24_hours: record.is_24_hours,
            is_high_power: record.is_high_power,
            extras: &record.extras,
        }
    }
}
