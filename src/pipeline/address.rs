//! Address plausibility filtering
//!
//! A record survives only if its address looks like a real postal address.
//! The denylist of known synthetic-data signatures is checked first; the
//! structural checks (minimum length, presence of a house number) only run
//! when no signature matched.

use crate::constants::{ADDRESS_DENYLIST_PATTERNS, MIN_ADDRESS_LENGTH};
use crate::models::StationRecord;
use indicatif::ProgressBar;
use regex::RegexSet;
use std::sync::LazyLock;
use tracing::{debug, info};

static ADDRESS_DENYLIST: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(ADDRESS_DENYLIST_PATTERNS).expect("address denylist patterns are valid regexes")
});

/// Why an address was judged implausible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRejection {
    Missing,
    Denylisted,
    TooShort,
    NoDigits,
}

/// Check an address, returning the first failed check
pub fn check_address(address: Option<&str>) -> Result<(), AddressRejection> {
    let Some(address) = address else {
        return Err(AddressRejection::Missing);
    };

    let trimmed = address.trim();
    let normalized = trimmed.to_lowercase();

    if ADDRESS_DENYLIST.is_match(&normalized) {
        return Err(AddressRejection::Denylisted);
    }

    if trimmed.chars().count() < MIN_ADDRESS_LENGTH {
        return Err(AddressRejection::TooShort);
    }

    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(AddressRejection::NoDigits);
    }

    Ok(())
}

/// Check whether an address is plausible
pub fn is_valid_address(address: Option<&str>) -> bool {
    check_address(address).is_ok()
}

/// Keep only records with a plausible address
pub fn apply_address_filter(
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
            match check_address(record.address.as_deref()) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(
                        "Record {:?} filtered out: address {:?} rejected ({:?})",
                        record.station_id, record.address, reason
                    );
                    false
                }
            }
        })
        .collect();

    info!(
        "Address validation complete: {} -> {} records ({} filtered out)",
        input_count,
        filtered.len(),
        input_count - filtered.len()
    );

    filtered
}
