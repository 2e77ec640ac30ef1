//! Record validation and normalization pipeline
//!
//! Turns the raw rows of a charging station dataset into typed, cleaned
//! records. Every stage is a plain function over the record set; the
//! [`RecordProcessor`] runs them in a fixed order and records how many
//! records each stage kept.
//!
//! # Architecture
//!
//! - [`processor`] - RecordProcessor and pipeline orchestration
//! - [`deduplication`] - Exact-duplicate removal on raw rows and written records
//! - [`coercion`] - Text cells to typed `StationRecord` fields
//! - [`address`] - Address plausibility heuristics
//! - [`coordinates`] - Latitude/longitude plausibility heuristics
//! - [`normalizers`] - Availability, charger type and connector normalization
//! - [`numeric_range`] - Closed-interval filters on numeric fields
//! - [`derived`] - `is_24_hours` and `is_high_power` flags
//! - [`stats`] - Processing statistics and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Deduplication**: drop rows identical to an earlier row
//! 2. **Coercion**: unparseable values become null and are counted; floats
//!    are rounded to the output precision
//! 3. **Address validation**: reject synthetic or malformed addresses
//! 4. **Coordinate validation**: reject out-of-range or placeholder locations
//! 5. **Normalization**: canonicalize availability, charger type, connectors
//! 6. **Range filtering**: cost, rating and installation year by default
//! 7. **Derived fields**: compute the boolean flags
//! 8. **Output deduplication**: drop records that would be written identically
//!
//! Only aggregate counts are kept for rejections; individual reasons are
//! logged at debug level.

pub mod address;
pub mod coercion;
pub mod coordinates;
pub mod deduplication;
pub mod derived;
pub mod normalizers;
pub mod numeric_range;
pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use processor::RecordProcessor;
pub use stats::{CoercionStats, PipelineStage, ProcessingResult, ProcessingStats, StageCount};

// Re-export the per-field predicates and normalizers
pub use address::{AddressRejection, check_address, is_valid_address};
pub use coordinates::{is_valid_coordinate, is_valid_coordinate_pair, is_valid_coordinate_text};
pub use derived::compute_derived_fields;
pub use normalizers::{normalize_availability, normalize_charger_type, parse_connector_types};
pub use numeric_range::{apply_numeric_range, value_in_range};
