//! Configuration management and validation.
//!
//! Provides the pipeline configuration (numeric ranges, null policy,
//! derived-field thresholds) and the output options used by the dataset
//! processor.

use crate::constants::{
    DEFAULT_CHARTS_SUBDIR, DEFAULT_COST_RANGE, DEFAULT_FLOAT_PRECISION, DEFAULT_OUTPUT_DIR,
    DEFAULT_OUTPUT_FILENAME, DEFAULT_RATING_RANGE, EARLIEST_INSTALLATION_YEAR,
    HIGH_POWER_THRESHOLD_KW, MAX_FLOAT_PRECISION,
};
use crate::error::{ChargingDataError, Result};
use crate::models::NumericField;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Closed interval a numeric field must fall in to survive the range filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub field: NumericField,
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(field: NumericField, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    /// Check whether a present value lies within the closed interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// What the range filter does with a null (missing or unparseable) value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericNullPolicy {
    /// Treat null as unknown and keep the record
    Retain,
    /// Reject the record
    Drop,
}

/// Configuration for the record validation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Range filters applied in order after normalization
    pub numeric_ranges: Vec<NumericRange>,

    /// Handling of null values in range-filtered fields
    pub null_policy: NumericNullPolicy,

    /// Capacity (kW) above which a station is flagged high power
    pub high_power_threshold_kw: f64,

    /// Decimal places float fields are rounded to and written with
    pub float_precision: usize,

    /// Show a progress bar for each stage
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            numeric_ranges: vec![
                NumericRange::new(
                    NumericField::CostPerKwh,
                    DEFAULT_COST_RANGE.0,
                    DEFAULT_COST_RANGE.1,
                ),
                NumericRange::new(
                    NumericField::RatingScore,
                    DEFAULT_RATING_RANGE.0,
                    DEFAULT_RATING_RANGE.1,
                ),
                NumericRange::new(
                    NumericField::InstallationYear,
                    EARLIEST_INSTALLATION_YEAR as f64,
                    current_year() as f64,
                ),
            ],
            null_policy: NumericNullPolicy::Retain,
            high_power_threshold_kw: HIGH_POWER_THRESHOLD_KW,
            float_precision: DEFAULT_FLOAT_PRECISION,
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    /// Replace the range for a field, or append it if the field has none yet
    pub fn with_range(mut self, range: NumericRange) -> Self {
        match self
            .numeric_ranges
            .iter_mut()
            .find(|existing| existing.field == range.field)
        {
            Some(existing) => *existing = range,
            None => self.numeric_ranges.push(range),
        }
        self
    }

    /// Set the null policy for range-filtered fields
    pub fn with_null_policy(mut self, policy: NumericNullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    /// Set the high-power threshold
    pub fn with_high_power_threshold(mut self, threshold_kw: f64) -> Self {
        self.high_power_threshold_kw = threshold_kw;
        self
    }

    /// Set the float precision of coerced and written values
    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    /// Enable per-stage progress bars
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Get the configured range for a field
    pub fn range_for(&self, field: NumericField) -> Option<&NumericRange> {
        self.numeric_ranges.iter().find(|range| range.field == field)
    }

    /// Reject configurations that could never retain a value
    pub fn validate(&self) -> Result<()> {
        for range in &self.numeric_ranges {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(ChargingDataError::configuration(format!(
                    "invalid range for {}: [{}, {}]",
                    range.field.column_name(),
                    range.min,
                    range.max
                )));
            }
        }

        if !self.high_power_threshold_kw.is_finite() || self.high_power_threshold_kw < 0.0 {
            return Err(ChargingDataError::configuration(format!(
                "high power threshold must be a non-negative number, got {}",
                self.high_power_threshold_kw
            )));
        }

        if self.float_precision > MAX_FLOAT_PRECISION {
            return Err(ChargingDataError::configuration(format!(
                "float precision must be at most {}, got {}",
                MAX_FLOAT_PRECISION, self.float_precision
            )));
        }

        debug!(
            "Pipeline configuration valid: {} range filters, null policy {:?}",
            self.numeric_ranges.len(),
            self.null_policy
        );
        Ok(())
    }
}

/// Where and how results are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Directory receiving the cleaned CSV
    pub output_dir: PathBuf,

    /// File name of the cleaned CSV
    pub output_filename: String,

    /// Directory receiving chart specifications (defaults to output_dir/charts)
    pub charts_dir: Option<PathBuf>,

    /// Generate chart specifications
    pub write_charts: bool,

    /// Run the pipeline and report without writing anything
    pub validate_only: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            charts_dir: None,
            write_charts: true,
            validate_only: false,
        }
    }
}

impl OutputOptions {
    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set an explicit charts directory
    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = Some(dir.into());
        self
    }

    /// Disable chart generation
    pub fn without_charts(mut self) -> Self {
        self.write_charts = false;
        self
    }

    /// Enable validate-only mode
    pub fn with_validate_only(mut self) -> Self {
        self.validate_only = true;
        self
    }

    /// Full path of the cleaned CSV
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }

    /// Resolved charts directory
    pub fn charts_path(&self) -> PathBuf {
        self.charts_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join(DEFAULT_CHARTS_SUBDIR))
    }
}

/// Current calendar year from the local clock
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let config = PipelineConfig::default();

        let cost = config.range_for(NumericField::CostPerKwh).unwrap();
        assert_eq!((cost.min, cost.max), (0.0, 2.0));

        let rating = config.range_for(NumericField::RatingScore).unwrap();
        assert_eq!((rating.min, rating.max), (1.0, 5.0));

        let year = config.range_for(NumericField::InstallationYear).unwrap();
        assert_eq!(year.min, 2000.0);
        assert_eq!(year.max, current_year() as f64);

        assert_eq!(config.null_policy, NumericNullPolicy::Retain);
        assert_eq!(config.float_precision, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_order_is_cost_rating_year() {
        let fields: Vec<_> = PipelineConfig::default()
            .numeric_ranges
            .iter()
            .map(|range| range.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                NumericField::CostPerKwh,
                NumericField::RatingScore,
                NumericField::InstallationYear
            ]
        );
    }

    #[test]
    fn test_with_range_replaces_existing() {
        let config = PipelineConfig::default()
            .with_range(NumericRange::new(NumericField::CostPerKwh, 0.0, 1.0));
        assert_eq!(config.numeric_ranges.len(), 3);
        assert_eq!(config.range_for(NumericField::CostPerKwh).unwrap().max, 1.0);

        let config = config.with_range(NumericRange::new(
            NumericField::ChargingCapacity,
            0.0,
            500.0,
        ));
        assert_eq!(config.numeric_ranges.len(), 4);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let inverted = PipelineConfig::default()
            .with_range(NumericRange::new(NumericField::RatingScore, 5.0, 1.0));
        assert!(matches!(
            inverted.validate(),
            Err(ChargingDataError::Configuration { .. })
        ));

        let negative = PipelineConfig::default().with_high_power_threshold(-1.0);
        assert!(negative.validate().is_err());

        let too_precise = PipelineConfig::default().with_float_precision(16);
        assert!(too_precise.validate().is_err());
        assert!(PipelineConfig::default().with_float_precision(15).validate().is_ok());
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = NumericRange::new(NumericField::CostPerKwh, 0.0, 2.0);
        assert!(range.contains(0.0));
        assert!(range.contains(2.0));
        assert!(!range.contains(2.0001));
        assert!(!range.contains(-0.01));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_output_paths() {
        let options = OutputOptions::default().with_output_dir("/tmp/out");
        assert_eq!(
            options.output_path(),
            PathBuf::from("/tmp/out/processed_ev_charging_stations.csv")
        );
        assert_eq!(options.charts_path(), PathBuf::from("/tmp/out/charts"));

        let options = options.with_charts_dir("/tmp/charts");
        assert_eq!(options.charts_path(), PathBuf::from("/tmp/charts"));
    }
}
