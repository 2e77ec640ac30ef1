//! Processing statistics and result structures for the record pipeline
//!
//! Only aggregate counts are tracked: how many records each stage received
//! and kept, and how many field values coercion had to null. Individual
//! rejection reasons are logged at debug level and not retained.

use crate::constants::DEFAULT_FLOAT_PRECISION;
use crate::models::{NumericField, StationRecord};
use crate::schema::ColumnLayout;
use std::collections::BTreeMap;
use std::fmt;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Deduplication,
    AddressValidation,
    CoordinateValidation,
    AvailabilityNormalization,
    ChargerTypeNormalization,
    ConnectorTypeParsing,
    NumericRange(NumericField),
    DerivedFields,
    OutputDeduplication,
}

impl PipelineStage {
    /// Human readable stage name
    pub fn name(&self) -> String {
        match self {
            PipelineStage::Deduplication => "Duplicate filter".to_string(),
            PipelineStage::AddressValidation => "Address validation".to_string(),
            PipelineStage::CoordinateValidation => "Coordinate validation".to_string(),
            PipelineStage::AvailabilityNormalization => "Availability normalization".to_string(),
            PipelineStage::ChargerTypeNormalization => "Charger type normalization".to_string(),
            PipelineStage::ConnectorTypeParsing => "Connector type parsing".to_string(),
            PipelineStage::NumericRange(field) => {
                format!("Range filter ({})", field.column_name())
            }
            PipelineStage::DerivedFields => "Derived fields".to_string(),
            PipelineStage::OutputDeduplication => "Output duplicate filter".to_string(),
        }
    }

    /// Whether the stage can remove records
    pub fn is_filter(&self) -> bool {
        matches!(
            self,
            PipelineStage::Deduplication
                | PipelineStage::AddressValidation
                | PipelineStage::CoordinateValidation
                | PipelineStage::NumericRange(_)
                | PipelineStage::OutputDeduplication
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Record counts entering and leaving one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCount {
    pub stage: PipelineStage,
    pub input: usize,
    pub output: usize,
}

impl StageCount {
    pub fn rejected(&self) -> usize {
        self.input.saturating_sub(self.output)
    }
}

/// Count of present-but-unparseable values nulled during coercion, per column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionStats {
    nulled: BTreeMap<String, usize>,
}

impl CoercionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a value in `column` could not be coerced
    pub fn record_nulled(&mut self, column: &str) {
        *self.nulled.entry(column.to_string()).or_insert(0) += 1;
    }

    /// Nulled values for one column
    pub fn nulled_in(&self, column: &str) -> usize {
        self.nulled.get(column).copied().unwrap_or(0)
    }

    /// Nulled values across all columns
    pub fn total(&self) -> usize {
        self.nulled.values().sum()
    }

    /// Per-column counts in column-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.nulled.iter().map(|(column, count)| (column.as_str(), *count))
    }
}

/// Statistics for one run of the record pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    /// Number of raw rows entering the pipeline
    pub total_input: usize,
    /// Counts for every stage that ran, in execution order
    pub stage_counts: Vec<StageCount>,
    /// Field-level coercion failures
    pub coercion: CoercionStats,
    /// Number of records leaving the pipeline
    pub final_output: usize,
}

impl ProcessingStats {
    /// Create new empty processing statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the counts of a finished stage
    pub fn record_stage(&mut self, stage: PipelineStage, input: usize, output: usize) {
        self.stage_counts.push(StageCount {
            stage,
            input,
            output,
        });
    }

    /// Records removed by a stage (0 if it did not run)
    pub fn rejected_by(&self, stage: PipelineStage) -> usize {
        self.stage_counts
            .iter()
            .find(|count| count.stage == stage)
            .map(StageCount::rejected)
            .unwrap_or(0)
    }

    /// Records removed across all stages
    pub fn total_rejected(&self) -> usize {
        self.stage_counts.iter().map(StageCount::rejected).sum()
    }

    /// Percentage of input records that survived
    pub fn retention_rate(&self) -> f64 {
        if self.total_input == 0 {
            100.0
        } else {
            (self.final_output as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Get summary of processing pipeline statistics
    pub fn summary(&self) -> String {
        let rejections = self
            .stage_counts
            .iter()
            .filter(|count| count.stage.is_filter())
            .map(|count| format!("{}: -{}", count.stage, count.rejected()))
            .collect::<Vec<_>>()
            .join(" | ");

        format!(
            "Processing Summary: {} -> {} records ({:.1}% retained) | {} | Values nulled: {}",
            self.total_input,
            self.final_output,
            self.retention_rate(),
            rejections,
            self.coercion.total()
        )
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Column layout of the input, needed to write the records back out
    pub layout: ColumnLayout,
    /// Records that survived every stage
    pub records: Vec<StationRecord>,
    /// Processing statistics
    pub stats: ProcessingStats,
    /// Decimal places the float fields were rounded to
    pub float_precision: usize,
}

impl ProcessingResult {
    pub fn new(layout: ColumnLayout, records: Vec<StationRecord>, stats: ProcessingStats) -> Self {
        Self {
            layout,
            records,
            stats,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
