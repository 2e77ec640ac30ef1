//! Record processor and pipeline orchestration
//!
//! The `RecordProcessor` runs every validator and normalizer over one
//! in-memory dataset in a fixed order, recording how many records each stage
//! received and kept.

use crate::config::PipelineConfig;
use crate::schema::RawTable;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::{
    address::apply_address_filter,
    coercion::coerce_rows,
    coordinates::apply_coordinate_filter,
    deduplication::{deduplicate_records, deduplicate_rows},
    derived::apply_derived_fields,
    normalizers::{
        apply_availability_normalization, apply_charger_type_normalization,
        apply_connector_parsing,
    },
    numeric_range::apply_numeric_range,
    stats::{PipelineStage, ProcessingResult, ProcessingStats},
};

/// Record processor for EV charging station datasets
///
/// # Example
///
/// ```rust
/// use evcharge_processor::config::PipelineConfig;
/// use evcharge_processor::pipeline::RecordProcessor;
/// use evcharge_processor::schema::{ColumnLayout, RawTable};
///
/// let layout = ColumnLayout::analyze(&["Latitude", "Longitude", "Address"]);
/// let rows = vec![vec![
///     Some("40.7128".to_string()),
///     Some("-74.0060".to_string()),
///     Some("123 Main Street, Springfield".to_string()),
/// ]];
///
/// let processor = RecordProcessor::new(PipelineConfig::default());
/// let result = processor.process(RawTable::new(layout, rows));
/// assert_eq!(result.record_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordProcessor {
    config: PipelineConfig,
}

impl RecordProcessor {
    /// Create a new record processor with the given pipeline configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Get the pipeline configuration used by this processor
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a raw table through the full pipeline
    ///
    /// Stages run in this order:
    /// 1. Exact-duplicate removal (on raw rows)
    /// 2. Field coercion into typed records
    /// 3. Address validation
    /// 4. Coordinate validation
    /// 5. Availability, charger type and connector normalization
    /// 6. Numeric range filters, in configured order
    /// 7. Derived flags
    /// 8. Exact-duplicate removal on the records as they will be written
    pub fn process(&self, table: RawTable) -> ProcessingResult {
        let RawTable { layout, rows } = table;
        let mut stats = ProcessingStats::new();
        stats.total_input = rows.len();

        info!(
            "Starting record processing pipeline for {} rows",
            stats.total_input
        );

        // Step 1: duplicate removal on raw text
        let input = rows.len();
        let pb = self.stage_progress_bar(input, PipelineStage::Deduplication);
        let rows = deduplicate_rows(rows, pb.as_ref());
        stats.record_stage(PipelineStage::Deduplication, input, rows.len());
        Self::finish_progress_bar(pb, PipelineStage::Deduplication, rows.len());

        // Step 2: typed records
        let records = coerce_rows(
            rows,
            &layout,
            self.config.float_precision,
            &mut stats.coercion,
        );
        if stats.coercion.total() > 0 {
            info!(
                "Coercion nulled {} unparseable values",
                stats.coercion.total()
            );
        }

        // Step 3: address plausibility
        let input = records.len();
        let pb = self.stage_progress_bar(input, PipelineStage::AddressValidation);
        let records = apply_address_filter(records, pb.as_ref());
        stats.record_stage(PipelineStage::AddressValidation, input, records.len());
        Self::finish_progress_bar(pb, PipelineStage::AddressValidation, records.len());

        // Step 4: coordinate plausibility
        let input = records.len();
        let pb = self.stage_progress_bar(input, PipelineStage::CoordinateValidation);
        let records = apply_coordinate_filter(records, pb.as_ref());
        stats.record_stage(PipelineStage::CoordinateValidation, input, records.len());
        Self::finish_progress_bar(pb, PipelineStage::CoordinateValidation, records.len());

        // Step 5: normalizers never remove records
        let input = records.len();
        let records = apply_availability_normalization(records);
        stats.record_stage(PipelineStage::AvailabilityNormalization, input, records.len());

        let records = apply_charger_type_normalization(records);
        stats.record_stage(PipelineStage::ChargerTypeNormalization, input, records.len());

        let records = apply_connector_parsing(records);
        stats.record_stage(PipelineStage::ConnectorTypeParsing, input, records.len());

        // Step 6: numeric ranges
        let mut records = records;
        for range in &self.config.numeric_ranges {
            let stage = PipelineStage::NumericRange(range.field);
            let input = records.len();
            let pb = self.stage_progress_bar(input, stage);
            records = apply_numeric_range(records, range, self.config.null_policy, pb.as_ref());
            stats.record_stage(stage, input, records.len());
            Self::finish_progress_bar(pb, stage, records.len());
        }

        // Step 7: derived flags
        let input = records.len();
        let records = apply_derived_fields(records, self.config.high_power_threshold_kw);
        stats.record_stage(PipelineStage::DerivedFields, input, records.len());

        // Step 8: duplicates that only differed before normalization
        let input = records.len();
        let pb = self.stage_progress_bar(input, PipelineStage::OutputDeduplication);
        let records = deduplicate_records(records, pb.as_ref());
        stats.record_stage(PipelineStage::OutputDeduplication, input, records.len());
        Self::finish_progress_bar(pb, PipelineStage::OutputDeduplication, records.len());

        stats.final_output = records.len();

        info!(
            "Record processing complete: {} -> {} records ({:.1}% retained)",
            stats.total_input,
            stats.final_output,
            stats.retention_rate()
        );
        debug!("{}", stats.summary());

        ProcessingResult::new(layout, records, stats)
            .with_float_precision(self.config.float_precision)
    }

    fn stage_progress_bar(&self, total: usize, stage: PipelineStage) -> Option<ProgressBar> {
        if self.config.show_progress {
            Some(Self::create_processing_progress_bar(
                total as u64,
                &stage.name(),
            ))
        } else {
            None
        }
    }

    fn finish_progress_bar(pb: Option<ProgressBar>, stage: PipelineStage, remaining: usize) {
        if let Some(pb) = pb {
            pb.finish_with_message(format!("{} complete: {} records", stage, remaining));
        }
    }

    /// Create a progress bar for processing operations
    fn create_processing_progress_bar(total: u64, operation: &str) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(operation.to_string());
        pb
    }
}
