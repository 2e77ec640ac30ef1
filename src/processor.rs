//! Main processing engine.
//!
//! Orchestrates one complete run: read the input CSV, run the record
//! pipeline, write the cleaned CSV and the chart specifications, and report
//! progress on the console.

use crate::charts::write_chart_specs;
use crate::config::{OutputOptions, PipelineConfig};
use crate::error::{ChargingDataError, Result};
use crate::models::RunStats;
use crate::pipeline::{ProcessingStats, RecordProcessor};
use crate::reader::read_station_csv;
use crate::writer::write_cleaned_csv;

use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Main processor for charging station dataset cleaning
#[derive(Debug)]
pub struct DatasetProcessor {
    input_path: PathBuf,
    pipeline_config: PipelineConfig,
    output: OutputOptions,
}

impl DatasetProcessor {
    /// Create a new dataset processor
    pub fn new(input_path: impl Into<PathBuf>) -> Result<Self> {
        let input_path = input_path.into();

        if !input_path.exists() {
            return Err(ChargingDataError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            pipeline_config: PipelineConfig::default(),
            output: OutputOptions::default(),
        })
    }

    /// Configure the record pipeline
    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline_config = config;
        self
    }

    /// Configure where results are written
    pub fn with_output_options(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<RunStats> {
        let start_time = Instant::now();
        self.pipeline_config.validate()?;

        println!(
            "{}",
            "Starting EV charging station processing".bright_green().bold()
        );
        println!("  {} {}", "Input:".bright_cyan(), self.input_path.display());
        if self.output.validate_only {
            println!("  {} validate only", "Mode:".bright_cyan());
        } else {
            println!(
                "  {} {}",
                "Output:".bright_cyan(),
                self.output.output_path().display()
            );
        }

        // Step 1: Load the dataset
        println!("\n{}", "Reading dataset...".bright_yellow());
        let table = read_station_csv(&self.input_path)?;
        let input_rows = table.row_count();
        println!(
            "  {} {} rows, {} columns",
            "Loaded".bright_green(),
            input_rows.to_string().bright_white().bold(),
            table.layout.headers().len().to_string().bright_white()
        );

        // Step 2: Validate and normalize
        println!("\n{}", "Cleaning records...".bright_yellow());
        let processor = RecordProcessor::new(self.pipeline_config.clone());
        let result = processor.process(table);
        print_stage_counts(&result.stats);

        let mut stats = RunStats {
            input_rows,
            output_rows: result.record_count(),
            ..Default::default()
        };

        // Step 3: Write outputs unless only validating
        if self.output.validate_only {
            println!(
                "\n{}",
                "Validate-only mode - no files written".bright_green()
            );
        } else {
            println!("\n{}", "Writing outputs...".bright_yellow());
            let output_path = write_cleaned_csv(&result, &self.output)?;
            println!(
                "  {} {}",
                "Cleaned data:".bright_cyan(),
                output_path.display()
            );
            stats.output_path = Some(output_path);

            if self.output.write_charts {
                stats.chart_paths = write_chart_specs(&result, &self.output.charts_path())?;
                for path in &stats.chart_paths {
                    println!("  {} {}", "Chart spec:".bright_cyan(), path.display());
                }
            }
        }

        stats.pipeline = result.stats;
        stats.processing_time_ms = start_time.elapsed().as_millis();
        print_run_summary(&stats);
        debug!("Run finished in {}ms", stats.processing_time_ms);

        Ok(stats)
    }
}

/// Print the record count after each stage
fn print_stage_counts(stats: &ProcessingStats) {
    println!(
        "  {:<36} {}",
        "Initial rows".bright_cyan(),
        stats.total_input.to_string().bright_white()
    );

    for count in &stats.stage_counts {
        if !count.stage.is_filter() {
            continue;
        }
        let removed = count.rejected();
        let removed_text = if removed > 0 {
            format!("(-{})", removed).bright_red()
        } else {
            "(-0)".bright_black()
        };
        println!(
            "  {:<36} {} {}",
            format!("After {}", count.stage.name().to_lowercase()).bright_cyan(),
            count.output.to_string().bright_white(),
            removed_text
        );
    }

    if stats.coercion.total() > 0 {
        println!("  {}", "Unparseable values set to null:".bright_yellow());
        for (column, nulled) in stats.coercion.iter() {
            println!("    {:<34} {}", column, nulled.to_string().bright_white());
        }
    }
}

/// Print the closing run summary
fn print_run_summary(stats: &RunStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        stats.input_rows.to_string().bright_white()
    );
    println!(
        "  {} {} ({:.1}% retained)",
        "Rows kept:".bright_cyan(),
        stats.output_rows.to_string().bright_white().bold(),
        stats.pipeline.retention_rate()
    );
    if stats.pipeline.total_rejected() > 0 {
        println!(
            "  {} {}",
            "Rows rejected:".bright_red(),
            stats.pipeline.total_rejected().to_string().bright_red()
        );
    }
}
