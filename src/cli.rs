//! Command-line interface components.

use crate::config::{NumericNullPolicy, OutputOptions, PipelineConfig};
use crate::constants::{DEFAULT_FLOAT_PRECISION, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use crate::models::RunStats;
use crate::processor::DatasetProcessor;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "evcharge_processor")]
#[command(about = "Clean and validate EV charging station datasets and build chart specifications")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the raw charging station CSV
    #[arg(value_name = "INPUT_CSV", default_value = DEFAULT_INPUT_PATH)]
    pub input_path: PathBuf,

    /// Directory for the cleaned CSV
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Directory for chart specifications (defaults to <OUTPUT_DIR>/charts)
    #[arg(long)]
    pub charts_dir: Option<PathBuf>,

    /// Skip chart specification generation
    #[arg(long)]
    pub no_charts: bool,

    /// Run the pipeline and report statistics without writing files
    #[arg(long)]
    pub validate_only: bool,

    /// Decimal places for float columns in the cleaned CSV
    #[arg(long, default_value_t = DEFAULT_FLOAT_PRECISION)]
    pub float_precision: usize,

    /// Charging capacity (kW) above which a station is high power
    #[arg(long)]
    pub high_power_threshold: Option<f64>,

    /// Reject records whose cost, rating or year is missing or unparseable
    #[arg(long)]
    pub drop_null_numerics: bool,

    /// Show a progress bar for each pipeline stage
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Log level implied by the verbosity flag
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the pipeline configuration from the flags
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::default().with_float_precision(self.float_precision);

        if let Some(threshold) = self.high_power_threshold {
            config = config.with_high_power_threshold(threshold);
        }
        if self.drop_null_numerics {
            config = config.with_null_policy(NumericNullPolicy::Drop);
        }
        if self.progress {
            config = config.with_progress();
        }

        config
    }

    /// Build the output options from the flags
    pub fn output_options(&self) -> OutputOptions {
        let mut options = OutputOptions::default().with_output_dir(&self.output_dir);

        if let Some(dir) = &self.charts_dir {
            options = options.with_charts_dir(dir);
        }
        if self.no_charts {
            options = options.without_charts();
        }
        if self.validate_only {
            options = options.with_validate_only();
        }

        options
    }
}

/// Install the tracing subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("evcharge_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Run the processor for parsed arguments
pub fn run(args: &Args) -> Result<RunStats> {
    DatasetProcessor::new(&args.input_path)?
        .with_pipeline_config(args.pipeline_config())
        .with_output_options(args.output_options())
        .process()
}
