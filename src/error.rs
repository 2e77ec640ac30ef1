//! Error handling for EV charging station processing.
//!
//! Only whole-file conditions are errors here: unreadable input, a header that
//! lacks the columns the validators depend on, and output that cannot be
//! written. Field-level problems never surface as errors; they are coerced to
//! null by the coercion step and counted in the processing statistics.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChargingDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Chart serialization error: {0}")]
    ChartSerialization(#[from] serde_json::Error),

    #[error("Input file not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Missing required columns in {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("Failed to write output file: {path} - {reason}")]
    OutputFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ChargingDataError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output failure for the given path
    pub fn output_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OutputFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChargingDataError>;
