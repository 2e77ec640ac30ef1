//! EV Charging Station Processor Library
//!
//! A Rust library for cleaning tabular datasets of electric-vehicle charging
//! stations and producing chart specifications from the cleaned data.
//!
//! This library provides tools for:
//! - Reading station CSVs with every cell as text
//! - Removing exact-duplicate rows
//! - Rejecting implausible addresses and geocoordinates
//! - Normalizing availability, charger types and connector lists
//! - Range filtering of cost, rating and installation year
//! - Writing the cleaned dataset and Vega-Lite chart specifications

pub mod charts;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod reader;
pub mod schema;
pub mod writer;

// Re-export commonly used types
pub use config::{NumericNullPolicy, NumericRange, OutputOptions, PipelineConfig};
pub use error::{ChargingDataError, Result};
pub use models::{ChargerType, NumericField, RunStats, StationRecord};
pub use pipeline::{ProcessingResult, ProcessingStats, RecordProcessor};
pub use processor::DatasetProcessor;
