//! Vega-Lite chart specifications for cleaned station datasets
//!
//! Each builder aggregates the cleaned records it needs and returns a
//! self-contained Vega-Lite v5 document with the data inlined. Chart inputs
//! that are not part of the typed record (usage, distance, parking spots,
//! renewable energy, names) are read from passthrough columns; a missing
//! passthrough column simply leaves the corresponding values null.
//!
//! - [`heatmap`] - Cost band vs charger type, coloured by station count
//! - [`scatter`] - Distance to city vs daily usage
//! - [`trend`] - Installations per year by charger type

pub mod heatmap;
pub mod scatter;
pub mod trend;

use crate::constants::{HEATMAP_SPEC_FILENAME, SCATTER_SPEC_FILENAME, TREND_SPEC_FILENAME};
use crate::error::{ChargingDataError, Result};
use crate::models::StationRecord;
use crate::pipeline::ProcessingResult;
use crate::pipeline::coercion::parse_float;
use crate::schema::ColumnLayout;
use crate::writer::ensure_directory;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Chart specifications produced for every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Heatmap,
    Scatter,
    Trend,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Heatmap, ChartKind::Scatter, ChartKind::Trend];

    /// File name the specification is written to
    pub fn filename(&self) -> &'static str {
        match self {
            ChartKind::Heatmap => HEATMAP_SPEC_FILENAME,
            ChartKind::Scatter => SCATTER_SPEC_FILENAME,
            ChartKind::Trend => TREND_SPEC_FILENAME,
        }
    }

    /// Build the specification for a dataset
    pub fn build(&self, source: &ChartSource<'_>) -> Value {
        match self {
            ChartKind::Heatmap => heatmap::heatmap_spec(source),
            ChartKind::Scatter => scatter::scatter_spec(source),
            ChartKind::Trend => trend::trend_spec(source),
        }
    }
}

/// Read access to cleaned records for chart builders
#[derive(Debug, Clone, Copy)]
pub struct ChartSource<'a> {
    layout: &'a ColumnLayout,
    records: &'a [StationRecord],
}

impl<'a> ChartSource<'a> {
    pub fn new(layout: &'a ColumnLayout, records: &'a [StationRecord]) -> Self {
        Self { layout, records }
    }

    pub fn from_result(result: &'a ProcessingResult) -> Self {
        Self::new(&result.layout, &result.records)
    }

    pub fn records(&self) -> &'a [StationRecord] {
        self.records
    }

    /// Position of a passthrough column, if the dataset has it
    pub fn column(&self, column_name: &str) -> Option<usize> {
        self.layout.extra_index(column_name)
    }

    /// Text of a passthrough column for one record
    pub fn text(&self, record: &'a StationRecord, column: Option<usize>) -> Option<&'a str> {
        column.and_then(|index| record.extra(index))
    }

    /// Passthrough value parsed as a number; unparseable text is null
    pub fn number(&self, record: &StationRecord, column: Option<usize>) -> Option<f64> {
        column
            .and_then(|index| record.extra(index))
            .and_then(parse_float)
    }
}

/// Write every chart specification into `dir`, returning the written paths
pub fn write_chart_specs(result: &ProcessingResult, dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;
    let source = ChartSource::from_result(result);

    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = dir.join(kind.filename());
        let spec = kind.build(&source);
        let json = serde_json::to_string_pretty(&spec)?;

        fs::write(&path, json)
            .map_err(|e| ChargingDataError::output_failed(&path, e.to_string()))?;
        debug!("Wrote {:?} chart specification to {}", kind, path.display());
        written.push(path);
    }

    info!(
        "Wrote {} chart specifications to {}",
        written.len(),
        dir.display()
    );
    Ok(written)
}
