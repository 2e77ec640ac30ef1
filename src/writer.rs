//! CSV output for cleaned charging station datasets
//!
//! Columns are written in input order followed by the derived flags. Float
//! columns use the precision the records were rounded to during coercion and
//! the installation year is an integer column, so the written file reads
//! back to the same records.

use crate::config::OutputOptions;
use crate::constants::{CONNECTOR_OUTPUT_SEPARATOR, columns};
use crate::error::{ChargingDataError, Result};
use crate::models::StationRecord;
use crate::pipeline::ProcessingResult;
use crate::schema::{CoreColumn, OutputColumn};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write the cleaned records to `options.output_path()`
///
/// The output directory is created if missing. Returns the written path.
pub fn write_cleaned_csv(result: &ProcessingResult, options: &OutputOptions) -> Result<PathBuf> {
    let output_path = options.output_path();
    ensure_directory(&options.output_dir)?;

    let mut df = records_to_dataframe(result)?;
    debug!(
        "Writing {} rows x {} columns to {}",
        df.height(),
        df.width(),
        output_path.display()
    );

    let mut file = File::create(&output_path)
        .map_err(|e| ChargingDataError::output_failed(&output_path, e.to_string()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_float_precision(Some(result.float_precision))
        .finish(&mut df)
        .map_err(|e| ChargingDataError::output_failed(&output_path, e.to_string()))?;

    info!(
        "Wrote {} cleaned records to {}",
        result.record_count(),
        output_path.display()
    );

    Ok(output_path)
}

/// Build the output DataFrame for a processing result
pub fn records_to_dataframe(result: &ProcessingResult) -> Result<DataFrame> {
    let records = &result.records;
    let mut output: Vec<Column> = result
        .layout
        .output_columns()
        .into_iter()
        .map(|(header, source)| build_column(header, source, records))
        .collect();

    output.push(Column::new(
        columns::IS_24_HOURS.into(),
        records.iter().map(|r| r.is_24_hours).collect::<Vec<bool>>(),
    ));
    output.push(Column::new(
        columns::IS_HIGH_POWER.into(),
        records.iter().map(|r| r.is_high_power).collect::<Vec<bool>>(),
    ));

    Ok(DataFrame::new(output)?)
}

fn build_column(header: &str, source: OutputColumn, records: &[StationRecord]) -> Column {
    let name: PlSmallStr = header.into();

    match source {
        OutputColumn::Extra(index) => Column::new(
            name,
            records
                .iter()
                .map(|r| r.extra(index))
                .collect::<Vec<Option<&str>>>(),
        ),
        OutputColumn::Core(core) => match core {
            CoreColumn::StationId => text_column(name, records, |r| r.station_id.as_deref()),
            CoreColumn::Address => text_column(name, records, |r| r.address.as_deref()),
            CoreColumn::Availability => text_column(name, records, |r| r.availability.as_deref()),
            CoreColumn::ChargerType => {
                text_column(name, records, |r| r.charger_type.map(|t| t.code()))
            }
            CoreColumn::ConnectorTypes => Column::new(
                name,
                records
                    .iter()
                    .map(|r| join_connectors(&r.connector_types))
                    .collect::<Vec<Option<String>>>(),
            ),
            CoreColumn::Latitude => float_column(name, records, |r| r.latitude),
            CoreColumn::Longitude => float_column(name, records, |r| r.longitude),
            CoreColumn::CostPerKwh => float_column(name, records, |r| r.cost_per_kwh),
            CoreColumn::Rating => float_column(name, records, |r| r.rating_score),
            CoreColumn::ChargingCapacity => {
                float_column(name, records, |r| r.charging_capacity_kw)
            }
            CoreColumn::InstallationYear => Column::new(
                name,
                records
                    .iter()
                    .map(|r| r.installation_year)
                    .collect::<Vec<Option<i32>>>(),
            ),
        },
    }
}

fn text_column<'a>(
    name: PlSmallStr,
    records: &'a [StationRecord],
    value: impl Fn(&'a StationRecord) -> Option<&'a str>,
) -> Column {
    Column::new(name, records.iter().map(value).collect::<Vec<Option<&str>>>())
}

fn float_column(
    name: PlSmallStr,
    records: &[StationRecord],
    value: impl Fn(&StationRecord) -> Option<f64>,
) -> Column {
    Column::new(name, records.iter().map(value).collect::<Vec<Option<f64>>>())
}

/// Serialize a parsed connector list; an empty list is written as null
pub fn join_connectors(connectors: &[String]) -> Option<String> {
    if connectors.is_empty() {
        None
    } else {
        Some(connectors.join(CONNECTOR_OUTPUT_SEPARATOR))
    }
}

/// Create a directory (and parents) if it does not exist
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| ChargingDataError::output_failed(dir, e.to_string()))?;
        debug!("Created output directory: {}", dir.display());
    }
    Ok(())
}
