//! CSV input for charging station datasets
//!
//! Every column is read as text with schema inference disabled; typing is
//! left to the coercion step so that a malformed cell nulls one field rather
//! than failing the read.

use crate::constants::is_derived_column;
use crate::error::{ChargingDataError, Result};
use crate::schema::{ColumnLayout, RawRow, RawTable};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read a station CSV into raw rows
///
/// # Errors
///
/// * `InputNotFound` if `path` does not exist
/// * `MissingColumns` if the header lacks `Latitude`, `Longitude` or `Address`
/// * `Polars` if the file cannot be parsed as CSV
pub fn read_station_csv(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(ChargingDataError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Reading station CSV: {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let table = dataframe_to_raw_table(&df, path)?;

    info!(
        "Loaded {} rows with {} columns from {}",
        table.row_count(),
        table.layout.headers().len(),
        path.display()
    );

    Ok(table)
}

/// Convert an all-text DataFrame into a raw table
pub fn dataframe_to_raw_table(df: &DataFrame, path: &Path) -> Result<RawTable> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let layout = ColumnLayout::analyze(&names);

    let missing = layout.missing_required();
    if !missing.is_empty() {
        return Err(ChargingDataError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    if !layout.ignored_columns().is_empty() {
        warn!(
            "Ignoring input columns that are recomputed: {}",
            layout.ignored_columns().join(", ")
        );
    }

    // Same order as the layout: input order without derived columns
    let retained = df
        .get_columns()
        .iter()
        .filter(|column| !is_derived_column(column.name().trim()))
        .map(|column| column.as_materialized_series().str())
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut rows: Vec<RawRow> = (0..df.height())
        .map(|_| Vec::with_capacity(retained.len()))
        .collect();
    for values in retained.iter().copied() {
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.push(value.map(str::to_string));
        }
    }

    Ok(RawTable::new(layout, rows))
}
