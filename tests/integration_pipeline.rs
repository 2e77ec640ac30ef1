//! Integration tests for the complete cleaning workflow
//!
//! These tests run the dataset processor end to end on a small but realistic
//! station CSV: read, clean, write the cleaned CSV and the chart
//! specifications, then read the output back.

use evcharge_processor::pipeline::PipelineStage;
use evcharge_processor::reader::read_station_csv;
use evcharge_processor::{
    ChargingDataError, DatasetProcessor, NumericField, OutputOptions, PipelineConfig,
    RecordProcessor, RunStats,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "Station ID,Station Name,Latitude,Longitude,Address,City,Charger Type,\
Cost (USD/kWh),Availability,Distance to City (miles),Usage Stats (avg users/day),\
Charging Capacity (kW),Connector Types,Installation Year,Renewable Energy,Reviews (Rating),\
Number of Parking Spots";

const ROWS: [&str; 9] = [
    "EVS00001,Harbour Hub,40.7128,-74.0060,\"123 Main Street, Springfield\",Springfield,AC Level 2,0.25,24/7,3.2,41.5,22,\"CCS, Type 2\",2018,Yes,4.5,4",
    "EVS00001,Harbour Hub,40.7128,-74.0060,\"123 Main Street, Springfield\",Springfield,AC Level 2,0.25,24/7,3.2,41.5,22,\"CCS, Type 2\",2018,Yes,4.5,4",
    "EVS00002,Fake Hub,40.7306,-73.9352,Random City 123,Springfield,AC Level 2,0.20,24/7,1.0,10,22,CCS,2019,No,4.0,2",
    "EVS00003,Grid Hub,40,-74,\"55 Elm Avenue, Springfield\",Springfield,AC Level 1,0.10,24/7,2.0,12,7,Type 1,2017,No,3.5,3",
    "EVS00004,Express Hub,34.0522,-118.2437,\"900 Sunset Boulevard, Los Angeles\",Los Angeles,DC Fast Charger,0.45,06:00-22:00,8.7,65.2,150,\"CCS, CHAdeMO\",2021,Yes,4.8,10",
    "EVS00005,Pricey Hub,37.7749,-122.4194,\"1 Market Street, San Francisco\",San Francisco,AC Level 2,5.0,24/7,0.5,30,22,Type 2,2020,No,4.1,6",
    "EVS00006,Odd Hub,47.6062,-122.3321,\"400 Pine Street, Seattle\",Seattle,Wireless,abc,09:00-17:00,4.4,18.3,,Tesla,2016,No,3.9,5",
    "EVS00007,Old Hub,41.8781,-87.6298,\"233 Wacker Drive, Chicago\",Chicago,AC Level 2,0.30,24/7,6.1,22,22,CCS,1995,Yes,4.2,8",
    "EVS00008,Low Hub,29.7604,-95.3698,\"1001 Louisiana Street, Houston\",Houston,AC Level 1,0.15,24/7,5.5,9,7,Type 1,2019,No,0.5,2",
];

/// Rows that only differ in spellings the pipeline normalizes away
const NEAR_DUPLICATE_ROWS: [&str; 7] = [
    "EVS10001,Harbour Hub,40.7128,-74.0060,\"123 Main Street, Springfield\",Springfield,AC Level 2,0.25,24/7,3.2,41.5,22,\"CCS, Type 2\",2018,Yes,4.5,4",
    "EVS10001,Harbour Hub,40.7128,-74.0060,\"123 Main Street, Springfield\",Springfield,AC Level 2,0.25,00:00-24:00,3.2,41.5,22,\"CCS, Type 2\",2018,Yes,4.5,4",
    "EVS10002,Pier Hub,40.70000,-74.0100,\"77 Water Street, Springfield\",Springfield,DC Fast Charger,0.300,06:00-22:00,1.5,30,150.0,CCS,2020,No,4.00,6",
    "EVS10002,Pier Hub,40.7,-74.01,\"77 Water Street, Springfield\",Springfield,DC Fast Charger,0.3,06:00-22:00,1.5,30,150,CCS,2020,No,4,6",
    "EVS10003,Odd Hub,47.6062,-122.3321,\"400 Pine Street, Seattle\",Seattle,Wireless,0.20,09:00-17:00,4.4,18.3,11,Tesla,2016,No,3.9,5",
    "EVS10003,Odd Hub,47.6062,-122.3321,\"400 Pine Street, Seattle\",Seattle,Inductive,0.20,09:00-17:00,4.4,18.3,11,Tesla,2016,No,3.9,5",
    "EVS10004,Grid Hub,40.0000001,-74.0000001,\"55 Elm Avenue, Springfield\",Springfield,AC Level 1,0.10,24/7,2.0,12,7,Type 1,2017,No,3.5,3",
];

/// Write `rows` under the standard header into `dir`
fn write_dataset(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("detailed_ev_charging_stations.csv");
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

/// Write the sample dataset into `dir`
fn write_sample_dataset(dir: &Path) -> PathBuf {
    write_dataset(dir, &ROWS)
}

fn run(input: &Path, options: OutputOptions) -> RunStats {
    DatasetProcessor::new(input)
        .unwrap()
        .with_output_options(options)
        .process()
        .unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_end_to_end_cleaning() {
    let dir = TempDir::new().unwrap();
    let input = write_sample_dataset(dir.path());
    let out_dir = dir.path().join("out");

    let stats = run(&input, OutputOptions::default().with_output_dir(&out_dir));

    assert_eq!(stats.input_rows, 9);
    assert_eq!(stats.output_rows, 3);
    assert_eq!(stats.pipeline.rejected_by(PipelineStage::Deduplication), 1);
    assert_eq!(stats.pipeline.rejected_by(PipelineStage::AddressValidation), 1);
    assert_eq!(stats.pipeline.rejected_by(PipelineStage::CoordinateValidation), 1);
    assert_eq!(
        stats
            .pipeline
            .rejected_by(PipelineStage::NumericRange(NumericField::CostPerKwh)),
        1
    );
    assert_eq!(
        stats
            .pipeline
            .rejected_by(PipelineStage::NumericRange(NumericField::RatingScore)),
        1
    );
    assert_eq!(
        stats
            .pipeline
            .rejected_by(PipelineStage::NumericRange(NumericField::InstallationYear)),
        1
    );
    assert_eq!(stats.pipeline.coercion.nulled_in("Cost (USD/kWh)"), 1);

    let output_path = stats.output_path.clone().unwrap();
    assert_eq!(
        output_path,
        out_dir.join("processed_ev_charging_stations.csv")
    );

    let content = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("{},Is24Hours,IsHighPower", HEADER));

    assert!(lines[1].starts_with("EVS00001,Harbour Hub,40.712800,-74.006000,"));
    assert!(!lines[1].contains("AC Level 2"));
    assert!(lines[1].contains(",L2,0.250000,00:00-24:00,"));
    assert!(lines[1].contains(",\"CCS, Type 2\",2018,"));
    assert!(lines[1].ends_with(",true,false"));

    assert!(lines[2].starts_with("EVS00004,"));
    assert!(lines[2].contains(",DC,0.450000,06:00-22:00,"));
    assert!(lines[2].ends_with(",false,true"));

    assert!(lines[3].starts_with("EVS00006,"));
    assert!(lines[3].contains(",Seattle,,,09:00-17:00,"));
    assert!(lines[3].ends_with(",false,false"));
}

#[test]
fn test_chart_specs_written() {
    let dir = TempDir::new().unwrap();
    let input = write_sample_dataset(dir.path());
    let out_dir = dir.path().join("out");

    let stats = run(&input, OutputOptions::default().with_output_dir(&out_dir));

    let charts_dir = out_dir.join("charts");
    assert_eq!(
        stats.chart_paths,
        vec![
            charts_dir.join("heatmap_spec.json"),
            charts_dir.join("scatter_spec.json"),
            charts_dir.join("trend_spec.json"),
        ]
    );

    let heatmap = read_json(&stats.chart_paths[0]);
    let cells = heatmap["data"]["values"].as_array().unwrap();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0]["Cost Range"], "0.20-0.25");
    assert_eq!(cells[0]["Charger Type"], "L2");
    assert_eq!(cells[0]["Usage Stats (avg users/day)"], 41.5);
    assert_eq!(cells[1]["Cost Range"], "0.40-0.45");
    assert_eq!(cells[1]["Charger Type"], "DC");

    let scatter = read_json(&stats.chart_paths[1]);
    assert_eq!(scatter["data"]["values"].as_array().unwrap().len(), 3);
    assert_eq!(scatter["data"]["values"][0]["Station Name"], "Harbour Hub");

    let trend = read_json(&stats.chart_paths[2]);
    let points = trend["data"]["values"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["Installation Year"], 2016);
    assert_eq!(points[0]["Charger Type"], "Unknown");
}

#[test]
fn test_rerun_on_output_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = write_sample_dataset(dir.path());
    let first_dir = dir.path().join("first");
    let second_dir = dir.path().join("second");

    let first = run(
        &input,
        OutputOptions::default()
            .with_output_dir(&first_dir)
            .without_charts(),
    );
    let first_output = first.output_path.unwrap();

    let second = run(
        &first_output,
        OutputOptions::default()
            .with_output_dir(&second_dir)
            .without_charts(),
    );

    assert_eq!(second.input_rows, 3);
    assert_eq!(second.output_rows, 3);
    assert_eq!(second.pipeline.total_rejected(), 0);
    assert_eq!(
        fs::read_to_string(&first_output).unwrap(),
        fs::read_to_string(second.output_path.unwrap()).unwrap()
    );
}

#[test]
fn test_rerun_after_normalization_collapse_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    let input = write_dataset(&input_dir, &NEAR_DUPLICATE_ROWS);
    let first_dir = dir.path().join("first");
    let second_dir = dir.path().join("second");

    let first = run(
        &input,
        OutputOptions::default()
            .with_output_dir(&first_dir)
            .without_charts(),
    );

    assert_eq!(first.input_rows, 7);
    assert_eq!(first.output_rows, 3);
    assert_eq!(first.pipeline.rejected_by(PipelineStage::Deduplication), 0);
    assert_eq!(
        first.pipeline.rejected_by(PipelineStage::OutputDeduplication),
        3
    );
    // Rounded to 40.000000,-74.000000 before the coordinate check
    assert_eq!(
        first.pipeline.rejected_by(PipelineStage::CoordinateValidation),
        1
    );

    let first_output = first.output_path.unwrap();
    let content = fs::read_to_string(&first_output).unwrap();
    let lines: Vec<&str> = content.lines().skip(1).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("EVS10001,"));
    assert!(lines[1].starts_with("EVS10002,Pier Hub,40.700000,-74.010000,"));
    assert!(lines[2].starts_with("EVS10003,"));
    assert!(lines[2].contains(",Seattle,,0.200000,"));

    let second = run(
        &first_output,
        OutputOptions::default()
            .with_output_dir(&second_dir)
            .without_charts(),
    );

    assert_eq!(second.input_rows, 3);
    assert_eq!(second.output_rows, 3);
    assert_eq!(second.pipeline.total_rejected(), 0);
    assert_eq!(
        content,
        fs::read_to_string(second.output_path.unwrap()).unwrap()
    );
}

#[test]
fn test_survivors_pass_every_validator() {
    let dir = TempDir::new().unwrap();
    let input = write_sample_dataset(dir.path());

    let table = read_station_csv(&input).unwrap();
    let result = RecordProcessor::new(PipelineConfig::default()).process(table);

    for record in &result.records {
        assert!(evcharge_processor::pipeline::is_valid_address(
            record.address.as_deref()
        ));
        assert!(evcharge_processor::pipeline::is_valid_coordinate_pair(
            record.latitude,
            record.longitude
        ));
        assert_ne!(record.availability.as_deref(), Some("24/7"));
    }
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = DatasetProcessor::new(dir.path().join("does_not_exist.csv"));

    assert!(matches!(
        result,
        Err(ChargingDataError::InputNotFound { .. })
    ));
}

#[test]
fn test_missing_required_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("no_address.csv");
    fs::write(&input, "Station ID,Latitude,Longitude\nEVS00001,40.7128,-74.0060\n").unwrap();

    let result = DatasetProcessor::new(&input)
        .unwrap()
        .with_output_options(OutputOptions::default().with_output_dir(dir.path().join("out")))
        .process();

    match result {
        Err(ChargingDataError::MissingColumns { columns, .. }) => {
            assert_eq!(columns, vec!["Address".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}
