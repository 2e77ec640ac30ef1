use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use evcharge_processor::pipeline::{is_valid_address, is_valid_coordinate};
use evcharge_processor::schema::{ColumnLayout, RawRow, RawTable};
use evcharge_processor::{PipelineConfig, RecordProcessor};

const HEADERS: [&str; 11] = [
    "Station ID",
    "Latitude",
    "Longitude",
    "Address",
    "Availability",
    "Charger Type",
    "Connector Types",
    "Cost (USD/kWh)",
    "Reviews (Rating)",
    "Installation Year",
    "Charging Capacity (kW)",
];

/// Synthetic rows with a mix of valid, duplicate and rejectable records
fn synthetic_rows(count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|i| {
            let id = i - i % 10 / 9; // every tenth row duplicates its predecessor
            let address = if id % 7 == 0 {
                "Random City 12".to_string()
            } else {
                format!("{} Main Street, Springfield", id + 1)
            };
            let charger = ["AC Level 1", "AC Level 2", "DC Fast Charger"][id % 3];
            vec![
                Some(format!("EVS{:05}", id)),
                Some(format!("{:.4}", 30.0 + (id % 200) as f64 * 0.0731)),
                Some(format!("{:.4}", -120.0 + (id % 300) as f64 * 0.0917)),
                Some(address),
                Some(if id % 2 == 0 { "24/7" } else { "08:00-20:00" }.to_string()),
                Some(charger.to_string()),
                Some("CCS, Type 2".to_string()),
                Some(format!("{:.2}", (id % 50) as f64 * 0.05)),
                Some(format!("{:.1}", 1.0 + (id % 40) as f64 * 0.1)),
                Some((2005 + id % 20).to_string()),
                Some(((id % 6) * 50).to_string()),
            ]
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_pipeline");
    let processor = RecordProcessor::new(PipelineConfig::default());

    for size in [1_000usize, 10_000] {
        let rows = synthetic_rows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let table = RawTable::new(ColumnLayout::analyze(&HEADERS), rows.clone());
                black_box(processor.process(table))
            })
        });
    }

    group.finish();
}

fn bench_validators(c: &mut Criterion) {
    c.bench_function("is_valid_address", |b| {
        b.iter(|| is_valid_address(black_box(Some("123 Main Street, Springfield"))))
    });
    c.bench_function("is_valid_coordinate", |b| {
        b.iter(|| is_valid_coordinate(black_box(40.7128), black_box(-74.0060)))
    });
}

criterion_group!(benches, bench_pipeline, bench_validators);
criterion_main!(benches);
