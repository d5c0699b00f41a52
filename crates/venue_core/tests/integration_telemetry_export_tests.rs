use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use venue_core::runner::VenueSimulation;
use venue_core::scenario::VenueConfig;
use venue_core::telemetry::{CompletedCustomer, CustomerSeries, VenueSnapshots};
use venue_core::telemetry_export::{
    write_completed_customers_parquet, write_run_parquet, ARRIVALS_BY_HOUR_FILE,
    COMPLETED_CUSTOMERS_FILE, SERVICE_TIMES_FILE, SNAPSHOT_COUNTS_FILE,
};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{nanos}"))
}

fn parquet_columns_and_rows(path: &Path) -> (Vec<String>, usize) {
    let file = File::open(path).expect("parquet file should exist");
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).expect("parquet reader should build");
    let columns = builder
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    let rows = builder
        .build()
        .expect("reader")
        .map(|batch| batch.expect("batch").num_rows())
        .sum();
    (columns, rows)
}

#[test]
fn run_export_round_trips_row_counts() {
    let config = VenueConfig::default()
        .with_stations(2)
        .with_seed(3)
        .with_series(true)
        .with_snapshot_interval(300);
    let mut sim = VenueSimulation::new(&config).expect("valid config");
    sim.run_to_close();
    let result = sim.result();
    let snapshots = sim.world().resource::<VenueSnapshots>().clone();

    let dir = temp_dir("venue_export");
    write_run_parquet(&dir, &result, &snapshots).expect("export");

    let series = result.series.as_ref().expect("series");
    let (columns, rows) = parquet_columns_and_rows(&dir.join(COMPLETED_CUSTOMERS_FILE));
    assert_eq!(
        columns,
        vec![
            "arrival_tick",
            "service_started_at",
            "service_secs",
            "departure_tick",
            "wait_secs"
        ]
    );
    assert_eq!(rows, series.completed.len());
    assert_eq!(rows as u64, result.served_count);

    let (_, rows) = parquet_columns_and_rows(&dir.join(SERVICE_TIMES_FILE));
    assert_eq!(rows, series.service_secs.len());

    let (columns, rows) = parquet_columns_and_rows(&dir.join(SNAPSHOT_COUNTS_FILE));
    assert_eq!(columns[0], "tick");
    assert_eq!(rows, 48);

    let (_, rows) = parquet_columns_and_rows(&dir.join(ARRIVALS_BY_HOUR_FILE));
    assert_eq!(rows, result.arrivals_by_hour.len());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn export_skips_series_files_when_not_recorded() {
    let config = VenueConfig::default().with_seed(3);
    let mut sim = VenueSimulation::new(&config).expect("valid config");
    sim.run_to_close();
    let result = sim.result();
    assert!(result.series.is_none());

    let dir = temp_dir("venue_export_plain");
    write_run_parquet(&dir, &result, &VenueSnapshots::default()).expect("export");
    assert!(!dir.join(COMPLETED_CUSTOMERS_FILE).exists());
    assert!(dir.join(SNAPSHOT_COUNTS_FILE).exists());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn malformed_series_is_rejected() {
    let series = CustomerSeries {
        enabled: true,
        completed: vec![CompletedCustomer {
            arrival_tick: 50,
            service_started_at: 40,
            service_secs: 5.0,
            departure_tick: 45,
        }],
        ..Default::default()
    };
    let dir = temp_dir("venue_export_bad");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let err = write_completed_customers_parquet(dir.join("bad.parquet"), &series).unwrap_err();
    assert!(err.to_string().contains("arriving at 50"));
    std::fs::remove_dir_all(&dir).ok();
}
