//! Parquet export of a finished run: per-customer series, snapshot counts and
//! the arrivals-per-hour histogram.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::telemetry::{SimulationResult, VenueSnapshots};

mod arrivals_by_hour;
mod customers;
mod snapshot_counts;
mod utils;
mod validate;

pub use arrivals_by_hour::write_arrivals_by_hour_parquet;
pub use customers::{write_completed_customers_parquet, write_service_times_parquet};
pub use snapshot_counts::write_snapshot_counts_parquet;
pub use validate::validate_completed_customer;

pub const COMPLETED_CUSTOMERS_FILE: &str = "completed_customers.parquet";
pub const SERVICE_TIMES_FILE: &str = "service_times.parquet";
pub const SNAPSHOT_COUNTS_FILE: &str = "snapshot_counts.parquet";
pub const ARRIVALS_BY_HOUR_FILE: &str = "arrivals_by_hour.parquet";

/// Write every artifact of a run into `dir`, creating it if needed.
/// Series files are only written when the run recorded a series.
pub fn write_run_parquet<P: AsRef<Path>>(
    dir: P,
    result: &SimulationResult,
    snapshots: &VenueSnapshots,
) -> Result<(), Box<dyn Error>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    if let Some(series) = &result.series {
        write_completed_customers_parquet(dir.join(COMPLETED_CUSTOMERS_FILE), series)?;
        write_service_times_parquet(dir.join(SERVICE_TIMES_FILE), series)?;
    }
    write_snapshot_counts_parquet(dir.join(SNAPSHOT_COUNTS_FILE), snapshots)?;
    write_arrivals_by_hour_parquet(dir.join(ARRIVALS_BY_HOUR_FILE), &result.arrivals_by_hour)?;
    Ok(())
}
