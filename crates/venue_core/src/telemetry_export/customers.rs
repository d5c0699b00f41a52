use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array};
use arrow::datatypes::Schema;

use crate::telemetry::CustomerSeries;

use super::utils::{f64_field, u64_field, write_record_batch};
use super::validate::validate_completed_customer;

/// One row per served customer, in completion order.
pub fn write_completed_customers_parquet<P: AsRef<Path>>(
    path: P,
    series: &CustomerSeries,
) -> Result<(), Box<dyn Error>> {
    let n = series.completed.len();
    let mut arrival_tick = Vec::with_capacity(n);
    let mut service_started_at = Vec::with_capacity(n);
    let mut service_secs = Vec::with_capacity(n);
    let mut departure_tick = Vec::with_capacity(n);
    let mut wait_secs = Vec::with_capacity(n);

    for record in &series.completed {
        if let Some(problem) = validate_completed_customer(record) {
            return Err(problem.into());
        }
        arrival_tick.push(record.arrival_tick);
        service_started_at.push(record.service_started_at);
        service_secs.push(record.service_secs);
        departure_tick.push(record.departure_tick);
        wait_secs.push(record.wait_secs());
    }

    let schema = Schema::new(vec![
        u64_field("arrival_tick"),
        u64_field("service_started_at"),
        f64_field("service_secs"),
        u64_field("departure_tick"),
        u64_field("wait_secs"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(arrival_tick)),
        Arc::new(UInt64Array::from(service_started_at)),
        Arc::new(Float64Array::from(service_secs)),
        Arc::new(UInt64Array::from(departure_tick)),
        Arc::new(UInt64Array::from(wait_secs)),
    ];

    write_record_batch(path, schema, arrays)
}

/// Every sampled service duration, including those of customers who abandoned.
pub fn write_service_times_parquet<P: AsRef<Path>>(
    path: P,
    series: &CustomerSeries,
) -> Result<(), Box<dyn Error>> {
    let schema = Schema::new(vec![f64_field("service_secs")]);
    let arrays: Vec<ArrayRef> = vec![Arc::new(Float64Array::from(series.service_secs.clone()))];
    write_record_batch(path, schema, arrays)
}
