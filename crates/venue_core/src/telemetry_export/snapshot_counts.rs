use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt64Array};
use arrow::datatypes::Schema;

use crate::telemetry::VenueSnapshots;

use super::utils::{u64_field, write_record_batch};

pub fn write_snapshot_counts_parquet<P: AsRef<Path>>(
    path: P,
    snapshots: &VenueSnapshots,
) -> Result<(), Box<dyn Error>> {
    let n = snapshots.snapshots.len();
    let mut tick = Vec::with_capacity(n);
    let mut queue_len = Vec::with_capacity(n);
    let mut busy_stations = Vec::with_capacity(n);
    let mut idle_stations = Vec::with_capacity(n);
    let mut arrivals = Vec::with_capacity(n);
    let mut served = Vec::with_capacity(n);
    let mut abandoned = Vec::with_capacity(n);

    for snapshot in &snapshots.snapshots {
        tick.push(snapshot.tick);
        queue_len.push(snapshot.counts.queue_len as u64);
        busy_stations.push(snapshot.counts.busy_stations as u64);
        idle_stations.push(snapshot.counts.idle_stations as u64);
        arrivals.push(snapshot.counts.arrivals);
        served.push(snapshot.counts.served);
        abandoned.push(snapshot.counts.abandoned);
    }

    let schema = Schema::new(vec![
        u64_field("tick"),
        u64_field("queue_len"),
        u64_field("busy_stations"),
        u64_field("idle_stations"),
        u64_field("arrivals"),
        u64_field("served"),
        u64_field("abandoned"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(tick)),
        Arc::new(UInt64Array::from(queue_len)),
        Arc::new(UInt64Array::from(busy_stations)),
        Arc::new(UInt64Array::from(idle_stations)),
        Arc::new(UInt64Array::from(arrivals)),
        Arc::new(UInt64Array::from(served)),
        Arc::new(UInt64Array::from(abandoned)),
    ];

    write_record_batch(path, schema, arrays)
}
