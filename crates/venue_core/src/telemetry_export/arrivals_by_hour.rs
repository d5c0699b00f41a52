use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt64Array};
use arrow::datatypes::Schema;

use super::utils::{u64_field, write_record_batch};

pub fn write_arrivals_by_hour_parquet<P: AsRef<Path>>(
    path: P,
    arrivals_by_hour: &BTreeMap<u64, u64>,
) -> Result<(), Box<dyn Error>> {
    let (hours, counts): (Vec<u64>, Vec<u64>) = arrivals_by_hour.iter().map(|(h, c)| (*h, *c)).unzip();

    let schema = Schema::new(vec![u64_field("hour"), u64_field("arrivals")]);
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(hours)),
        Arc::new(UInt64Array::from(counts)),
    ];

    write_record_batch(path, schema, arrays)
}
