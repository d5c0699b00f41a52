//! Per-tick systems, run in this order by [crate::runner::tick_schedule].

pub mod arrivals;
pub mod dispatch;
pub mod reneging;
pub mod service;
pub mod snapshot;
