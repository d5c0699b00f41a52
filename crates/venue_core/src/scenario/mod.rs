//! Venue setup: configuration and the resources/entities built from it.

mod build;
mod params;

pub use build::build_venue;
pub use params::{ClosingPolicy, RenegingPolicy, VenueConfig, DEFAULT_RENEGING_THRESHOLD_SECS};
