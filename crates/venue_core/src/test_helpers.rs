//! Test helpers for common test setup and utilities.
//!
//! Worlds built here have no arrival rules and a constant service time, so
//! tests place customers by hand and every tick is fully predictable.

use bevy_ecs::prelude::World;

use crate::distributions::ServiceTimeConfig;
use crate::ecs::{Customer, DispatchQueue, Station, StationPool};
use crate::patterns::ArrivalRules;
use crate::scenario::{build_venue, VenueConfig};

/// Service time used by [quiet_config] unless overridden.
pub const TEST_SERVICE_SECS: f64 = 60.0;

/// A venue config with no arrivals, constant service and a fixed seed.
pub fn quiet_config(station_count: usize, open_tick: u64, close_tick: u64) -> VenueConfig {
    VenueConfig::default()
        .with_stations(station_count)
        .with_window(open_tick, close_tick)
        .with_arrival_rules(ArrivalRules::default())
        .with_service_time(ServiceTimeConfig::Constant {
            secs: TEST_SERVICE_SECS,
        })
        .with_series(true)
        .with_seed(1)
}

/// Build a world from `config`.
///
/// # Panics
///
/// Panics if the config is invalid.
pub fn create_test_world(config: &VenueConfig) -> World {
    let mut world = World::new();
    build_venue(&mut world, config).expect("test config should be valid");
    world
}

/// Put a customer who arrived at `arrival_tick` at the back of the queue.
pub fn enqueue_customer(world: &mut World, arrival_tick: u64) {
    world
        .resource_mut::<DispatchQueue>()
        .push(Customer::arrive(arrival_tick));
}

/// Seat a customer directly at station `index`.
///
/// # Panics
///
/// Panics if the station does not exist.
pub fn seat_customer(
    world: &mut World,
    index: usize,
    arrival_tick: u64,
    started_at: u64,
    service_secs: f64,
) {
    let entity = world.resource::<StationPool>().stations()[index];
    world
        .get_mut::<Station>(entity)
        .expect("station entity")
        .begin_service(Customer::arrive(arrival_tick), service_secs, started_at);
}

/// Busy flag of every station, in station order.
pub fn station_occupancy(world: &World) -> Vec<bool> {
    world
        .resource::<StationPool>()
        .stations()
        .iter()
        .map(|&entity| world.get::<Station>(entity).is_some_and(Station::is_busy))
        .collect()
}
