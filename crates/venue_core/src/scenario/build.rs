use bevy_ecs::prelude::World;
use tracing::debug;

use crate::clock::SimulationClock;
use crate::distributions::ServiceTimeModel;
use crate::ecs::{DispatchQueue, Station, StationPool, VenueRng};
use crate::error::ConfigError;
use crate::scenario::params::VenueConfig;
use crate::telemetry::{CustomerSeries, VenueSnapshotConfig, VenueSnapshots, VenueStats};

/// Insert every venue resource into `world` and spawn the stations.
///
/// The config is validated first; nothing is inserted when it is rejected.
pub fn build_venue(world: &mut World, config: &VenueConfig) -> Result<(), ConfigError> {
    config.validate()?;
    let service = config.service_time.build()?;

    world.insert_resource(SimulationClock::new(config.open_tick, config.close_tick));
    world.insert_resource(config.arrival_rules.clone());
    world.insert_resource(ServiceTimeModel::new(service));
    world.insert_resource(config.reneging_policy());
    world.insert_resource(config.closing_policy);
    world.insert_resource(config.cost_model);
    world.insert_resource(VenueRng::new(config.seed));
    world.insert_resource(DispatchQueue::default());
    world.insert_resource(VenueStats::default());
    world.insert_resource(if config.record_series {
        CustomerSeries::enabled()
    } else {
        CustomerSeries::default()
    });
    world.insert_resource(VenueSnapshotConfig {
        interval_ticks: config.snapshot_interval_ticks,
        max_snapshots: config.max_snapshots,
    });
    world.insert_resource(VenueSnapshots::default());

    let stations = (0..config.station_count)
        .map(|index| world.spawn(Station::new(index)).id())
        .collect();
    world.insert_resource(StationPool(stations));

    debug!(
        stations = config.station_count,
        open_tick = config.open_tick,
        close_tick = config.close_tick,
        rules = config.arrival_rules.rules().len(),
        "venue built"
    );
    Ok(())
}
