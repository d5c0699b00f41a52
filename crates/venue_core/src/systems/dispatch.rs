use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::trace;

use crate::clock::SimulationClock;
use crate::distributions::ServiceTimeModel;
use crate::ecs::{DispatchQueue, Station, StationPool, VenueRng};
use crate::telemetry::CustomerSeries;

/// Hand the head of the queue to each idle station, in station order.
///
/// The service duration is sampled here, once per customer.
pub fn dispatch_system(
    clock: Res<SimulationClock>,
    pool: Res<StationPool>,
    model: Res<ServiceTimeModel>,
    mut rng: ResMut<VenueRng>,
    mut queue: ResMut<DispatchQueue>,
    mut series: ResMut<CustomerSeries>,
    mut stations: Query<&mut Station>,
) {
    let now = clock.now();
    for &entity in pool.stations() {
        if queue.is_empty() {
            break;
        }
        let Ok(mut station) = stations.get_mut(entity) else {
            continue;
        };
        if station.is_busy() {
            continue;
        }
        let Some(customer) = queue.pop_front() else {
            break;
        };
        let service_secs = model.sample_secs(&mut rng.0);
        series.record_service(service_secs);
        trace!(
            tick = now,
            station = station.index,
            arrival_tick = customer.arrival_tick,
            service_secs,
            "service started"
        );
        station.begin_service(customer, service_secs, now);
    }
}
