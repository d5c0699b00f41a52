use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::{debug, trace};

use crate::clock::SimulationClock;
use crate::ecs::{Station, StationPool};
use crate::scenario::RenegingPolicy;
use crate::telemetry::{AbandonReason, CompletedCustomer, CustomerSeries, VenueStats};

/// Complete finished services; otherwise drop customers who have been in the
/// venue for longer than the threshold, counted from their arrival.
pub fn service_system(
    clock: Res<SimulationClock>,
    pool: Res<StationPool>,
    reneging: Res<RenegingPolicy>,
    mut stats: ResMut<VenueStats>,
    mut series: ResMut<CustomerSeries>,
    mut stations: Query<&mut Station>,
) {
    let now = clock.now();
    let mut abandoned = 0;
    for &entity in pool.stations() {
        let Ok(mut station) = stations.get_mut(entity) else {
            continue;
        };
        let Some(slot) = station.serving().copied() else {
            continue;
        };

        if slot.is_complete(now) {
            station.release();
            let wait_secs = slot.customer.time_in_venue(now);
            stats.record_completion(slot.service_secs, wait_secs);
            series.record_completion(CompletedCustomer {
                arrival_tick: slot.customer.arrival_tick,
                service_started_at: slot.started_at,
                service_secs: slot.service_secs,
                departure_tick: now,
            });
            trace!(tick = now, station = station.index, wait_secs, "service completed");
        } else if reneging.in_service_expired(slot.customer.arrival_tick, now) {
            station.release();
            abandoned += 1;
        }
    }

    if abandoned > 0 {
        stats.record_abandonments(AbandonReason::InService, abandoned);
        debug!(tick = now, abandoned, "customers abandoned while in service");
    }
}
