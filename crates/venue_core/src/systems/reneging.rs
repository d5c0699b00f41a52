use bevy_ecs::prelude::{Res, ResMut};
use tracing::debug;

use crate::clock::SimulationClock;
use crate::ecs::DispatchQueue;
use crate::scenario::RenegingPolicy;
use crate::telemetry::{AbandonReason, VenueStats};

/// Remove every queued customer who has waited out the threshold.
pub fn reneging_system(
    clock: Res<SimulationClock>,
    policy: Res<RenegingPolicy>,
    mut queue: ResMut<DispatchQueue>,
    mut stats: ResMut<VenueStats>,
) {
    let now = clock.now();
    let removed = queue.remove_where(|customer| policy.has_expired(customer.arrival_tick, now));
    if removed > 0 {
        stats.record_abandonments(AbandonReason::Reneged, removed as u64);
        debug!(tick = now, removed, queue_len = queue.len(), "customers reneged");
    }
}
