use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::SimulationClock;
use crate::ecs::{DispatchQueue, Station};
use crate::telemetry::{VenueCounts, VenueSnapshot, VenueSnapshotConfig, VenueSnapshots, VenueStats};

pub fn capture_snapshot_system(
    clock: Res<SimulationClock>,
    config: Res<VenueSnapshotConfig>,
    mut snapshots: ResMut<VenueSnapshots>,
    stats: Res<VenueStats>,
    queue: Res<DispatchQueue>,
    stations: Query<&Station>,
) {
    let now = clock.now();
    let busy_stations = stations.iter().filter(|station| station.is_busy()).count();
    let counts = VenueCounts {
        queue_len: queue.len(),
        busy_stations,
        idle_stations: stations.iter().count() - busy_stations,
        arrivals: stats.arrivals,
        served: stats.served_count(),
        abandoned: stats.abandoned_count(),
    };

    snapshots.last_snapshot_at = Some(now);
    snapshots.snapshots.push_back(VenueSnapshot { tick: now, counts });
    if snapshots.snapshots.len() > config.max_snapshots {
        snapshots.snapshots.pop_front();
    }
}
