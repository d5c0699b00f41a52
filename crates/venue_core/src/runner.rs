//! Simulation runner: runs the per-tick schedule and advances the clock.
//!
//! Clock progression happens here, outside systems. Each step runs the
//! schedule once for the current tick, then moves the clock forward by one.
//! Closing the venue (flushing the queue and applying the [ClosingPolicy])
//! is a separate, idempotent step.

use bevy_ecs::prelude::{Res, Resource, Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use tracing::{debug, info};

use crate::clock::SimulationClock;
use crate::cost::CostModel;
use crate::ecs::{DispatchQueue, Station, StationPool};
use crate::error::ConfigError;
use crate::scenario::{build_venue, ClosingPolicy, VenueConfig};
use crate::systems::{
    arrivals::arrival_system, dispatch::dispatch_system, reneging::reneging_system,
    service::service_system, snapshot::capture_snapshot_system,
};
use crate::telemetry::{
    AbandonReason, CompletedCustomer, CustomerSeries, FrameSnapshot, SimulationResult,
    VenueSnapshotConfig, VenueSnapshots, VenueStats,
};

/// Condition: snapshot interval has elapsed.
fn should_capture_snapshot(
    clock: Option<Res<SimulationClock>>,
    config: Option<Res<VenueSnapshotConfig>>,
    snapshots: Option<Res<VenueSnapshots>>,
) -> bool {
    let (Some(clock), Some(config), Some(snapshots)) = (clock, config, snapshots) else {
        return false;
    };
    match snapshots.last_snapshot_at {
        None => true,
        Some(last) => clock.now().saturating_sub(last) >= config.interval_ticks,
    }
}

/// Builds the per-tick schedule: arrivals, dispatch, service, reneging, then
/// the optional snapshot. Systems are chained and run on one thread so the
/// random stream is consumed in the same order every run.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            arrival_system,
            dispatch_system,
            service_system,
            reneging_system,
            capture_snapshot_system.run_if(should_capture_snapshot),
        )
            .chain(),
    );
    schedule
}

/// Runs one tick. Returns `false` without doing anything once the clock has
/// reached the close tick.
pub fn run_next_tick(world: &mut World, schedule: &mut Schedule) -> bool {
    if world.resource::<SimulationClock>().is_closed() {
        return false;
    }
    schedule.run(world);
    world.resource_mut::<SimulationClock>().advance();
    true
}

/// Runs one tick and invokes `hook` with the tick that was just simulated.
pub fn run_next_tick_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, u64),
{
    let tick = world.resource::<SimulationClock>().now();
    if !run_next_tick(world, schedule) {
        return false;
    }
    hook(world, tick);
    true
}

/// Runs ticks until the clock closes. Returns the number of ticks executed.
pub fn run_until_close(world: &mut World, schedule: &mut Schedule) -> u64 {
    let mut ticks = 0;
    while run_next_tick(world, schedule) {
        ticks += 1;
    }
    ticks
}

/// What closing did to the customers still in the venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Resource)]
pub struct ClosingReport {
    pub queued_abandoned: u64,
    pub in_service_abandoned: u64,
    pub finished_after_close: u64,
    pub left_in_service: u64,
}

/// Flush the queue as abandoned and resolve in-service customers by the
/// [ClosingPolicy]. Safe to call more than once; later calls return the first report.
pub fn close_venue(world: &mut World) -> ClosingReport {
    if let Some(report) = world.get_resource::<ClosingReport>() {
        return *report;
    }

    let policy = world
        .get_resource::<ClosingPolicy>()
        .copied()
        .unwrap_or_default();
    let queued = world.resource_mut::<DispatchQueue>().clear() as u64;

    let pool = world.resource::<StationPool>().0.clone();
    let mut in_service = Vec::new();
    for entity in pool {
        let Some(mut station) = world.get_mut::<Station>(entity) else {
            continue;
        };
        let slot = match policy {
            ClosingPolicy::LeaveInService => station.serving().copied(),
            ClosingPolicy::ForceAbandon | ClosingPolicy::FinishService => station.release(),
        };
        in_service.extend(slot);
    }

    let mut report = ClosingReport {
        queued_abandoned: queued,
        ..Default::default()
    };
    let n = in_service.len() as u64;
    match policy {
        ClosingPolicy::ForceAbandon => report.in_service_abandoned = n,
        ClosingPolicy::FinishService => report.finished_after_close = n,
        ClosingPolicy::LeaveInService => report.left_in_service = n,
    }

    let finished: Vec<CompletedCustomer> = if policy == ClosingPolicy::FinishService {
        in_service
            .iter()
            .map(|slot| CompletedCustomer {
                arrival_tick: slot.customer.arrival_tick,
                service_started_at: slot.started_at,
                service_secs: slot.service_secs,
                departure_tick: slot.natural_end_tick(),
            })
            .collect()
    } else {
        Vec::new()
    };

    {
        let mut stats = world.resource_mut::<VenueStats>();
        stats.record_abandonments(
            AbandonReason::AtClose,
            report.queued_abandoned + report.in_service_abandoned,
        );
        stats.in_service_at_close += report.left_in_service;
        for record in &finished {
            stats.record_completion(record.service_secs, record.wait_secs());
        }
    }
    if let Some(mut series) = world.get_resource_mut::<CustomerSeries>() {
        for record in finished {
            series.record_completion(record);
        }
    }

    let stats = world.resource::<VenueStats>();
    info!(
        policy = policy.name(),
        arrivals = stats.arrivals,
        served = stats.served_count(),
        abandoned = stats.abandoned_count(),
        queued_at_close = report.queued_abandoned,
        in_service_at_close = n,
        "venue closed"
    );
    world.insert_resource(report);
    report
}

/// Collect the result from a world. Call after [close_venue] for final figures.
pub fn extract_result(world: &World) -> SimulationResult {
    let clock = world.resource::<SimulationClock>();
    let stats = world.resource::<VenueStats>();
    let station_count = world.resource::<StationPool>().len();
    let cost_model = world.get_resource::<CostModel>().copied().unwrap_or_default();
    let series = world
        .get_resource::<CustomerSeries>()
        .filter(|series| series.enabled)
        .cloned();

    SimulationResult {
        station_count,
        open_tick: clock.open_tick(),
        close_tick: clock.close_tick(),
        closing_policy: world
            .get_resource::<ClosingPolicy>()
            .copied()
            .unwrap_or_default(),
        total_customers: stats.arrivals,
        gross_arrivals: stats.gross_arrivals,
        served_count: stats.served_count(),
        abandoned_count: stats.abandoned_count(),
        reneged_count: stats.reneged,
        abandoned_in_service: stats.abandoned_in_service,
        abandoned_at_close: stats.abandoned_at_close,
        in_service_at_close: stats.in_service_at_close,
        service_time: stats.service_time,
        wait_time: stats.wait_time,
        cost: cost_model.breakdown(station_count, stats.abandoned_count()),
        arrivals_by_hour: stats.arrivals_by_hour.clone(),
        series,
    }
}

/// Read-only view of the venue at the current tick.
pub fn frame_snapshot(world: &World) -> FrameSnapshot {
    let stats = world.resource::<VenueStats>();
    let pool = world.resource::<StationPool>();
    let cost_model = world.get_resource::<CostModel>().copied().unwrap_or_default();
    let stations = pool
        .stations()
        .iter()
        .map(|&entity| world.get::<Station>(entity).is_some_and(Station::is_busy))
        .collect();

    FrameSnapshot {
        tick: world.resource::<SimulationClock>().now(),
        stations,
        queue_arrivals: world
            .resource::<DispatchQueue>()
            .iter()
            .map(|customer| customer.arrival_tick)
            .collect(),
        arrivals: stats.arrivals,
        served: stats.served_count(),
        abandoned: stats.abandoned_count(),
        service_time: stats.service_time,
        wait_time: stats.wait_time,
        cost: cost_model.breakdown(pool.len(), stats.abandoned_count()),
    }
}

/// A built venue together with its schedule.
pub struct VenueSimulation {
    world: World,
    schedule: Schedule,
}

impl std::fmt::Debug for VenueSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VenueSimulation").finish_non_exhaustive()
    }
}

impl VenueSimulation {
    pub fn new(config: &VenueConfig) -> Result<Self, ConfigError> {
        let mut world = World::new();
        build_venue(&mut world, config)?;
        info!(
            stations = config.station_count,
            open_tick = config.open_tick,
            close_tick = config.close_tick,
            seed = ?config.seed,
            closing_policy = config.closing_policy.name(),
            "venue opened"
        );
        Ok(Self {
            world,
            schedule: tick_schedule(),
        })
    }

    /// Simulate one tick. Returns `false` once the window is exhausted.
    pub fn step(&mut self) -> bool {
        run_next_tick(&mut self.world, &mut self.schedule)
    }

    pub fn run_to_close(&mut self) -> u64 {
        run_until_close(&mut self.world, &mut self.schedule)
    }

    pub fn now(&self) -> u64 {
        self.world.resource::<SimulationClock>().now()
    }

    pub fn is_finished(&self) -> bool {
        self.world.resource::<SimulationClock>().is_closed()
    }

    pub fn frame_snapshot(&self) -> FrameSnapshot {
        frame_snapshot(&self.world)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Close the venue (if not already closed) and return the result.
    pub fn result(&mut self) -> SimulationResult {
        close_venue(&mut self.world);
        extract_result(&self.world)
    }
}

/// Build a venue, simulate the whole window, close it and return the result.
pub fn run(config: &VenueConfig) -> Result<SimulationResult, ConfigError> {
    let mut sim = VenueSimulation::new(config)?;
    let ticks = sim.run_to_close();
    debug!(ticks, "operating window exhausted");
    Ok(sim.result())
}
