#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use venue_core::runner::{close_venue, run_next_tick, run_until_close, tick_schedule, ClosingReport};

/// Helper that owns a reusable `Schedule` so tests can step or drain the window.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    pub fn new() -> Self {
        Self {
            schedule: tick_schedule(),
        }
    }

    /// Run a single tick (returns `true` if a tick was simulated).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_tick(world, &mut self.schedule)
    }

    /// Run up to `ticks` ticks, returning how many were simulated.
    pub fn run_ticks(&mut self, world: &mut World, ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < ticks && self.run_one(world) {
            ran += 1;
        }
        ran
    }

    /// Drive the venue to its close tick and close it.
    pub fn run_full(&mut self, world: &mut World) -> ClosingReport {
        run_until_close(world, &mut self.schedule);
        close_venue(world)
    }
}
