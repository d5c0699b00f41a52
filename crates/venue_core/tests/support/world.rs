#![allow(dead_code)]

use bevy_ecs::prelude::World;
use venue_core::distributions::ServiceTimeConfig;
use venue_core::scenario::{ClosingPolicy, VenueConfig};
use venue_core::test_helpers::{create_test_world, quiet_config};

/// Builder configuration for reproducible test worlds.
#[derive(Clone, Debug)]
pub struct TestWorldConfig {
    pub station_count: usize,
    pub open_tick: u64,
    pub close_tick: u64,
    pub service_secs: f64,
    pub reneging_threshold_secs: u64,
    pub closing_policy: ClosingPolicy,
}

impl Default for TestWorldConfig {
    fn default() -> Self {
        Self {
            station_count: 1,
            open_tick: 0,
            close_tick: 3_600,
            service_secs: 60.0,
            reneging_threshold_secs: 1_800,
            closing_policy: ClosingPolicy::default(),
        }
    }
}

/// Builds quiet venues (no random arrivals) for tests that place customers by hand.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    config: TestWorldConfig,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stations(mut self, station_count: usize) -> Self {
        self.config.station_count = station_count;
        self
    }

    pub fn with_window(mut self, open_tick: u64, close_tick: u64) -> Self {
        self.config.open_tick = open_tick;
        self.config.close_tick = close_tick;
        self
    }

    pub fn with_service_secs(mut self, secs: f64) -> Self {
        self.config.service_secs = secs;
        self
    }

    pub fn with_reneging_threshold(mut self, secs: u64) -> Self {
        self.config.reneging_threshold_secs = secs;
        self
    }

    pub fn with_closing_policy(mut self, policy: ClosingPolicy) -> Self {
        self.config.closing_policy = policy;
        self
    }

    pub fn venue_config(&self) -> VenueConfig {
        quiet_config(
            self.config.station_count,
            self.config.open_tick,
            self.config.close_tick,
        )
        .with_service_time(ServiceTimeConfig::Constant {
            secs: self.config.service_secs,
        })
        .with_reneging_threshold_secs(self.config.reneging_threshold_secs)
        .with_closing_policy(self.config.closing_policy)
    }

    pub fn build(self) -> World {
        create_test_world(&self.venue_config())
    }
}
