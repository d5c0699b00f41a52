use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::{DEFAULT_CLOSE_TICK, DEFAULT_OPEN_TICK, SECS_PER_HOUR};
use crate::cost::CostModel;
use crate::distributions::ServiceTimeConfig;
use crate::error::ConfigError;
use crate::patterns::{ArrivalRules, ArrivalSchedule};
use crate::telemetry::VenueSnapshotConfig;

/// Default patience of a customer, counted from arrival (30 minutes).
pub const DEFAULT_RENEGING_THRESHOLD_SECS: u64 = 1_800;

/// Patience limit shared by queued and in-service customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource, Serialize, Deserialize)]
pub struct RenegingPolicy {
    pub threshold_secs: u64,
}

impl Default for RenegingPolicy {
    fn default() -> Self {
        Self {
            threshold_secs: DEFAULT_RENEGING_THRESHOLD_SECS,
        }
    }
}

impl RenegingPolicy {
    /// Queue pruning: true once the customer has waited at least the threshold.
    pub fn has_expired(&self, arrival_tick: u64, now: u64) -> bool {
        now.saturating_sub(arrival_tick) >= self.threshold_secs
    }

    /// At a station: true only once time since arrival is strictly past the threshold.
    pub fn in_service_expired(&self, arrival_tick: u64, now: u64) -> bool {
        now.saturating_sub(arrival_tick) > self.threshold_secs
    }
}

/// What happens to customers still at a station when the venue closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Resource, Serialize, Deserialize)]
pub enum ClosingPolicy {
    /// Count them as abandoned at close.
    #[default]
    ForceAbandon,
    /// Let them finish; they complete at their natural end tick.
    FinishService,
    /// Leave them out of both counters; reported separately.
    LeaveInService,
}

impl ClosingPolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::ForceAbandon => "force-abandon",
            Self::FinishService => "finish-service",
            Self::LeaveInService => "leave-in-service",
        }
    }
}

/// Parameters for building a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueConfig {
    pub station_count: usize,
    pub open_tick: u64,
    pub close_tick: u64,
    pub arrival_rules: ArrivalRules,
    pub service_time: ServiceTimeConfig,
    pub reneging_threshold_secs: u64,
    pub closing_policy: ClosingPolicy,
    pub cost_model: CostModel,
    /// Random seed for reproducibility (optional; if None, uses OS entropy).
    pub seed: Option<u64>,
    /// Keep per-customer timestamps in the result.
    pub record_series: bool,
    pub snapshot_interval_ticks: u64,
    pub max_snapshots: usize,
}

impl Default for VenueConfig {
    fn default() -> Self {
        let snapshots = VenueSnapshotConfig::default();
        Self {
            station_count: 1,
            open_tick: DEFAULT_OPEN_TICK,
            close_tick: DEFAULT_CLOSE_TICK,
            arrival_rules: ArrivalSchedule::default().rules(DEFAULT_OPEN_TICK, DEFAULT_CLOSE_TICK),
            service_time: ServiceTimeConfig::default(),
            reneging_threshold_secs: DEFAULT_RENEGING_THRESHOLD_SECS,
            closing_policy: ClosingPolicy::default(),
            cost_model: CostModel::default(),
            seed: None,
            record_series: false,
            snapshot_interval_ticks: snapshots.interval_ticks,
            max_snapshots: snapshots.max_snapshots,
        }
    }
}

impl VenueConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stations(mut self, station_count: usize) -> Self {
        self.station_count = station_count;
        self
    }

    /// Set the operating window. Arrival rules are left untouched.
    pub fn with_window(mut self, open_tick: u64, close_tick: u64) -> Self {
        self.open_tick = open_tick;
        self.close_tick = close_tick;
        self
    }

    /// Set the operating window in whole hours of the day, e.g. 8..12.
    pub fn with_hours(self, open_hour: u64, close_hour: u64) -> Self {
        self.with_window(open_hour * SECS_PER_HOUR, close_hour * SECS_PER_HOUR)
    }

    pub fn with_arrival_rules(mut self, rules: ArrivalRules) -> Self {
        self.arrival_rules = rules;
        self
    }

    /// Replace the arrival rules with a preset laid over the current window.
    pub fn with_schedule(mut self, schedule: ArrivalSchedule) -> Self {
        self.arrival_rules = schedule.rules(self.open_tick, self.close_tick);
        self
    }

    pub fn with_service_time(mut self, service_time: ServiceTimeConfig) -> Self {
        self.service_time = service_time;
        self
    }

    pub fn with_reneging_threshold_secs(mut self, secs: u64) -> Self {
        self.reneging_threshold_secs = secs;
        self
    }

    pub fn with_closing_policy(mut self, policy: ClosingPolicy) -> Self {
        self.closing_policy = policy;
        self
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn with_series(mut self, record: bool) -> Self {
        self.record_series = record;
        self
    }

    pub fn with_snapshot_interval(mut self, interval_ticks: u64) -> Self {
        self.snapshot_interval_ticks = interval_ticks;
        self
    }

    pub fn reneging_policy(&self) -> RenegingPolicy {
        RenegingPolicy {
            threshold_secs: self.reneging_threshold_secs,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.station_count == 0 {
            return Err(ConfigError::NoStations);
        }
        if self.close_tick <= self.open_tick {
            return Err(ConfigError::EmptyWindow {
                open_tick: self.open_tick,
                close_tick: self.close_tick,
            });
        }
        if self.snapshot_interval_ticks == 0 {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        self.arrival_rules.validate()?;
        self.service_time.build()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reneging_boundary_is_inclusive() {
        let policy = RenegingPolicy::default();
        assert!(!policy.has_expired(100, 100 + 1_799));
        assert!(policy.has_expired(100, 100 + 1_800));
        assert!(!policy.has_expired(100, 50));
    }

    #[test]
    fn in_service_boundary_is_strict() {
        let policy = RenegingPolicy::default();
        assert!(!policy.in_service_expired(100, 100 + 1_800));
        assert!(policy.in_service_expired(100, 100 + 1_801));
        assert!(!policy.in_service_expired(100, 50));
    }

    #[test]
    fn default_config_is_valid() {
        let config = VenueConfig::default();
        assert_eq!(config.open_tick, 8 * SECS_PER_HOUR);
        assert_eq!(config.close_tick, 12 * SECS_PER_HOUR);
        assert_eq!(config.reneging_threshold_secs, 1_800);
        assert_eq!(config.arrival_rules.rules().len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_malformed_configs() {
        assert_eq!(
            VenueConfig::default().with_stations(0).validate(),
            Err(ConfigError::NoStations)
        );
        assert_eq!(
            VenueConfig::default().with_window(100, 100).validate(),
            Err(ConfigError::EmptyWindow {
                open_tick: 100,
                close_tick: 100
            })
        );
        assert!(matches!(
            VenueConfig::default()
                .with_service_time(ServiceTimeConfig::Normal {
                    mean_secs: 600.0,
                    std_dev_secs: -3.0,
                })
                .validate(),
            Err(ConfigError::InvalidServiceTime(_))
        ));
        assert_eq!(
            VenueConfig::default().with_snapshot_interval(0).validate(),
            Err(ConfigError::ZeroSnapshotInterval)
        );
    }

    #[test]
    fn schedule_follows_window() {
        let config = VenueConfig::default()
            .with_hours(9, 10)
            .with_schedule(ArrivalSchedule::Uniform);
        let rule = config.arrival_rules.rules()[0];
        assert_eq!(rule.start_tick, 9 * SECS_PER_HOUR);
        assert_eq!(rule.end_tick, 10 * SECS_PER_HOUR);
    }
}
