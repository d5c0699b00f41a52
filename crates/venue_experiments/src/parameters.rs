//! Parameter variation framework for exploring venue configurations.
//!
//! This module provides tools for defining parameter spaces and generating
//! parameter sets for parallel experimentation. Supports grid search and
//! random sampling strategies. Every combination is replicated over
//! `replications` seeds so costs can be averaged.

use venue_core::patterns::ArrivalSchedule;
use venue_core::scenario::{ClosingPolicy, VenueConfig};

mod combinations;
mod conversion;
mod sampling;

use combinations::ParameterVariations;
use conversion::combination_to_parameter_sets;

/// A single venue configuration for one simulation run.
///
/// Wraps [VenueConfig] with experiment metadata for tracking and reproducibility.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    pub config: VenueConfig,
    /// Identifies the parameter combination; shared by its replications.
    pub experiment_id: String,
    /// Replication index within the experiment.
    pub run_id: usize,
    pub seed: u64,
}

impl ParameterSet {
    pub fn new(config: VenueConfig, experiment_id: String, run_id: usize, seed: u64) -> Self {
        Self {
            config,
            experiment_id,
            run_id,
            seed,
        }
    }

    /// The venue config with this run's seed applied.
    pub fn venue_config(&self) -> VenueConfig {
        self.config.clone().with_seed(self.seed)
    }

    pub fn station_count(&self) -> usize {
        self.config.station_count
    }
}

/// Defines a parameter space for exploration.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    /// Base config (used as defaults for unspecified parameters).
    base: VenueConfig,
    station_counts: Vec<usize>,
    schedules: Vec<ArrivalSchedule>,
    reneging_thresholds: Vec<u64>,
    closing_policies: Vec<ClosingPolicy>,
    replications: usize,
    base_seed: u64,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self {
            base: VenueConfig::default(),
            station_counts: vec![],
            schedules: vec![],
            reneging_thresholds: vec![],
            closing_policies: vec![],
            replications: 1,
            base_seed: 0,
        }
    }

    /// Create a new parameter space for grid search.
    pub fn grid() -> Self {
        Self::new()
    }

    /// Replace the base config. Its arrival rules are only used when no schedule is swept.
    pub fn base(mut self, config: VenueConfig) -> Self {
        self.base = config;
        self
    }

    pub fn station_counts(mut self, counts: Vec<usize>) -> Self {
        self.station_counts = counts;
        self
    }

    pub fn schedules(mut self, schedules: Vec<ArrivalSchedule>) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn reneging_thresholds(mut self, thresholds_secs: Vec<u64>) -> Self {
        self.reneging_thresholds = thresholds_secs;
        self
    }

    pub fn closing_policies(mut self, policies: Vec<ClosingPolicy>) -> Self {
        self.closing_policies = policies;
        self
    }

    /// Number of seeds each combination is run with (at least one).
    pub fn replications(mut self, replications: usize) -> Self {
        self.replications = replications.max(1);
        self
    }

    pub fn base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Generate all parameter sets (Cartesian product times replications).
    pub fn generate(&self) -> Vec<ParameterSet> {
        let variations = ParameterVariations::from_space(self);
        variations
            .generate_combinations()
            .enumerate()
            .flat_map(|(experiment_id, combo)| {
                combination_to_parameter_sets(
                    &self.base,
                    combo,
                    experiment_id,
                    self.replications,
                    self.base_seed,
                )
            })
            .collect()
    }
}
