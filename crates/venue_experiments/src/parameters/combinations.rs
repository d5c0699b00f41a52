use venue_core::patterns::ArrivalSchedule;
use venue_core::scenario::ClosingPolicy;

use super::ParameterSpace;

/// Represents a single parameter combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct ParameterCombination {
    pub(super) station_count: usize,
    /// `None` keeps the base config's arrival rules.
    pub(super) schedule: Option<ArrivalSchedule>,
    pub(super) reneging_threshold_secs: u64,
    pub(super) closing_policy: ClosingPolicy,
}

/// Holds all parameter variations to explore.
pub(super) struct ParameterVariations {
    station_counts: Vec<usize>,
    schedules: Vec<Option<ArrivalSchedule>>,
    reneging_thresholds: Vec<u64>,
    closing_policies: Vec<ClosingPolicy>,
}

fn or_default<T: Clone>(values: &[T], default: T) -> Vec<T> {
    if values.is_empty() {
        vec![default]
    } else {
        values.to_vec()
    }
}

impl ParameterVariations {
    pub(super) fn from_space(space: &ParameterSpace) -> Self {
        Self {
            station_counts: or_default(&space.station_counts, space.base.station_count),
            schedules: if space.schedules.is_empty() {
                vec![None]
            } else {
                space.schedules.iter().copied().map(Some).collect()
            },
            reneging_thresholds: or_default(
                &space.reneging_thresholds,
                space.base.reneging_threshold_secs,
            ),
            closing_policies: or_default(&space.closing_policies, space.base.closing_policy),
        }
    }

    /// Generate all combinations using Cartesian product.
    pub(super) fn generate_combinations(&self) -> impl Iterator<Item = ParameterCombination> + '_ {
        self.station_counts.iter().flat_map(move |&station_count| {
            self.schedules.iter().flat_map(move |&schedule| {
                self.reneging_thresholds
                    .iter()
                    .flat_map(move |&reneging_threshold_secs| {
                        self.closing_policies
                            .iter()
                            .map(move |&closing_policy| ParameterCombination {
                                station_count,
                                schedule,
                                reneging_threshold_secs,
                                closing_policy,
                            })
                    })
            })
        })
    }

    pub(super) fn pick(&self, picks: [usize; 4]) -> ParameterCombination {
        ParameterCombination {
            station_count: self.station_counts[picks[0] % self.station_counts.len()],
            schedule: self.schedules[picks[1] % self.schedules.len()],
            reneging_threshold_secs: self.reneging_thresholds[picks[2] % self.reneging_thresholds.len()],
            closing_policy: self.closing_policies[picks[3] % self.closing_policies.len()],
        }
    }

    pub(super) fn dimensions(&self) -> [usize; 4] {
        [
            self.station_counts.len(),
            self.schedules.len(),
            self.reneging_thresholds.len(),
            self.closing_policies.len(),
        ]
    }
}
