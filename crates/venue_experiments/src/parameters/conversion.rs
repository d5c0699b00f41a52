use venue_core::scenario::VenueConfig;

use super::combinations::ParameterCombination;
use super::ParameterSet;

/// Seed for one replication; spreads consecutive experiments far apart.
pub(super) fn replication_seed(base_seed: u64, experiment_id: usize, run_id: usize) -> u64 {
    base_seed
        .wrapping_add((experiment_id as u64).wrapping_mul(0x9e37_79b9))
        .wrapping_add(run_id as u64)
}

pub(super) fn combination_to_parameter_sets(
    base: &VenueConfig,
    combo: ParameterCombination,
    experiment_id: usize,
    replications: usize,
    base_seed: u64,
) -> Vec<ParameterSet> {
    let mut config = base
        .clone()
        .with_stations(combo.station_count)
        .with_reneging_threshold_secs(combo.reneging_threshold_secs)
        .with_closing_policy(combo.closing_policy);
    if let Some(schedule) = combo.schedule {
        config = config.with_schedule(schedule);
    }

    (0..replications)
        .map(|run_id| {
            ParameterSet::new(
                config.clone(),
                format!("exp_{experiment_id}"),
                run_id,
                replication_seed(base_seed, experiment_id, run_id),
            )
        })
        .collect()
}
