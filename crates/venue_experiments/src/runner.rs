//! Parallel simulation runner using rayon.
//!
//! Executes multiple venue simulations in parallel, one per parameter set.
//! Runs are independent; each builds its own world from its config.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::ExperimentError;
use crate::metrics::{extract_metrics, RunMetrics};
use crate::parameters::ParameterSet;

/// Run a single simulation to close and extract its metrics.
pub fn run_single_simulation(params: &ParameterSet) -> Result<RunMetrics, ExperimentError> {
    let config = params.venue_config();
    let result = venue_core::run(&config).map_err(|source| ExperimentError::Config {
        experiment_id: params.experiment_id.clone(),
        run_id: params.run_id,
        source,
    })?;
    debug!(
        experiment = %params.experiment_id,
        run = params.run_id,
        stations = result.station_count,
        cost = result.cost(),
        "run finished"
    );
    Ok(extract_metrics(&result))
}

/// Run multiple simulations in parallel.
///
/// Results are returned in the same order as `parameter_sets`. The first
/// failing run aborts the batch.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
) -> Result<Vec<RunMetrics>, ExperimentError> {
    run_parallel_experiments_with_progress(parameter_sets, num_threads, false)
}

/// Run multiple simulations in parallel with an optional progress bar.
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<RunMetrics>, ExperimentError> {
    let total = parameter_sets.len();
    info!(runs = total, threads = ?num_threads, "starting experiment batch");

    let progress = if show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|params| {
                let result = run_single_simulation(params);
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>, _>>()
    });

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpace;
    use venue_core::VenueConfig;

    fn short_day() -> VenueConfig {
        VenueConfig::default().with_hours(8, 9)
    }

    #[test]
    fn test_run_single_simulation() {
        let sets = ParameterSpace::grid().base(short_day()).base_seed(11).generate();
        let metrics = run_single_simulation(&sets[0]).unwrap();
        assert_eq!(metrics.station_count, 1);
        assert_eq!(metrics, run_single_simulation(&sets[0]).unwrap());
    }

    #[test]
    fn test_parallel_results_keep_input_order() {
        let sets = ParameterSpace::grid()
            .base(short_day())
            .station_counts(vec![3, 1, 2])
            .generate();
        let results = run_parallel_experiments(sets, Some(2)).unwrap();
        let stations: Vec<usize> = results.iter().map(|r| r.station_count).collect();
        assert_eq!(stations, vec![3, 1, 2]);
    }

    #[test]
    fn test_invalid_config_fails_the_batch() {
        let sets = ParameterSpace::grid()
            .base(short_day())
            .station_counts(vec![1, 0])
            .generate();
        let err = run_parallel_experiments(sets, Some(1)).unwrap_err();
        assert!(matches!(err, ExperimentError::Config { run_id: 0, .. }));
    }
}
