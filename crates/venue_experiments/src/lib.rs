//! Parallel experimentation framework for venue station-count sweeps.
//!
//! Runs many venue simulations in parallel with varying parameters, flattens
//! their results into metrics and finds the configuration with the lowest
//! operating cost.
//!
//! # Quick Start
//!
//! ```no_run
//! use venue_experiments::{find_best_parameters, run_parallel_experiments, ParameterSpace};
//!
//! let space = ParameterSpace::grid()
//!     .station_counts((1..=10).collect())
//!     .replications(5);
//! let parameter_sets = space.generate();
//! let results = run_parallel_experiments(parameter_sets.clone(), None)?;
//! let best = find_best_parameters(&results, &parameter_sets);
//! # Ok::<(), venue_experiments::ExperimentError>(())
//! ```
//!
//! - [`parameters`]: parameter variation (grid search, random sampling)
//! - [`runner`]: parallel execution using rayon
//! - [`metrics`]: per-run metrics and per-station-count summaries
//! - [`export`]: JSON/CSV export and cost ranking

pub mod error;
pub mod export;
pub mod metrics;
pub mod parameter_spaces;
pub mod parameters;
pub mod runner;

pub use error::ExperimentError;
pub use export::{
    export_summary_to_json, export_to_csv, export_to_json, find_best_parameters, find_best_result_index,
};
pub use metrics::{extract_metrics, summarize_by_station_count, RunMetrics, StationSummary};
pub use parameters::{ParameterSet, ParameterSpace};
pub use runner::{run_parallel_experiments, run_parallel_experiments_with_progress, run_single_simulation};
