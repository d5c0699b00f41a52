//! Result export and analysis utilities.
//!
//! Exports experiment results to JSON and CSV, and finds the cheapest
//! configuration by total operating cost.

use std::path::Path;

use crate::metrics::{RunMetrics, StationSummary};
use crate::parameters::ParameterSet;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/ranking.rs"]
mod ranking;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export run metrics to a JSON array.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(results: &[RunMetrics], path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Export per-station-count summaries to a JSON array.
pub fn export_summary_to_json(
    summary: &[StationSummary],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(summary)?;
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(summary, file)
}

/// Export run metrics with their parameters to CSV.
///
/// Parameters and results are paired by index (results[i] corresponds to parameter_sets[i]).
///
/// # Errors
///
/// Returns an error if there are no results, the lengths differ, or writing fails.
pub fn export_to_csv(
    results: &[RunMetrics],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    writer_utils::ensure_paired(results, parameter_sets)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// The parameter set whose run had the lowest operating cost.
///
/// Returns `None` if inputs are empty or mismatched.
pub fn find_best_parameters<'a>(
    results: &[RunMetrics],
    parameter_sets: &'a [ParameterSet],
) -> Option<&'a ParameterSet> {
    ranking::find_best_parameters_impl(results, parameter_sets)
}

/// Index of the cheapest result.
pub fn find_best_result_index(results: &[RunMetrics]) -> Option<usize> {
    ranking::find_cheapest_index(results)
}
