use crate::metrics::RunMetrics;
use crate::parameters::ParameterSet;

/// Cheapest run; ties go to fewer stations, then to the earlier run.
pub(crate) fn find_cheapest_index(results: &[RunMetrics]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .min_by_key(|(idx, r)| (r.total_cost, r.station_count, *idx))
        .map(|(idx, _)| idx)
}

pub(crate) fn find_best_parameters_impl<'a>(
    results: &[RunMetrics],
    parameter_sets: &'a [ParameterSet],
) -> Option<&'a ParameterSet> {
    if results.len() != parameter_sets.len() {
        return None;
    }
    find_cheapest_index(results).map(|idx| &parameter_sets[idx])
}
