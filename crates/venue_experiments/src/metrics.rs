//! Metrics extraction from venue simulation results.
//!
//! Flattens a [SimulationResult] into a serializable row and aggregates
//! replications per station count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use venue_core::SimulationResult;

use crate::parameters::ParameterSet;

/// One run's outcome, flat enough for CSV and JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub station_count: usize,
    pub total_customers: u64,
    pub gross_arrivals: u64,
    pub served: u64,
    pub abandoned: u64,
    pub reneged: u64,
    pub abandoned_in_service: u64,
    pub abandoned_at_close: u64,
    pub in_service_at_close: u64,
    /// Abandoned / total customers; 0 when nobody arrived.
    pub abandonment_rate: f64,
    pub station_cost: u64,
    pub abandonment_cost: u64,
    pub total_cost: u64,
    pub min_service_secs: Option<f64>,
    pub max_service_secs: Option<f64>,
    pub min_wait_secs: Option<f64>,
    pub max_wait_secs: Option<f64>,
}

/// Extract metrics from a finished simulation.
pub fn extract_metrics(result: &SimulationResult) -> RunMetrics {
    let abandonment_rate = if result.total_customers > 0 {
        result.abandoned_count as f64 / result.total_customers as f64
    } else {
        0.0
    };

    RunMetrics {
        station_count: result.station_count,
        total_customers: result.total_customers,
        gross_arrivals: result.gross_arrivals,
        served: result.served_count,
        abandoned: result.abandoned_count,
        reneged: result.reneged_count,
        abandoned_in_service: result.abandoned_in_service,
        abandoned_at_close: result.abandoned_at_close,
        in_service_at_close: result.in_service_at_close,
        abandonment_rate,
        station_cost: result.cost.station_cost,
        abandonment_cost: result.cost.abandonment_cost,
        total_cost: result.cost.total,
        min_service_secs: result.service_time.min_opt(),
        max_service_secs: result.service_time.max_opt(),
        min_wait_secs: result.wait_time.min_opt(),
        max_wait_secs: result.wait_time.max_opt(),
    }
}

/// Replication averages for one station count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station_count: usize,
    pub runs: usize,
    pub mean_served: f64,
    pub mean_abandoned: f64,
    pub mean_cost: f64,
    pub min_cost: u64,
    pub max_cost: u64,
}

/// Average results per station count, ordered by station count.
///
/// Results and parameter sets are paired by index; extra entries on either
/// side are ignored.
pub fn summarize_by_station_count(
    results: &[RunMetrics],
    parameter_sets: &[ParameterSet],
) -> Vec<StationSummary> {
    let mut groups: BTreeMap<usize, Vec<&RunMetrics>> = BTreeMap::new();
    for (result, params) in results.iter().zip(parameter_sets) {
        groups.entry(params.station_count()).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(station_count, runs)| {
            let n = runs.len() as f64;
            let mean = |f: fn(&RunMetrics) -> u64| runs.iter().map(|r| f(r) as f64).sum::<f64>() / n;
            StationSummary {
                station_count,
                runs: runs.len(),
                mean_served: mean(|r| r.served),
                mean_abandoned: mean(|r| r.abandoned),
                mean_cost: mean(|r| r.total_cost),
                min_cost: runs.iter().map(|r| r.total_cost).min().unwrap_or(0),
                max_cost: runs.iter().map(|r| r.total_cost).max().unwrap_or(0),
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn sample_metrics(station_count: usize, abandoned: u64) -> RunMetrics {
    let cost = venue_core::cost::CostModel::default().breakdown(station_count, abandoned);
    RunMetrics {
        station_count,
        total_customers: 100,
        gross_arrivals: 0,
        served: 100 - abandoned,
        abandoned,
        reneged: abandoned,
        abandoned_in_service: 0,
        abandoned_at_close: 0,
        in_service_at_close: 0,
        abandonment_rate: abandoned as f64 / 100.0,
        station_cost: cost.station_cost,
        abandonment_cost: cost.abandonment_cost,
        total_cost: cost.total,
        min_service_secs: Some(30.0),
        max_service_secs: Some(900.0),
        min_wait_secs: Some(0.0),
        max_wait_secs: Some(1_500.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpace;

    #[test]
    fn test_extract_metrics_from_run() {
        let config = venue_core::VenueConfig::default().with_stations(2).with_seed(3);
        let result = venue_core::run(&config).unwrap();
        let metrics = extract_metrics(&result);

        assert_eq!(metrics.station_count, 2);
        assert_eq!(metrics.total_cost, result.cost());
        assert_eq!(
            metrics.served + metrics.abandoned + metrics.in_service_at_close,
            metrics.total_customers
        );
        assert!((0.0..=1.0).contains(&metrics.abandonment_rate));
    }

    #[test]
    fn test_summary_averages_replications() {
        let sets = ParameterSpace::grid()
            .station_counts(vec![1, 2])
            .replications(2)
            .generate();
        let results = vec![
            sample_metrics(1, 10),
            sample_metrics(1, 20),
            sample_metrics(2, 4),
            sample_metrics(2, 6),
        ];

        let summary = summarize_by_station_count(&results, &sets);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].station_count, 1);
        assert_eq!(summary[0].runs, 2);
        assert_eq!(summary[0].mean_abandoned, 15.0);
        assert_eq!(summary[0].mean_cost, 1_000.0 + 150_000.0);
        assert_eq!(summary[1].min_cost, 2_000 + 40_000);
        assert_eq!(summary[1].max_cost, 2_000 + 60_000);
    }
}
