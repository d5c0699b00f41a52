use crate::metrics::RunMetrics;
use crate::parameters::ParameterSet;

use super::writer_utils::{ensure_paired, opt_to_string};

const HEADER: [&str; 23] = [
    "experiment_id",
    "run_id",
    "seed",
    "station_count",
    "schedule_rules",
    "reneging_threshold_secs",
    "closing_policy",
    "total_customers",
    "gross_arrivals",
    "served",
    "abandoned",
    "reneged",
    "abandoned_in_service",
    "abandoned_at_close",
    "in_service_at_close",
    "abandonment_rate",
    "station_cost",
    "abandonment_cost",
    "total_cost",
    "min_wait_secs",
    "max_wait_secs",
    "min_service_secs",
    "max_service_secs",
];

pub(crate) fn export_to_csv_impl(
    results: &[RunMetrics],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_paired(results, parameter_sets)?;

    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(HEADER)?;

    for (result, params) in results.iter().zip(parameter_sets) {
        let config = &params.config;
        wtr.write_record([
            params.experiment_id.clone(),
            params.run_id.to_string(),
            params.seed.to_string(),
            config.station_count.to_string(),
            config.arrival_rules.rules().len().to_string(),
            config.reneging_threshold_secs.to_string(),
            config.closing_policy.name().to_string(),
            result.total_customers.to_string(),
            result.gross_arrivals.to_string(),
            result.served.to_string(),
            result.abandoned.to_string(),
            result.reneged.to_string(),
            result.abandoned_in_service.to_string(),
            result.abandoned_at_close.to_string(),
            result.in_service_at_close.to_string(),
            result.abandonment_rate.to_string(),
            result.station_cost.to_string(),
            result.abandonment_cost.to_string(),
            result.total_cost.to_string(),
            opt_to_string(result.min_wait_secs),
            opt_to_string(result.max_wait_secs),
            opt_to_string(result.min_service_secs),
            opt_to_string(result.max_service_secs),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
