//! Sweep the station count and report the cheapest venue.
//!
//! Runs every station count from one to ten over several seeds, prints the
//! per-count averages and writes `station_sweep.csv` / `station_sweep.json`.

use venue_experiments::parameter_spaces::station_sweep_space;
use venue_experiments::{
    export_summary_to_json, export_to_csv, find_best_parameters, run_parallel_experiments_with_progress,
    summarize_by_station_count,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let parameter_sets = station_sweep_space().base_seed(2024).generate();
    println!("Running {} simulations...", parameter_sets.len());

    let results = run_parallel_experiments_with_progress(parameter_sets.clone(), None, true)?;

    println!("\nstations  runs  served  abandoned      mean cost");
    let summary = summarize_by_station_count(&results, &parameter_sets);
    for row in &summary {
        println!(
            "{:>8}  {:>4}  {:>6.1}  {:>9.1}  {:>13.0}",
            row.station_count, row.runs, row.mean_served, row.mean_abandoned, row.mean_cost
        );
    }

    if let Some(best) = find_best_parameters(&results, &parameter_sets) {
        println!(
            "\nCheapest single run: {} stations ({} run {}, seed {})",
            best.station_count(),
            best.experiment_id,
            best.run_id,
            best.seed
        );
    }
    if let Some(best) = summary
        .iter()
        .min_by(|a, b| a.mean_cost.total_cmp(&b.mean_cost))
    {
        println!("Cheapest on average: {} stations (${:.0})", best.station_count, best.mean_cost);
    }

    export_to_csv(&results, &parameter_sets, "station_sweep.csv")?;
    export_summary_to_json(&summary, "station_sweep.json")?;
    println!("Wrote station_sweep.csv and station_sweep.json");
    Ok(())
}
