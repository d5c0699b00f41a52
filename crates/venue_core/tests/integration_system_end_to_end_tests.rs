use venue_core::clock::SECS_PER_HOUR;
use venue_core::cost::operating_cost;
use venue_core::distributions::ServiceTimeConfig;
use venue_core::patterns::ArrivalSchedule;
use venue_core::runner::{run, VenueSimulation};
use venue_core::scenario::{ClosingPolicy, VenueConfig};

fn day(stations: usize, seed: u64) -> VenueConfig {
    VenueConfig::default()
        .with_stations(stations)
        .with_seed(seed)
        .with_series(true)
}

#[test]
fn every_customer_is_accounted_for_under_each_closing_policy() {
    for policy in [
        ClosingPolicy::ForceAbandon,
        ClosingPolicy::FinishService,
        ClosingPolicy::LeaveInService,
    ] {
        for seed in [1, 2, 3] {
            let result = run(&day(2, seed).with_closing_policy(policy)).expect("valid config");
            assert!(result.is_conserved(), "{policy:?} seed {seed}: {result:?}");
            assert_eq!(
                result.abandoned_count,
                result.reneged_count + result.abandoned_in_service + result.abandoned_at_close
            );
            if policy != ClosingPolicy::LeaveInService {
                assert_eq!(result.in_service_at_close, 0);
                assert_eq!(result.served_count + result.abandoned_count, result.total_customers);
            }
        }
    }
}

#[test]
fn same_seed_same_day() {
    let first = run(&day(3, 99)).expect("valid config");
    let second = run(&day(3, 99)).expect("valid config");
    assert_eq!(first, second);
    assert!(first.total_customers > 0);
}

#[test]
fn cost_combines_stations_and_abandonments() {
    for stations in [1, 3, 10] {
        let result = run(&day(stations, 5)).expect("valid config");
        assert_eq!(result.cost(), operating_cost(stations, result.abandoned_count));
        assert_eq!(result.cost.station_cost, stations as u64 * 1_000);
        assert_eq!(result.cost.abandonment_cost, result.abandoned_count * 10_000);
    }
}

#[test]
fn more_stations_lose_fewer_customers() {
    let one = run(&day(1, 17)).expect("valid config");
    let ten = run(&day(10, 17)).expect("valid config");
    assert!(one.abandoned_count > ten.abandoned_count);
}

#[test]
fn sampled_service_times_are_never_negative() {
    let config = day(2, 4).with_service_time(ServiceTimeConfig::Normal {
        mean_secs: 0.0,
        std_dev_secs: 300.0,
    });
    let result = run(&config).expect("valid config");
    let series = result.series.expect("series recorded");
    assert!(!series.service_secs.is_empty());
    assert!(series.service_secs.iter().all(|secs| *secs >= 0.0));
    assert!(result.service_time.min() >= 0.0);
}

#[test]
fn arrivals_by_hour_cover_the_window() {
    let result = run(&day(2, 8)).expect("valid config");
    let total: u64 = result.arrivals_by_hour.values().sum();
    assert_eq!(total, result.total_customers);
    assert!(result
        .arrivals_by_hour
        .keys()
        .all(|hour| (8..12).contains(hour)));
    let series = result.series.expect("series recorded");
    assert_eq!(series.arrival_ticks.len() as u64, result.total_customers);
}

#[test]
fn uniform_day_averages_one_arrival_every_144_seconds() {
    let mut total = 0;
    for seed in 0..10 {
        let config = day(3, seed).with_schedule(ArrivalSchedule::Uniform);
        total += run(&config).expect("valid config").total_customers;
    }
    // 14 400 ticks at p = 1/144 is 100 expected arrivals per day.
    let mean = total as f64 / 10.0;
    assert!((80.0..120.0).contains(&mean), "mean arrivals {mean}");
}

#[test]
fn gross_stream_stays_out_of_the_ledger() {
    let config = day(2, 21).with_schedule(ArrivalSchedule::BellWithGross);
    let result = run(&config).expect("valid config");
    assert!(result.gross_arrivals > 0);
    assert!(result.is_conserved());

    let plain = run(&day(2, 21)).expect("valid config");
    assert_eq!(plain.gross_arrivals, 0);
}

#[test]
fn stepping_matches_a_full_run() {
    let config = day(2, 33).with_hours(9, 10);
    let mut sim = VenueSimulation::new(&config).expect("valid config");
    let mut ticks = 0;
    while sim.step() {
        ticks += 1;
    }
    assert_eq!(ticks, SECS_PER_HOUR);
    assert_eq!(sim.result(), run(&config).expect("valid config"));
}

#[test]
fn report_lists_the_headline_figures() {
    let result = run(&day(3, 2)).expect("valid config");
    let report = result.to_string();
    assert!(report.contains("Service stations: 3"));
    assert!(report.contains(&format!("Customers served: {}", result.served_count)));
    assert!(report.contains(&format!("Operating cost: ${}", result.cost())));
    assert!(report.starts_with("Simulation results (08:00 - 12:00)"));
}
