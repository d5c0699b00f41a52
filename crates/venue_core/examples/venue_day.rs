//! Run one 08:00-12:00 day with three stations and print the report.
//!
//! Run with: cargo run -p venue_core --example venue_day

use bevy_ecs::prelude::World;
use venue_core::clock::{format_clock, format_duration};
use venue_core::runner::{close_venue, extract_result, run_until_close, tick_schedule};
use venue_core::scenario::{build_venue, VenueConfig};

fn main() {
    const STATIONS: usize = 3;

    let mut world = World::new();
    let config = VenueConfig::default()
        .with_stations(STATIONS)
        .with_seed(123)
        .with_series(true);
    if let Err(err) = build_venue(&mut world, &config) {
        eprintln!("invalid config: {err}");
        return;
    }

    let mut schedule = tick_schedule();
    let ticks = run_until_close(&mut world, &mut schedule);
    let closing = close_venue(&mut world);
    let result = extract_result(&world);

    println!("--- Venue day ({STATIONS} stations, seed 123) ---");
    println!("Ticks executed: {ticks}");
    println!("Queued at close: {}", closing.queued_abandoned);
    println!("{result}");

    if let Some(series) = &result.series {
        const SAMPLE: usize = 10;
        println!("\nFirst {SAMPLE} completed customers:");
        for (i, record) in series.completed.iter().take(SAMPLE).enumerate() {
            println!(
                "  {}  arrived={}  started={}  left={}  in venue {}",
                i + 1,
                format_clock(record.arrival_tick),
                format_clock(record.service_started_at),
                format_clock(record.departure_tick),
                format_duration(record.wait_secs() as f64),
            );
        }
    }
}
