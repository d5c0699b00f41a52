//! Performance benchmarks for venue_core using Criterion.rs.

use bevy_ecs::prelude::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use venue_core::distributions::ServiceTimeConfig;
use venue_core::patterns::ArrivalSchedule;
use venue_core::runner::{close_venue, run_until_close, tick_schedule};
use venue_core::scenario::{build_venue, VenueConfig};

fn bench_full_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_day");
    for stations in [1usize, 3, 10] {
        group.bench_with_input(
            BenchmarkId::from_parameter(stations),
            &stations,
            |b, &stations| {
                b.iter(|| {
                    let mut world = World::new();
                    let config = VenueConfig::default()
                        .with_stations(stations)
                        .with_seed(42);
                    build_venue(&mut world, &config).expect("valid config");
                    let mut schedule = tick_schedule();
                    black_box(run_until_close(&mut world, &mut schedule));
                    black_box(close_venue(&mut world));
                });
            },
        );
    }
    group.finish();
}

fn bench_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrival_schedules");
    for schedule in [
        ArrivalSchedule::Uniform,
        ArrivalSchedule::Bell,
        ArrivalSchedule::BellWithGross,
        ArrivalSchedule::Gaussian,
        ArrivalSchedule::BellWithGaussianGross,
    ] {
        group.bench_function(schedule.name(), |b| {
            b.iter(|| {
                let config = VenueConfig::default()
                    .with_stations(3)
                    .with_schedule(schedule)
                    .with_seed(7);
                black_box(venue_core::run(&config).expect("valid config"));
            });
        });
    }
    group.finish();
}

fn bench_service_sampling(c: &mut Criterion) {
    let dist = ServiceTimeConfig::default().build().expect("default distribution");
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("service_sample_10k", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for _ in 0..10_000 {
                total += dist.sample_secs(&mut rng);
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_full_day, bench_schedules, bench_service_sampling);
criterion_main!(benches);
