use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use venue_core::patterns::ArrivalSchedule;
use venue_core::render::{render_simulation, RenderOptions};
use venue_core::telemetry::VenueSnapshots;
use venue_core::telemetry_export::write_run_parquet;
use venue_core::{ClosingPolicy, VenueConfig, VenueSimulation};
use venue_experiments::parameter_spaces::MAX_STATIONS;

mod dashboard;

use dashboard::TerminalSink;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "venue", about = "Service venue queueing simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one day and print the results
    Run(RunArgs),
    /// Sweep the station count and report the cheapest venue
    Sweep(SweepArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Number of service stations
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=MAX_STATIONS as i64))]
    stations: u8,
    /// Animation speed: 1 = 5 fps, 2 = 15 fps, 3 = 30 fps
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    speed: u8,
    /// Random seed; omitted means OS entropy
    #[arg(long, env = "VENUE_SEED")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = ScheduleArg::Bell)]
    schedule: ScheduleArg,
    /// What happens to customers still at a station at close
    #[arg(long, value_enum, default_value_t = ClosingArg::ForceAbandon)]
    closing: ClosingArg,
    /// Skip the dashboard and only print the results
    #[arg(long)]
    no_render: bool,
    /// Write Parquet telemetry into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Keep per-customer timestamps (exported with --export-dir)
    #[arg(long)]
    series: bool,
}

#[derive(clap::Args)]
struct SweepArgs {
    /// Seeds per station count
    #[arg(long, default_value_t = 5)]
    replications: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = ScheduleArg::Bell)]
    schedule: ScheduleArg,
    /// Worker threads; defaults to all cores
    #[arg(long)]
    threads: Option<usize>,
    /// Write per-run metrics as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScheduleArg {
    Uniform,
    Bell,
    BellGross,
    Gaussian,
    BellGaussianGross,
}

impl From<ScheduleArg> for ArrivalSchedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Uniform => ArrivalSchedule::Uniform,
            ScheduleArg::Bell => ArrivalSchedule::Bell,
            ScheduleArg::BellGross => ArrivalSchedule::BellWithGross,
            ScheduleArg::Gaussian => ArrivalSchedule::Gaussian,
            ScheduleArg::BellGaussianGross => ArrivalSchedule::BellWithGaussianGross,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ClosingArg {
    ForceAbandon,
    FinishService,
    LeaveInService,
}

impl From<ClosingArg> for ClosingPolicy {
    fn from(arg: ClosingArg) -> Self {
        match arg {
            ClosingArg::ForceAbandon => ClosingPolicy::ForceAbandon,
            ClosingArg::FinishService => ClosingPolicy::FinishService,
            ClosingArg::LeaveInService => ClosingPolicy::LeaveInService,
        }
    }
}

/// Frames per second for a speed selector.
fn speed_to_fps(speed: u8) -> u32 {
    match speed {
        1 => 5,
        2 => 15,
        _ => 30,
    }
}

// ── Commands ───────────────────────────────────────────────────────

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn run_day(args: RunArgs) -> CliResult {
    let mut config = VenueConfig::default()
        .with_stations(usize::from(args.stations))
        .with_schedule(args.schedule.into())
        .with_closing_policy(args.closing.into())
        .with_series(args.series);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let sim = VenueSimulation::new(&config)?;
    let mut sim = if args.no_render {
        let mut sim = sim;
        sim.run_to_close();
        sim
    } else {
        let options = RenderOptions::from_fps(speed_to_fps(args.speed));
        render_simulation(sim, options, &mut TerminalSink::stdout())?
    };

    let result = sim.result();
    println!("{result}");

    if let Some(dir) = args.export_dir {
        std::fs::create_dir_all(&dir)?;
        let snapshots = sim.world().resource::<VenueSnapshots>();
        write_run_parquet(&dir, &result, snapshots)?;
        info!(dir = %dir.display(), "telemetry exported");
    }
    Ok(())
}

fn sweep(args: SweepArgs) -> CliResult {
    use venue_experiments::{
        export_to_csv, find_best_parameters, run_parallel_experiments_with_progress,
        summarize_by_station_count, ParameterSpace,
    };

    let parameter_sets = ParameterSpace::grid()
        .base(VenueConfig::default().with_schedule(args.schedule.into()))
        .station_counts((1..=MAX_STATIONS).collect())
        .replications(args.replications)
        .base_seed(args.seed)
        .generate();

    let results = run_parallel_experiments_with_progress(parameter_sets.clone(), args.threads, true)?;

    println!("stations  runs  served  abandoned      mean cost");
    for row in summarize_by_station_count(&results, &parameter_sets) {
        println!(
            "{:>8}  {:>4}  {:>6.1}  {:>9.1}  {:>13.0}",
            row.station_count, row.runs, row.mean_served, row.mean_abandoned, row.mean_cost
        );
    }
    if let Some(best) = find_best_parameters(&results, &parameter_sets) {
        println!("Cheapest run: {} stations (seed {})", best.station_count(), best.seed);
    }

    if let Some(path) = args.csv {
        export_to_csv(&results, &parameter_sets, &path)?;
        info!(path = %path.display(), "sweep exported");
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run(args) => run_day(args),
        Commands::Sweep(args) => sweep(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn speed_selects_frame_rate() {
        assert_eq!(speed_to_fps(1), 5);
        assert_eq!(speed_to_fps(2), 15);
        assert_eq!(speed_to_fps(3), 30);
    }

    #[test]
    fn station_count_is_bounded() {
        assert!(Cli::try_parse_from(["venue", "run", "--stations", "10"]).is_ok());
        assert!(Cli::try_parse_from(["venue", "run", "--stations", "0"]).is_err());
        assert!(Cli::try_parse_from(["venue", "run", "--stations", "11"]).is_err());
        assert!(Cli::try_parse_from(["venue", "run", "--speed", "4"]).is_err());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "venue", "run", "--stations", "3", "--schedule", "bell-gross", "--closing",
            "finish-service", "--no-render", "--seed", "7",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.stations, 3);
        assert_eq!(args.seed, Some(7));
        assert!(args.no_render);
        assert_eq!(ArrivalSchedule::from(args.schedule), ArrivalSchedule::BellWithGross);
        assert_eq!(ClosingPolicy::from(args.closing), ClosingPolicy::FinishService);
    }
}
