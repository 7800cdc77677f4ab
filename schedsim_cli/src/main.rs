//! SchedSim CLI
//!
//! Runs the deterministic scheduling engine from the command line:
//! CPU traces with Gantt charts and timing metrics, disk head paths
//! with seek totals, and the six-way disk algorithm comparison.

mod report;
mod workloads;

use clap::{Parser, Subcommand, ValueEnum};
use schedsim_core::{
    compare_all, simulate, CpuAlgorithm, CpuWorkload, Direction, DiskAlgorithm, DiskWorkload,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;
use workloads::{random_workload, CpuPreset, DiskPreset};

/// Deterministic CPU and disk scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "sched-sim")]
#[command(about = "Simulate CPU and disk scheduling algorithms", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON output for machine consumption
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a CPU scheduling simulation
    Cpu {
        /// Scheduling algorithm
        #[arg(short, long, value_enum)]
        algorithm: CpuAlgorithmArg,

        /// Time quantum for round-robin
        #[arg(short, long, default_value = "2")]
        quantum: u64,

        /// JSON file holding a process list
        #[arg(short, long, conflicts_with_all = ["preset", "random"])]
        workload: Option<PathBuf>,

        /// Bundled workload name (see `presets`)
        #[arg(short, long, conflicts_with = "random")]
        preset: Option<CpuPreset>,

        /// Generate N random processes instead
        #[arg(long)]
        random: Option<usize>,

        /// Seed for --random
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run a disk-head scheduling simulation
    Disk {
        /// Scheduling algorithm
        #[arg(short, long)]
        algorithm: DiskAlgorithm,

        /// Comma-separated track requests
        #[arg(short, long, conflicts_with = "preset")]
        requests: Option<String>,

        /// Initial head position
        #[arg(short, long, requires = "requests")]
        start: Option<u32>,

        /// Highest track number. Deliberately no default: callers must
        /// agree on the domain size explicitly.
        #[arg(short, long, requires = "requests")]
        max_track: Option<u32>,

        /// Sweep direction for SCAN and LOOK
        #[arg(short, long, value_enum, default_value = "up")]
        direction: DirectionArg,

        /// Bundled workload name (see `presets`)
        #[arg(short, long)]
        preset: Option<DiskPreset>,

        /// Run all six algorithms and compare seek counts
        #[arg(long)]
        compare: bool,
    },

    /// List bundled example workloads
    Presets,
}

/// CPU algorithm selector (quantum supplied separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CpuAlgorithmArg {
    Fcfs,
    Sjf,
    Srtf,
    Priority,
    #[value(alias = "priority-p")]
    PriorityPreemptive,
    #[value(alias = "rr")]
    RoundRobin,
}

impl CpuAlgorithmArg {
    fn to_algorithm(self, quantum: u64) -> CpuAlgorithm {
        match self {
            CpuAlgorithmArg::Fcfs => CpuAlgorithm::Fcfs,
            CpuAlgorithmArg::Sjf => CpuAlgorithm::Sjf,
            CpuAlgorithmArg::Srtf => CpuAlgorithm::Srtf,
            CpuAlgorithmArg::Priority => CpuAlgorithm::PriorityNonPreemptive,
            CpuAlgorithmArg::PriorityPreemptive => CpuAlgorithm::PriorityPreemptive,
            CpuAlgorithmArg::RoundRobin => CpuAlgorithm::RoundRobin { quantum },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(err) = run(args) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Command::Cpu {
            algorithm,
            quantum,
            workload,
            preset,
            random,
            seed,
        } => run_cpu(algorithm, quantum, workload, preset, random, seed, args.json),
        Command::Disk {
            algorithm,
            requests,
            start,
            max_track,
            direction,
            preset,
            compare,
        } => run_disk(
            algorithm,
            requests,
            start,
            max_track,
            direction.into(),
            preset,
            compare,
            args.json,
        ),
        Command::Presets => list_presets(args.json),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cpu(
    algorithm: CpuAlgorithmArg,
    quantum: u64,
    workload_path: Option<PathBuf>,
    preset: Option<CpuPreset>,
    random: Option<usize>,
    seed: u64,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let workload: CpuWorkload = if let Some(path) = workload_path {
        let text = fs::read_to_string(&path)?;
        let workload = serde_json::from_str(&text)?;
        info!("Loaded workload from {}", path.display());
        workload
    } else if let Some(count) = random {
        info!("Generated {} random processes (seed={})", count, seed);
        random_workload(count, seed)
    } else {
        let preset = preset.unwrap_or(CpuPreset::Basic);
        debug!("Using preset workload '{}'", preset);
        preset.workload()
    };

    let algorithm = algorithm.to_algorithm(quantum);
    let result = simulate(&workload, algorithm)?;

    if json {
        let payload = serde_json::json!({
            "algorithm": algorithm.name(),
            "segments": result.segments,
            "metrics": result.metrics.per_process,
            "averages": {
                "turnaround": result.metrics.avg_turnaround(),
                "waiting": result.metrics.avg_waiting(),
                "response": result.metrics.avg_response(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        report::print_cpu(&algorithm, &workload, &result);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_disk(
    algorithm: DiskAlgorithm,
    requests: Option<String>,
    start: Option<u32>,
    max_track: Option<u32>,
    direction: Direction,
    preset: Option<DiskPreset>,
    compare: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let workload = if let Some(preset) = preset {
        debug!("Using preset workload '{}'", preset);
        preset.workload()
    } else {
        let requests = requests.ok_or("provide --requests/--start/--max-track or --preset")?;
        let start = start.ok_or("--start is required with --requests")?;
        let max_track =
            max_track.ok_or("--max-track is required with --requests (it has no default)")?;
        DiskWorkload::new(parse_requests(&requests)?, start, max_track)?
    };

    if compare {
        let comparison = compare_all(&workload, direction);
        if json {
            let payload = serde_json::json!({
                "comparison": comparison.entries,
                "best": comparison.best(),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else {
            report::print_comparison(&workload, &comparison);
        }
        return Ok(());
    }

    let result = algorithm.schedule(&workload, direction);

    if json {
        let payload = serde_json::json!({
            "algorithm": algorithm.name(),
            "path": result.path,
            "seek_count": result.seek_count,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        report::print_disk(algorithm, &workload, &result);
    }

    Ok(())
}

fn parse_requests(input: &str) -> Result<Vec<u32>, Box<dyn Error>> {
    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid track request: '{}'", part.trim()).into())
        })
        .collect()
}

fn list_presets(json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        let payload = serde_json::json!({
            "cpu": CpuPreset::all()
                .iter()
                .map(|p| serde_json::json!({ "name": p.name(), "description": p.description() }))
                .collect::<Vec<_>>(),
            "disk": DiskPreset::all()
                .iter()
                .map(|p| serde_json::json!({ "name": p.name(), "description": p.description() }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("CPU presets:");
    for preset in CpuPreset::all() {
        println!("  {:<14} {}", preset.name(), preset.description());
    }
    println!();
    println!("Disk presets:");
    for preset in DiskPreset::all() {
        println!("  {:<14} {}", preset.name(), preset.description());
    }
    Ok(())
}
