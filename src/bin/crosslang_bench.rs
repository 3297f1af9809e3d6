use clap::{Parser, Subcommand, ValueEnum};
use crosslang_bench::compare;
use crosslang_bench::harness::{BenchConfig, Profile};
use crosslang_bench::heap::TrackingAllocator;
use crosslang_bench::output;
use crosslang_bench::schema::Report;
use crosslang_bench::suite;
use crosslang_bench::sysinfo;
use crosslang_bench::{BenchError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Quick,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Quick => Profile::Quick,
            ProfileArg::Full => Profile::Full,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the seven workloads in order and write a JSON report.
    Run {
        /// Directory for `benchmark_<label>_<timestamp>.json`. Ignored when `--out` is set.
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Cap for the memory allocation workload; it shrinks or skips itself to fit.
        #[arg(long, value_name = "MB")]
        memory_budget_mb: Option<u64>,

        /// Also print the JSON report to stdout.
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },

    /// Compare the newest report of each implementation found under the inputs.
    Compare {
        /// Directory to search for `benchmark_*.json`. Can be provided multiple times.
        #[arg(
            short,
            long,
            value_name = "DIR",
            num_args = 1..,
            action = clap::ArgAction::Append,
            default_value = "."
        )]
        input: Vec<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "crosslang-bench")]
#[command(about = "Single-shot CPU/memory workload suite (JSON output)")]
struct Args {
    #[arg(long, value_enum, default_value_t = ProfileArg::Full, global = true)]
    profile: ProfileArg,

    /// Seed every workload generator; unseeded runs draw from OS entropy.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Implementation label recorded in the report and its file name.
    #[arg(long, default_value = "rust", global = true, value_parser = output::parse_label)]
    label: String,

    /// Exact path for the JSON output (report or comparison).
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn run_benchmarks(
    args: &Args,
    out_dir: &Path,
    memory_budget_mb: Option<u64>,
    stdout: bool,
) -> Result<()> {
    let cfg = BenchConfig {
        profile: args.profile.into(),
        seed: args.seed,
        memory_budget_bytes: memory_budget_mb.map(|mb| mb.saturating_mul(1024 * 1024)),
    };
    if cfg.seed.is_none() {
        tracing::info!("workload generators are unseeded");
    }

    let run = suite::run_suite(&cfg);
    let started_at = run.started_at;

    println!("\n{}", output::render_results(&run.results));

    let total = run.total;
    let report = Report::assemble(args.label.as_str(), &cfg, sysinfo::collect(), run);

    if stdout {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let path = match &args.out {
        Some(path) => {
            output::write_report_to(path, &report)?;
            path.clone()
        }
        None => output::write_report(out_dir, &report, &started_at)?,
    };

    println!("Results saved to: {}", path.display());
    println!("Total execution time: {:.3} seconds", total.as_secs_f64());
    Ok(())
}

fn run_compare(args: &Args, input: &[PathBuf]) -> Result<()> {
    let files = compare::discover_reports(input)?;
    eprintln!("Found benchmark files:");
    for file in &files {
        eprintln!("  {}", file.display());
    }

    let reports = compare::load_reports(&files);
    if reports.is_empty() {
        return Err(BenchError::NoReports);
    }

    let comparison = compare::compare_reports(&reports);
    println!("{}", compare::render_comparison(&comparison));

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| compare::comparison_path(Path::new(".")));
    let json = serde_json::to_string_pretty(&comparison)?;
    fs::write(&path, json).map_err(|source| BenchError::Write {
        path: path.clone(),
        source,
    })?;
    println!("Comparison saved to: {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let outcome = match &args.cmd {
        Command::Run {
            out_dir,
            memory_budget_mb,
            stdout,
        } => run_benchmarks(&args, out_dir, *memory_budget_mb, *stdout),
        Command::Compare { input } => run_compare(&args, input),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
