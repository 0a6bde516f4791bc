use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use columnar_profiler::{CsvSource, ProfileConfig, ProfileReport, profile_source};
use jemallocator::Jemalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "columnar_profiler")]
#[command(about = "Per-column numeric profile of a CSV file, computed in parallel")]
#[command(version)]
struct Args {
    /// CSV file to profile; the first line is the header
    file: PathBuf,

    /// Number of parallel workers (zero or negative means 1)
    #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
    workers: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("columnar_profiler=warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version are not failures
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    let report = match run(&args) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(err) = write!(stdout, "{report}").and_then(|_| stdout.flush()) {
        eprintln!("failed to write report: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> anyhow::Result<ProfileReport> {
    let config = ProfileConfig::from_worker_arg(&args.workers)?;
    tracing::debug!(?args, workers = config.workers, "parsed arguments");

    let source = CsvSource::open(&args.file)?;
    let lines = source.lines()?;

    profile_source(&lines, &config)
        .with_context(|| format!("profiling {} failed", source.path().display()))
}
