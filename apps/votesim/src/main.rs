//! votesim: minimum voting-station counts per precinct.
//!
//! Reads the election configuration, the observed service times, and the
//! precinct list; searches each precinct for the smallest station count that
//! keeps every simulated voter under the wait threshold; writes a text report
//! and, optionally, CSV files.
//!
//! # Example
//!
//! ```bash
//! votesim --config config.json --precincts precincts.csv \
//!         --service-times service_times.csv --out report.txt --csv-dir out/
//!
//! # Independent per-precinct streams (parallel with `--features parallel`)
//! RUST_LOG=vs_sim=debug votesim ... --stream-policy per-precinct
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vs_core::Precinct;
use vs_input::{load_election, load_precincts_csv};
use vs_output::{CsvWriter, ReportObserver, TextReport, Tee};
use vs_sim::{RunSummary, Runner, SearchObserver, StreamPolicy};

const DEFAULT_LOG_FILTER: &str = "warn,votesim=info,vs_sim=info";

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    /// One stream shared by every precinct, in file order.
    Shared,
    /// One stream per precinct, derived from the seed and precinct number.
    PerPrecinct,
}

impl From<PolicyArg> for StreamPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Shared      => StreamPolicy::Shared,
            PolicyArg::PerPrecinct => StreamPolicy::PerPrecinct,
        }
    }
}

/// Precinct voting-station simulator.
///
/// Deterministic for a given seed and inputs.
#[derive(Parser, Debug)]
#[command(name = "votesim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Election configuration (JSON)
    #[arg(long)]
    config: PathBuf,

    /// Precinct list (CSV)
    #[arg(long)]
    precincts: PathBuf,

    /// Observed service durations in seconds (CSV, header `seconds`)
    #[arg(long)]
    service_times: PathBuf,

    /// Text report to write
    #[arg(long)]
    out: PathBuf,

    /// Also write iterations.csv, histograms.csv, and outcomes.csv here
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Override the configuration's seed
    #[arg(long)]
    seed: Option<u64>,

    /// How random streams map to precincts
    #[arg(long, value_enum, default_value = "shared")]
    stream_policy: PolicyArg,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();

    let config = load_election(&args.config, &args.service_times).with_context(|| {
        format!(
            "loading configuration {} with service times {}",
            args.config.display(),
            args.service_times.display()
        )
    })?;
    let precincts = load_precincts_csv(&args.precincts)
        .with_context(|| format!("loading precincts {}", args.precincts.display()))?;
    let seed = args.seed.unwrap_or(config.seed);

    info!(
        precincts = precincts.len(),
        iterations = config.iterations,
        too_long_minutes = config.too_long_minutes,
        seed,
        "loaded inputs"
    );

    let runner = Runner::new(&config)
        .context("invalid configuration")?
        .stream_policy(args.stream_policy.into())
        .seed(seed);

    let text = TextReport::create(&args.out)
        .with_context(|| format!("creating report {}", args.out.display()))?;
    let mut text_obs = ReportObserver::new(text);

    let t0 = Instant::now();
    let summary = match &args.csv_dir {
        None => run(&runner, &precincts, &mut text_obs)?,
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating CSV directory {}", dir.display()))?;
            let csv = CsvWriter::new(dir)
                .with_context(|| format!("opening CSV files in {}", dir.display()))?;
            let mut tee = Tee::new(&mut text_obs, ReportObserver::new(csv));
            let summary = run(&runner, &precincts, &mut tee)?;
            if let Some(e) = tee.second.take_error() {
                bail!("writing CSV output: {e}");
            }
            summary
        }
    };
    if let Some(e) = text_obs.take_error() {
        bail!("writing {}: {e}", args.out.display());
    }
    let elapsed = t0.elapsed();

    println!("Searched {} precincts in {:.3} s", summary.outcomes.len(), elapsed.as_secs_f64());
    println!("{:<8} {:<25} {:>8}", "Precinct", "Name", "Stations");
    println!("{}", "-".repeat(43));
    for outcome in &summary.outcomes {
        let name = precincts
            .iter()
            .find(|p| p.id == outcome.precinct)
            .map_or("", |p| p.name.as_str());
        let stations = outcome.accepted.map_or_else(|| "none".to_owned(), |n| n.to_string());
        println!("{:<8} {:<25} {:>8}", outcome.precinct.0, name, stations);
    }
    if !summary.skipped.is_empty() {
        println!("Skipped {} precincts", summary.skipped.len());
    }

    Ok(())
}

fn run<O: SearchObserver>(runner: &Runner<'_>, precincts: &[Precinct], observer: &mut O) -> Result<RunSummary> {
    runner.run(precincts, observer).context("simulation failed")
}
