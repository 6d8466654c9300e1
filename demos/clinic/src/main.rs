//! clinic — the medical-clinic scenarios for the qsim engine.
//!
//! Patients arrive over a 12-hour day, queue for a registration counter,
//! walk to the waiting area, and queue for a doctor.  Three staffing
//! scenarios are compared side by side.
//!
//! ```text
//! clinic [--out DIR] [--json]
//! ```
//!
//! `--out DIR` writes `journeys.csv`, `stages.csv` and `summary.csv` per
//! scenario under `DIR/<n>/`.  `--json` prints every summary as JSON.
//! Set `RUST_LOG=qs_sim=debug` to watch grants and releases.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qs_output::{CsvWriter, RecordOutputObserver};
use qs_sim::{ScenarioConfig, ScenarioSet, run_scenarios};
use qs_stats::RunSummary;

const SCENARIOS: &str = include_str!("../scenarios.toml");

// ── Arguments ─────────────────────────────────────────────────────────────────

/// Medical clinic simulation
///
/// Runs the bundled staffing scenarios and prints a side-by-side summary.
#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(version, about, long_about = None)]
struct Args {
    /// Write journeys.csv, stages.csv and summary.csv per scenario under DIR/<n>/
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print every summary as JSON after the table
    #[arg(long)]
    json: bool,
}

// ── Running ───────────────────────────────────────────────────────────────────

/// Run one scenario while streaming its records to CSV files in `dir`.
fn run_with_output(scenario: &ScenarioConfig, dir: &Path) -> Result<RunSummary> {
    std::fs::create_dir_all(dir)?;
    let mut sim = scenario.build()?;
    let mut obs = RecordOutputObserver::new(CsvWriter::new(dir)?);
    let summary = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).with_context(|| format!("writing output for `{}`", scenario.name));
    }
    obs.write_summary(&summary)?;
    Ok(summary)
}

fn run_all(scenarios: &[ScenarioConfig], out: Option<&Path>) -> Result<Vec<RunSummary>> {
    match out {
        Some(root) => scenarios
            .iter()
            .enumerate()
            .map(|(i, s)| run_with_output(s, &root.join(i.to_string())))
            .collect(),
        None => run_scenarios(scenarios)
            .into_iter()
            .zip(scenarios)
            .map(|(r, s)| r.with_context(|| format!("running `{}`", s.name)))
            .collect(),
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

fn mean_wait(summary: &RunSummary, stage: &str) -> f64 {
    summary.stage(stage).map_or(0.0, |s| s.mean_wait)
}

fn utilization(summary: &RunSummary, pool: &str) -> f64 {
    summary.pool(pool).map_or(0.0, |p| p.utilization_pct)
}

fn print_table(scenarios: &[ScenarioConfig], summaries: &[RunSummary]) {
    println!("{}", "=".repeat(60));
    println!("MEDICAL CLINIC SIMULATION - Performance Summary");
    println!("{}", "=".repeat(60));

    for (scenario, s) in scenarios.iter().zip(summaries) {
        println!();
        println!("{}", scenario.name);
        println!("{}", "-".repeat(scenario.name.len()));
        println!("  {:<28} {:>10}", "Patients arrived", s.arrived);
        println!("  {:<28} {:>10}", "Patients served", s.served);
        println!("  {:<28} {:>10}", "Still inside at close", s.in_system);
        println!("  {:<28} {:>10.2}", "Avg registration wait (min)", mean_wait(s, "register"));
        println!("  {:<28} {:>10.2}", "Avg doctor wait (min)", mean_wait(s, "consult"));
        println!("  {:<28} {:>10.2}", "Avg time in clinic (min)", s.mean_total_time);
        println!("  {:<28} {:>10.2}", "Throughput (patients/hour)", s.throughput);
        println!("  {:<28} {:>9.1}%", "Registration utilization", utilization(s, "registration"));
        println!("  {:<28} {:>9.1}%", "Doctor utilization", utilization(s, "doctor"));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,clinic=info")),
        )
        .init();

    let args = Args::parse();
    let set = ScenarioSet::from_toml_str(SCENARIOS)?;
    info!(scenarios = set.scenario.len(), "Loaded clinic scenarios");

    let t0 = Instant::now();
    let summaries = run_all(&set.scenario, args.out.as_deref())?;
    info!(elapsed_secs = t0.elapsed().as_secs_f64(), "All scenarios complete");

    print_table(&set.scenario, &summaries);

    if args.json {
        println!();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    if let Some(dir) = &args.out {
        println!();
        println!("CSV output written under {}", dir.display());
    }
    Ok(())
}
