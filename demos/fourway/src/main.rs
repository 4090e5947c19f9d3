//! fourway — runs a scenario through the four-way crossing coordinator.
//!
//! ```text
//! fourway [scenario.csv] [config.json]
//! ```
//!
//! Without arguments the built-in eight-car scenario runs in real time with
//! the default durations.  Events are printed as they happen and also written
//! to `output/fourway/events.csv`.  `data/rush.csv` and `data/fast.json`
//! give a busier scenario at ten times real speed.  Set
//! `RUST_LOG=fw_sync=trace` to watch the locking.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use fw_core::CrossingConfig;
use fw_output::{ConsoleWriter, CsvWriter, EventOutputObserver};
use fw_schedule::{load_scenario_csv, sample_scenario, AgentSpec};
use fw_sim::SimBuilder;

const OUTPUT_DIR: &str = "output/fourway";

fn load_config(path: Option<&str>) -> Result<CrossingConfig> {
    let Some(path) = path else {
        return Ok(CrossingConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config: CrossingConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn load_scenario(path: Option<&str>) -> Result<Vec<AgentSpec>> {
    match path {
        Some(path) => load_scenario_csv(Path::new(path))
            .with_context(|| format!("loading scenario {path}")),
        None => Ok(sample_scenario()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let specs = load_scenario(args.first().map(String::as_str))?;
    let config = load_config(args.get(1).map(String::as_str))?;
    tracing::info!(cars = specs.len(), time_scale = config.time_scale, "scenario loaded");

    let mut sim = SimBuilder::new(specs).config(config).build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let console = EventOutputObserver::new(ConsoleWriter::stdout());
    let csv = EventOutputObserver::new(CsvWriter::create(Path::new(OUTPUT_DIR))?);
    let mut obs = (console, csv);

    println!("Traffic Control Simulation Started");
    println!("==================================");

    let t0 = Instant::now();
    let report = sim.run(&mut obs)?;
    let wall = t0.elapsed();

    println!("==================================");
    println!("Simulation Complete");
    println!();

    for (name, err) in [("console", obs.0.take_error()), ("csv", obs.1.take_error())] {
        if let Some(e) = err {
            eprintln!("{name} output error: {e}");
        }
    }

    println!(
        "Cars: {}  |  Simulated: {:.1} s  |  Wall: {:.2?}",
        report.outcomes.len(),
        report.elapsed_secs,
        wall
    );
    let delays: Vec<f64> = report.outcomes.iter().map(|o| o.delay_secs()).collect();
    let mean_delay = delays.iter().sum::<f64>() / delays.len().max(1) as f64;
    let max_delay = delays.iter().copied().fold(0.0, f64::max);
    println!("Delay after stop: mean {mean_delay:.1} s  |  max {max_delay:.1} s");
    println!("Yields at commit: {}", report.total_yields());

    let violations = report.violations();
    if violations.is_empty() {
        println!("Protocol checks: clean");
    } else {
        println!("Protocol checks: {} violation(s)", violations.len());
        for v in &violations {
            println!("  {v}");
        }
    }
    println!("Event log: {OUTPUT_DIR}/events.csv");

    Ok(())
}
