//! Pairswap scenario replay
//!
//! Usage: pairswap-sim --config config/simulator.toml --scenario scenarios/basic.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use config::{init_logging, SimulatorConfig};
use simulator::{Report, Scenario, Simulation};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "pairswap-sim", version, about = "Replay a Pairswap scenario")]
struct Args {
    /// Base configuration file
    #[arg(short, long, default_value = "config/simulator.toml")]
    config: PathBuf,

    /// Scenario to replay
    #[arg(short, long)]
    scenario: PathBuf,

    /// Environment overlay from `environments/<env>.toml` next to the config
    #[arg(short, long)]
    env: Option<String>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Stop at the first failing step
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = SimulatorConfig::load(&args.config, args.env.as_deref())?;
    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    settings.logging.json |= args.json_logs;
    init_logging(&settings.logging)?;

    info!("Starting Pairswap simulator");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let scenario = Scenario::from_file(&args.scenario)?;
    info!(
        "Replaying {} steps from {:?}",
        scenario.steps.len(),
        args.scenario
    );

    let mut simulation = Simulation::from_config(&settings)?;
    let records = simulation.run(&scenario, args.fail_fast);
    let report = Report::build(&simulation, &scenario, records);
    if report.failed_steps > 0 {
        warn!("{} steps failed", report.failed_steps);
    }

    let json = report
        .to_json(settings.output.pretty)
        .context("Failed to serialize report")?;
    match settings.report_path() {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
