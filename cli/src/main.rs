mod scenario;

use std::fs;
use std::io::{self, Read, Write};

use clap::{Args, Parser, Subcommand};
use sheet_viewport::{ViewportConfig, ViewportError};

use crate::scenario::{Scenario, replay};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Viewport(#[from] ViewportError),
}

#[derive(Parser, Debug)]
#[command(name = "viewport-cli", about = "Replay viewport input scenarios without a browser")]
struct Cli {
    #[arg(long, env = "VIEWPORT_LOG", default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and print one JSON line per step.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(help = "Scenario file path, or - for stdin")]
    scenario: String,

    #[arg(long, help = "Viewport config JSON file that replaces the scenario's config")]
    config: Option<String>,

    #[arg(long, default_value_t = false, help = "Print only the final step")]
    last: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_writer(io::stderr).init();

    match cli.command {
        Command::Replay(args) => run_replay(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let raw = read_input(&args.scenario)?;
    let mut scenario: Scenario = serde_json::from_str(&raw)?;
    if let Some(path) = &args.config {
        scenario.config = ViewportConfig::from_json(&fs::read_to_string(path)?)?;
    }
    tracing::info!(steps = scenario.steps.len(), "replaying scenario");

    let reports = replay(&scenario);
    let shown = if args.last { reports.len().saturating_sub(1) } else { 0 };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in &reports[shown..] {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
