//! docket - drive a priority task store from the command line.
//!
//! Without a script the built-in walkthrough runs; with one, each JSON line is
//! an operation. The store lives only for the duration of the process.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use docket_core::{Clock, Config, LoggingConfig, SharedTaskStore, SystemClock, TaskStore};

#[derive(Debug, Parser)]
#[command(name = "docket", version, about = "Priority task store driver")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "DOCKET_CONFIG")]
    config: Option<PathBuf>,

    /// Print one JSON object per result instead of text.
    #[arg(long)]
    json: bool,

    /// JSON-lines operation script. Runs the walkthrough when omitted.
    script: Option<PathBuf>,
}

/// RUST_LOG wins over the configured filter; invalid or empty values fall
/// through to the next source.
fn init_tracing(logging: &LoggingConfig) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .or_else(|| EnvFilter::try_new(&logging.filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(logging.with_target),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    init_tracing(&config.logging);

    let ops = match &cli.script {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            script::parse(&raw)?
        }
        None => script::demo(config.store.date_zone.date_of(SystemClock.now())),
    };
    info!(operations = ops.len(), "running");

    let queue = SharedTaskStore::new(TaskStore::from_config(SystemClock, &config.store));
    for (line, op) in ops {
        let outcome = script::execute(&queue, op, config.store.threshold_dates)
            .await
            .with_context(|| format!("line {line}"))?;
        if cli.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            println!("{outcome}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
