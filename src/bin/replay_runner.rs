//! Headless Replay Runner
//!
//! Drives a race controller over recorded snapshots and prints every
//! command batch it emits.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use versus_ai::command::CommandBatch;
use versus_ai::controller::from_config;
use versus_ai::core::config::MatchConfig;
use versus_ai::core::error::Result;
use versus_ai::driver::{DriverSummary, RecordingSink, ReplayProvider, TickDriver};

#[derive(Parser, Debug)]
#[command(name = "replay_runner")]
#[command(about = "Run a controller over recorded snapshots and print its commands")]
struct Args {
    /// Match configuration file (TOML)
    #[arg(long, default_value = "data/match.toml")]
    config: PathBuf,

    /// JSON array of {iteration, snapshot} frames
    #[arg(long)]
    snapshots: PathBuf,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct ReplayResult<'a> {
    race: String,
    opener: String,
    summary: DriverSummary,
    batches: &'a [CommandBatch],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = MatchConfig::load(&args.config)?;
    let mut provider = ReplayProvider::load(&args.snapshots)?;
    let mut sink = RecordingSink::default();

    let mut driver = TickDriver::new(from_config(&config));
    let summary = driver.run(&mut provider, &mut sink);

    let result = ReplayResult {
        race: driver.controller().race().to_string(),
        opener: driver.controller().opener().id().to_string(),
        summary,
        batches: &sink.batches,
    };

    match args.format.as_str() {
        "text" => {
            println!("Replay Result");
            println!("=============");
            println!("Race: {} ({})", result.race, result.opener);
            for batch in result.batches.iter().filter(|b| !b.is_empty()) {
                println!("[{}]", batch.issued_at);
                for command in batch {
                    println!("  {:?}", command);
                }
            }
            println!();
            println!(
                "Ticks: {} ({} active), commands: {}",
                summary.ticks, summary.active_ticks, summary.commands
            );
        }
        other => {
            if other != "json" {
                tracing::warn!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
