//! Versus AI - match plan
//!
//! Loads a match configuration, applies command-line overrides and prints
//! what the bot will play: race, skill model, opener and attack timing.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use versus_ai::core::config::{MatchConfig, RawMatchConfig};
use versus_ai::core::error::Result;
use versus_ai::plan::MatchPlan;

#[derive(Parser, Debug)]
#[command(name = "versus-ai")]
#[command(about = "Resolve and print the match plan for a configured bot")]
struct Args {
    /// Match configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the race: Protoss, Terran, Zerg or Random
    #[arg(long)]
    race: Option<String>,

    /// Override the skill rating (0 - 9999)
    #[arg(long)]
    rating: Option<i64>,

    /// Override the personality: Standard, Economic, Aggressive or Cheese
    #[arg(long)]
    personality: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut raw = match &args.config {
        Some(path) => RawMatchConfig::load(path)?,
        None => RawMatchConfig::default(),
    };
    if args.race.is_some() {
        raw.race = args.race;
    }
    if let Some(rating) = args.rating {
        raw.rating = Some(toml::Value::Integer(rating));
    }
    if args.personality.is_some() {
        raw.personality = args.personality;
    }
    if args.seed.is_some() {
        raw.seed = args.seed;
    }

    let config = MatchConfig::from_raw(raw);
    let plan = MatchPlan::from_config(&config);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&plan)?),
        "text" => println!("{}", plan),
        other => {
            tracing::warn!("Unknown format '{}', defaulting to text", other);
            println!("{}", plan);
        }
    }

    Ok(())
}
