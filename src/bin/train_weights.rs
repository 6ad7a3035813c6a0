// src/bin/train_weights.rs
//! Retrain the agent-assignment model and publish the learned feature
//! weights back into the weight store.

use anyhow::Result;
use clap::Parser;

use voyagerank::config::{load_config, Credentials, TrainConfig};
use voyagerank::{db, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "train_weights",
    version,
    about = "Retrain agent-assignment weights from booking history"
)]
struct Args {
    /// Optional TOML config (training context, db path); defaults apply
    /// when omitted
    #[arg(long)]
    config: Option<String>,

    /// Path to the agency sqlite file (overrides the config value)
    #[arg(long)]
    db: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // credential check comes first; a missing password is a config error,
    // not a pipeline error
    let creds = Credentials::from_env()?;

    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => TrainConfig::default(),
    };
    if let Some(db) = args.db {
        cfg.db.path = db;
    }

    let mut conn = db::connect(&cfg.db.path, &creds)?;
    let model = pipeline::run(&cfg, &mut conn)?;

    println!("Learned weights:");
    for (name, w) in model.named_weights() {
        println!("  {name}: {w:.6}");
    }
    Ok(())
}
