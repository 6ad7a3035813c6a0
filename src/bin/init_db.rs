// src/bin/init_db.rs
//! Bootstrap a local agency database: create the tables and seed the nine
//! weight rows. Existing data (and existing weights) are left alone.

use anyhow::Result;
use clap::Parser;

use voyagerank::config::Credentials;
use voyagerank::{db, schema};

#[derive(Parser, Debug)]
#[command(name = "init_db", version, about = "Create the agency schema and weight rows")]
struct Args {
    /// Path to the agency sqlite file
    #[arg(long, default_value = "data/agency.db")]
    db: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let creds = Credentials::from_env()?;

    if let Some(dir) = std::path::Path::new(&args.db).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let conn = db::connect(&args.db, &creds)?;
    schema::apply_schema(&conn)?;
    schema::seed_weight_rows(&conn)?;
    println!("initialized {}", args.db);
    Ok(())
}
