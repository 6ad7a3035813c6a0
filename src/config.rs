// src/config.rs
use anyhow::Result;
use serde::Deserialize;

use crate::error::TrainError;

/// Environment variable holding the database credential.
pub const PASSWORD_VAR: &str = "DB_PASSWORD";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TrainConfig {
    pub db: DbCfg,
    pub context: ContextCfg,
    pub fit: FitKnobs,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DbCfg {
    pub path: String,
}

/// Training-time conditioning values. These stand in for "whatever the
/// customer requested" at serving time; shifting the training target to a
/// different context is a config edit, not a code change.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ContextCfg {
    pub destination: String,
    pub lead_source: String,
    pub communication_method: String,
    pub specialty_department: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FitKnobs {
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            db: DbCfg::default(),
            context: ContextCfg::default(),
            fit: FitKnobs::default(),
        }
    }
}

impl Default for DbCfg {
    fn default() -> Self {
        Self { path: "data/agency.db".into() }
    }
}

impl Default for ContextCfg {
    fn default() -> Self {
        Self {
            destination: "Mars".into(),
            lead_source: "Organic".into(),
            communication_method: "Phone Call".into(),
            specialty_department: "Luxury Voyages".into(),
        }
    }
}

impl Default for FitKnobs {
    fn default() -> Self {
        Self { log_every: 1000 }
    }
}

pub fn load_config(path: &str) -> Result<TrainConfig> {
    let txt = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<TrainConfig>(&txt)?)
}

/// The single secret the pipeline needs. Absence is a startup configuration
/// error, checked before any database work.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub db_password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        match std::env::var(PASSWORD_VAR) {
            Ok(p) if !p.is_empty() => Ok(Self { db_password: p }),
            _ => Err(TrainError::MissingCredential(PASSWORD_VAR).into()),
        }
    }
}
