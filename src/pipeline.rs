// src/pipeline.rs
//! The retraining pipeline: extract -> normalize -> fit -> publish.
//!
//! Strictly sequential with no internal state between runs; each stage logs
//! before and after its work so the last line in the log identifies the stage
//! a failed run died in.

use anyhow::Result;
use log::info;
use rusqlite::Connection;

use crate::config::TrainConfig;
use crate::features::extract_training_rows;
use crate::model::{self, LogisticModel};
use crate::normalize::normalize_features;
use crate::publish::publish_weights;

pub fn run(cfg: &TrainConfig, conn: &mut Connection) -> Result<LogisticModel> {
    info!(
        "[extract] building training rows (destination='{}' lead_source='{}' communication='{}')",
        cfg.context.destination, cfg.context.lead_source, cfg.context.communication_method
    );
    let rows = extract_training_rows(conn, &cfg.context)?;
    info!("[extract] fetched {} training rows", rows.len());

    info!("[normalize] percentile-ranking feature columns");
    let x = normalize_features(&rows);
    let y: Vec<f64> = rows.iter().map(|r| r.outcome).collect();

    info!("[fit] training intercept-free logistic regression");
    let model = model::fit(&x, &y, cfg.fit.log_every)?;
    for (name, w) in model.named_weights() {
        info!("[fit]   {name}: {w:.6}");
    }

    info!("[publish] writing weights");
    publish_weights(conn, &model.named_weights())?;
    info!("[publish] done");
    Ok(model)
}
