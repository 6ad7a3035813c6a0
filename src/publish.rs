// src/publish.rs
//! Writes learned coefficients into `learned_weights`.
//!
//! All nine updates run inside one transaction: a concurrent reader of the
//! weight store sees either the previous run's coefficients or this run's,
//! never a mix. Update-only by feature name; a name with no matching row
//! means the pipeline and the store have drifted apart, so the whole publish
//! is rolled back and reported as schema drift.

use anyhow::Result;
use log::info;
use rusqlite::{params, Connection};

use crate::error::TrainError;

pub fn publish_weights(conn: &mut Connection, weights: &[(&'static str, f64)]) -> Result<()> {
    let tx = conn.transaction().map_err(TrainError::from)?;
    for &(feature, w) in weights {
        let updated = tx
            .execute(
                "UPDATE learned_weights SET weight = ?1 WHERE feature_name = ?2",
                params![w, feature],
            )
            .map_err(TrainError::from)?;
        if updated == 0 {
            // tx dropped without commit: nothing from this run is applied
            return Err(TrainError::SchemaDrift(feature.to_string()).into());
        }
    }
    tx.commit().map_err(TrainError::from)?;
    info!("[publish] updated {} weights in learned_weights", weights.len());
    Ok(())
}

/// Current weight store contents, ordered by feature name.
pub fn read_weights(conn: &Connection) -> Result<Vec<(String, f64)>> {
    let mut stmt = conn
        .prepare("SELECT feature_name, weight FROM learned_weights ORDER BY feature_name")
        .map_err(TrainError::from)?;
    let rows = stmt
        .query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, f64>(1)?)))
        .map_err(TrainError::from)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(TrainError::from)?);
    }
    Ok(out)
}
