// src/schema.rs
use anyhow::Result;
use rusqlite::Connection;

use crate::features::FEATURE_NAMES;

const MIGRATION: &str = r#"
BEGIN;

CREATE TABLE IF NOT EXISTS agents(
  agent_id INTEGER PRIMARY KEY,
  name TEXT NOT NULL,
  avg_rating REAL NOT NULL DEFAULT 0,
  years_of_service REAL NOT NULL DEFAULT 0,
  department TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS assignment_history(
  assignment_id INTEGER PRIMARY KEY,
  agent_id INTEGER NOT NULL,
  lead_source TEXT NOT NULL DEFAULT '',
  communication_method TEXT NOT NULL DEFAULT '',
  FOREIGN KEY(agent_id) REFERENCES agents(agent_id)
);
CREATE INDEX IF NOT EXISTS idx_history_agent ON assignment_history(agent_id);

CREATE TABLE IF NOT EXISTS bookings(
  assignment_id INTEGER NOT NULL,
  booking_status TEXT NOT NULL,
  destination TEXT NOT NULL DEFAULT '',
  booking_complete_date TEXT,
  total_revenue REAL,
  FOREIGN KEY(assignment_id) REFERENCES assignment_history(assignment_id)
);
CREATE INDEX IF NOT EXISTS idx_bookings_assignment ON bookings(assignment_id);

CREATE TABLE IF NOT EXISTS agent_capacity(
  agent_id INTEGER PRIMARY KEY,
  max_concurrent INTEGER NOT NULL DEFAULT 1,
  FOREIGN KEY(agent_id) REFERENCES agents(agent_id)
);

-- Shared with the serving-side ranking procedure, which scores agents by
-- percentile rank and combines the columns with these weights. One row per
-- recognized feature name; the training pipeline only UPDATEs them.
CREATE TABLE IF NOT EXISTS learned_weights(
  feature_name TEXT PRIMARY KEY,
  weight REAL NOT NULL DEFAULT 0
);

COMMIT;
"#;

pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(MIGRATION)?;
    Ok(())
}

/// Create the nine recognized weight rows if missing. Existing weights are
/// left untouched.
pub fn seed_weight_rows(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO learned_weights(feature_name, weight) VALUES(?1, 0)",
    )?;
    for name in FEATURE_NAMES {
        stmt.execute([name])?;
    }
    Ok(())
}
