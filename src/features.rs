// src/features.rs
//! One training row per historical assignment: nine engineered per-agent
//! signals plus the binary confirmation outcome.

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::config::ContextCfg;
use crate::error::TrainError;

/// Canonical feature order. This is the column order of every training
/// matrix and the set of row keys in `learned_weights`.
pub const FEATURE_NAMES: [&str; 9] = [
    "rating_score",
    "experience_score",
    "revenue_score",
    "dest_expertise_score",
    "lead_conversion_score",
    "communication_score",
    "requirements_score",
    "recency_score",
    "availability_score",
];

pub const NUM_FEATURES: usize = FEATURE_NAMES.len();

#[derive(Debug, Clone)]
pub struct TrainingRow {
    pub assignment_id: i64,
    pub agent_id: i64,
    /// Raw feature values, ordered as [`FEATURE_NAMES`].
    pub features: [f64; NUM_FEATURES],
    /// 1.0 if the assignment's booking confirmed, else 0.0.
    pub outcome: f64,
}

// Per-agent aggregates are computed in CTEs and broadcast onto each of the
// agent's assignments. Bind order: ?1 destination, ?2 lead source,
// ?3 communication method, ?4 specialty department.
//
// Fallbacks are part of the contract: an assignment with no booking row still
// yields a training row; every ratio with an empty denominator (or a missing
// numerator aggregate) resolves to 0, except availability which defaults to
// fully available. Capacity is clamped up to 1 so a recorded capacity of 0
// cannot divide by zero.
const TRAINING_SQL: &str = r#"
WITH
  recency_start AS (
    SELECT DATE(MAX(booking_complete_date), '-30 day') AS start_date
    FROM bookings
  ),
  b_rev AS (
    SELECT assignment_id,
           SUM(total_revenue) AS total_revenue
    FROM bookings
    WHERE booking_status = 'Confirmed'
    GROUP BY assignment_id
  ),
  conf AS (
    SELECT ah.agent_id,
           COUNT(*) AS total_confirms
    FROM assignment_history ah
    JOIN bookings b ON ah.assignment_id = b.assignment_id
    WHERE b.booking_status = 'Confirmed'
    GROUP BY ah.agent_id
  ),
  dest AS (
    SELECT ah.agent_id,
           COUNT(*) AS dest_confirms
    FROM assignment_history ah
    JOIN bookings b ON ah.assignment_id = b.assignment_id
    WHERE b.booking_status = 'Confirmed'
      AND b.destination = ?1
    GROUP BY ah.agent_id
  ),
  leads AS (
    SELECT agent_id,
           COUNT(*) AS total_leads
    FROM assignment_history
    WHERE lead_source = ?2
    GROUP BY agent_id
  ),
  lead_conv AS (
    SELECT ah.agent_id,
           COUNT(*) AS lead_converts
    FROM assignment_history ah
    JOIN bookings b ON ah.assignment_id = b.assignment_id
    WHERE ah.lead_source = ?2
      AND b.booking_status = 'Confirmed'
    GROUP BY ah.agent_id
  ),
  comms AS (
    SELECT agent_id,
           COUNT(*) AS total_comm
    FROM assignment_history
    WHERE communication_method = ?3
    GROUP BY agent_id
  ),
  comm_conv AS (
    SELECT ah.agent_id,
           COUNT(*) AS comm_converts
    FROM assignment_history ah
    JOIN bookings b ON ah.assignment_id = b.assignment_id
    WHERE ah.communication_method = ?3
      AND b.booking_status = 'Confirmed'
    GROUP BY ah.agent_id
  ),
  rec AS (
    SELECT ah.agent_id,
           SUM(CASE
                 WHEN b.booking_status = 'Confirmed'
                   AND b.booking_complete_date >= rsd.start_date
                 THEN 1 ELSE 0 END) * 1.0
             / NULLIF(SUM(CASE WHEN b.booking_status = 'Confirmed' THEN 1 ELSE 0 END), 0)
           AS recency_score
    FROM assignment_history ah
    LEFT JOIN bookings b ON ah.assignment_id = b.assignment_id
    CROSS JOIN recency_start rsd
    GROUP BY ah.agent_id
  ),
  avail AS (
    SELECT ah.agent_id,
           1.0
           - SUM(CASE WHEN b.booking_status = 'Pending' THEN 1 ELSE 0 END) * 1.0
             / MAX(cap.max_concurrent, 1)
           AS availability_score
    FROM assignment_history ah
    LEFT JOIN bookings b ON ah.assignment_id = b.assignment_id
    JOIN agent_capacity cap ON ah.agent_id = cap.agent_id
    GROUP BY ah.agent_id, cap.max_concurrent
  )
SELECT
  ah.assignment_id,
  ah.agent_id,
  a.avg_rating            AS rating_score,
  a.years_of_service      AS experience_score,
  COALESCE(b_rev.total_revenue, 0) AS revenue_score,
  CASE WHEN conf.total_confirms > 0
       THEN COALESCE(dest.dest_confirms, 0) * 1.0 / conf.total_confirms
       ELSE 0 END AS dest_expertise_score,
  CASE WHEN leads.total_leads > 0
       THEN COALESCE(lead_conv.lead_converts, 0) * 1.0 / leads.total_leads
       ELSE 0 END AS lead_conversion_score,
  CASE WHEN comms.total_comm > 0
       THEN COALESCE(comm_conv.comm_converts, 0) * 1.0 / comms.total_comm
       ELSE 0 END AS communication_score,
  CASE WHEN a.department = ?4
        AND ah.lead_source LIKE '%' || ?2 || '%' THEN 1 ELSE 0 END
    AS requirements_score,
  COALESCE(rec.recency_score, 0)        AS recency_score,
  COALESCE(avail.availability_score, 1) AS availability_score,
  CASE WHEN b.booking_status = 'Confirmed' THEN 1 ELSE 0 END AS outcome
FROM assignment_history ah
JOIN agents a            ON ah.agent_id = a.agent_id
LEFT JOIN bookings b     ON ah.assignment_id = b.assignment_id
LEFT JOIN b_rev          ON ah.assignment_id = b_rev.assignment_id
LEFT JOIN conf           ON ah.agent_id = conf.agent_id
LEFT JOIN dest           ON ah.agent_id = dest.agent_id
LEFT JOIN leads          ON ah.agent_id = leads.agent_id
LEFT JOIN lead_conv      ON ah.agent_id = lead_conv.agent_id
LEFT JOIN comms          ON ah.agent_id = comms.agent_id
LEFT JOIN comm_conv      ON ah.agent_id = comm_conv.agent_id
LEFT JOIN rec            ON ah.agent_id = rec.agent_id
LEFT JOIN avail          ON ah.agent_id = avail.agent_id
ORDER BY ah.assignment_id
"#;

pub fn extract_training_rows(conn: &Connection, ctx: &ContextCfg) -> Result<Vec<TrainingRow>> {
    let mut stmt = conn.prepare(TRAINING_SQL).map_err(TrainError::from)?;
    let rows = stmt
        .query_map(
            params![
                ctx.destination,
                ctx.lead_source,
                ctx.communication_method,
                ctx.specialty_department,
            ],
            |row| {
                let mut features = [0.0f64; NUM_FEATURES];
                for (i, slot) in features.iter_mut().enumerate() {
                    *slot = row.get(2 + i)?;
                }
                Ok(TrainingRow {
                    assignment_id: row.get(0)?,
                    agent_id: row.get(1)?,
                    features,
                    outcome: row.get(2 + NUM_FEATURES)?,
                })
            },
        )
        .map_err(TrainError::from)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(TrainError::from)?);
    }
    Ok(out)
}
