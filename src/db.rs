// src/db.rs
use anyhow::Result;
use rusqlite::Connection;

use crate::config::Credentials;
use crate::error::TrainError;

/// Open the agency database. The key pragma must run before any other
/// statement; on builds without encryption support it is a harmless no-op.
pub fn connect(path: &str, creds: &Credentials) -> Result<Connection> {
    let conn = Connection::open(path).map_err(TrainError::from)?;
    conn.pragma_update(None, "key", &creds.db_password)
        .map_err(TrainError::from)?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(TrainError::from)?;
    Ok(conn)
}
