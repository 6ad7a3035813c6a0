// src/error.rs
use std::fmt;

/// Everything that can abort a training run, split so an operator can tell
/// "code/schema out of sync" apart from "database unreachable".
#[derive(Debug)]
pub enum TrainError {
    /// Required credential absent from the environment at startup.
    MissingCredential(&'static str),
    Sqlite(rusqlite::Error),
    /// Too few rows, or a constant outcome column: the fit is refused.
    Insufficient(String),
    /// A weight UPDATE matched zero rows for this feature name.
    SchemaDrift(String),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::MissingCredential(var) => {
                write!(f, "database password not found in environment variable '{var}'")
            }
            TrainError::Sqlite(e) => write!(f, "data access failed: {e}"),
            TrainError::Insufficient(why) => write!(f, "insufficient training data: {why}"),
            TrainError::SchemaDrift(feature) => write!(
                f,
                "weight store has no row for feature '{feature}' (pipeline and learned_weights schema out of sync)"
            ),
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainError::Sqlite(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for TrainError {
    fn from(e: rusqlite::Error) -> Self {
        TrainError::Sqlite(e)
    }
}
