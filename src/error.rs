// Error types
//
// Input rejections are values, not failures: they travel back to the caller
// inside a LogOutcome. Everything else here is a real error path.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Fatal configuration and orchestration errors
#[derive(Debug, Error)]
pub enum ContestError {
    #[error("unknown contest '{0}'")]
    UnknownContest(String),
    #[error("contact {0} not found")]
    ContactNotFound(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Why a draft contact was refused before any dupe check ran
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Rejection {
    #[error("callsign '{0}' is shorter than 3 characters")]
    CallTooShort(String),
    #[error("callsign '{0}' has no digit")]
    CallMissingDigit(String),
    #[error("callsign '{0}' has no letter")]
    CallMissingLetter(String),
    #[error("no amateur band for frequency '{0}'")]
    UnknownBand(String),
}

/// Failures reported by a contact log store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("contact {0} does not exist")]
    Missing(Uuid),
    #[error("log store backend: {0}")]
    Backend(String),
}

/// A stored contact carries a field that cannot be interpreted
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ContactError {
    #[error("malformed frequency '{0}'")]
    MalformedFrequency(String),
    #[error("unknown band '{0}'")]
    UnknownBand(String),
}

/// Writing a submission file failed
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// SQLite persistence failures
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration failed on statement: {statement}: {source}")]
    Migration {
        statement: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
    #[error("contest session {0} not found")]
    SessionNotFound(i64),
}

/// Configuration file problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
