//! Error types for the game server

use thiserror::Error;

/// Failures of the move store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a move record
    #[error("Corrupt move log for session {code} at ply {ply}: {message}")]
    Corrupt {
        code: String,
        ply: i64,
        message: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Invalid server configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({message})")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}
