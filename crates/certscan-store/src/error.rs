//! Store error types.

use std::time::Duration;
use thiserror::Error;

/// Store-specific errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open or create the database.
    #[error("failed to open store: {0}")]
    Open(String),

    /// Migration execution failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Serialization/deserialization of a stored value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operation exceeded the configured I/O bound.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Underlying `SQLx` error.
    #[error("store error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl From<StoreError> for certscan_core::CertscanError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
