//! Core error types for the certscan application.
//!
//! This module defines the central error type used across the subsystems.
//! Each subsystem error is represented as a variant for clear error
//! propagation. Note that two whole error classes never appear here by
//! design: persistence faults are handled fail-open inside `certscan-store`
//! (the flow must never block on local I/O), and an unavailable platform
//! permission API is folded into a denial inside `certscan-permissions`
//! (fail closed).

use thiserror::Error;

/// Central error type for certscan operations.
#[derive(Error, Debug)]
pub enum CertscanError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Permission subsystem errors
    #[error("permission error: {0}")]
    Permission(String),

    /// Local store errors (connection, queries, migrations)
    #[error("store error: {0}")]
    Store(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `CertscanError`.
pub type Result<T> = std::result::Result<T, CertscanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
