//! Certscan Core - Foundation crate for the identity-card verification flow.
//!
//! This crate provides the shared types, error handling, and configuration
//! management that all other certscan crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`Platform`, `Symbology`, `ScanEvent`, `SessionId`)
//!
//! # Example
//!
//! ```rust
//! use certscan_core::{AppConfig, Platform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//!
//! // Which scanning backend dialect applies on this build target?
//! let platform = Platform::detect();
//! println!("running as {platform}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, GeneralConfig, StorageConfig};
pub use error::{CertscanError, ConfigError, ConfigResult, Result};
pub use types::{Platform, ScanEvent, SessionId, Symbology};
