//! Certscan Permissions - Camera authorization gate for the scan flow.
//!
//! The host platform owns the camera grant; this crate wraps its
//! authorization API behind the [`CameraAuthority`] trait and folds every
//! failure mode into a plain [`PermissionState`] via the [`PermissionGate`]:
//! an unavailable or failing platform API reads as `Denied` (fail closed),
//! never as an error the flow has to surface.
//!
//! There is no completion signal for an OS settings round trip, so the gate
//! models it as a fire-and-forget side effect: `open_platform_settings()`
//! resets the observed state to `Unknown` and the caller re-queries on
//! resume.
//!
//! # Example
//!
//! ```rust
//! use certscan_permissions::{PermissionGate, PermissionState, ScriptedAuthority};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gate = PermissionGate::new(Arc::new(ScriptedAuthority::granted()));
//! assert_eq!(gate.query_permission().await, PermissionState::Granted);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod authority;
mod gate;

pub use authority::{CameraAuthority, ScriptedAuthority};
pub use gate::PermissionGate;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a platform authorization backend can report.
///
/// These never escape the [`PermissionGate`]; they exist so backends can
/// be precise about what went wrong before the gate fails closed.
#[derive(Error, Debug, Clone)]
pub enum PermissionError {
    /// The platform permission API is not available on this host
    #[error("platform permission API unavailable: {0}")]
    Unavailable(String),

    /// The consent prompt was dismissed by the system before the user answered
    #[error("permission prompt interrupted: {0}")]
    Interrupted(String),
}

impl From<PermissionError> for certscan_core::CertscanError {
    fn from(err: PermissionError) -> Self {
        Self::Permission(err.to_string())
    }
}

/// Result type for authority operations.
pub type Result<T> = std::result::Result<T, PermissionError>;

/// Camera-use authorization state as granted by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not yet determined; the user has never been asked
    Unknown,
    /// The user granted camera access
    Granted,
    /// The user denied camera access (or the platform API failed)
    Denied,
}

impl PermissionState {
    /// Whether scanning may proceed.
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}
