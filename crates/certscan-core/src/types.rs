//! Shared types used across the certscan application.
//!
//! This module defines the common newtypes and enums that give the scan
//! flow its vocabulary: which platform dialect the scanning backend speaks,
//! what a capture event looks like, and how sessions are identified.

use crate::error::CertscanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host platform discriminator.
///
/// The scanning backend reports a different symbology identifier depending
/// on the platform it runs on, so the validation table is keyed by this
/// enum. Anything that is not a known mobile target maps to [`Platform::Other`]
/// and is rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Android scanning backend (vendor-numeric symbology codes)
    Android,
    /// iOS scanning backend (reverse-DNS symbology names)
    Ios,
    /// Any other host; no scanning backend contract is defined
    Other,
}

impl Platform {
    /// Resolve the platform from the compile target.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Other
        }
    }

    /// Resolve the platform from a runtime discriminator string.
    ///
    /// Total by design: unknown discriminators map to [`Platform::Other`]
    /// rather than failing, so validation downstream rejects them.
    #[must_use]
    pub fn from_discriminator(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "android" => Self::Android,
            "ios" => Self::Ios,
            _ => Self::Other,
        }
    }

    /// The canonical discriminator string for this platform.
    #[must_use]
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.discriminator())
    }
}

/// Symbology identifier as reported by a scanning backend.
///
/// The same physical barcode reports either a vendor-internal numeric code
/// (Android) or a reverse-DNS name (iOS). Serialized untagged so capture
/// events arriving as `{"symbology": 1}` or `{"symbology": "org.iso.Code128"}`
/// both deserialize without a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbology {
    /// Vendor-internal numeric constant
    Code(i64),
    /// Reverse-DNS symbology name
    Name(String),
}

impl Symbology {
    /// Build a numeric symbology identifier.
    #[must_use]
    pub fn code(value: i64) -> Self {
        Self::Code(value)
    }

    /// Build a named symbology identifier.
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A single barcode capture produced by the external scanning capability.
///
/// Transient: consumed exactly once by validation and then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    /// Symbology the backend decoded
    pub symbology: Symbology,
    /// Decoded payload text
    pub payload: String,
}

impl ScanEvent {
    /// Create a capture event.
    pub fn new(symbology: Symbology, payload: impl Into<String>) -> Self {
        Self {
            symbology,
            payload: payload.into(),
        }
    }
}

/// Newtype for scan session identifiers.
///
/// Session IDs are UUIDs; a fresh one is assigned each time a session
/// starts so log lines and snapshots can be correlated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a `SessionId` from a string.
    ///
    /// # Errors
    /// Returns an error if the ID is not a valid UUID.
    pub fn new(id: impl Into<String>) -> Result<Self, CertscanError> {
        let id = id.into();
        uuid::Uuid::parse_str(&id).map_err(|e| {
            CertscanError::Validation(format!("invalid session ID '{id}': {e}"))
        })?;
        Ok(Self(id))
    }

    /// Create a new random `SessionId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
