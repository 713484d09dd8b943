//! Verification link construction.
//!
//! An accepted scan payload becomes a URL on the verification service.
//! The template must match the service byte-for-byte, and the payload is
//! restricted to `[A-Za-z0-9]` because downstream the link is interpolated
//! into markup rather than passed through a safe URL API. Percent-encoding
//! on top of that restriction is deliberate defense-in-depth, not an
//! optional nicety.

use crate::error::{Result, ScanError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const TEMPLATE_HEAD: &str = "https://iccw.us/iccw/admin/view-certificate/";
const TEMPLATE_TAIL: &str = "/21?table=true";

/// A verification-service URL derived from an accepted scan payload.
///
/// Immutable once built; a new payload produces a new link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationLink(String);

impl VerificationLink {
    /// Get the URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the verification link for a scanned identifier.
///
/// # Errors
/// Returns [`ScanError::InvalidPayload`] when the payload is empty or
/// contains anything outside `[A-Za-z0-9]`.
pub fn build_verification_link(payload: &str) -> Result<VerificationLink> {
    static PAYLOAD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        PAYLOAD_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

    if payload.is_empty() {
        return Err(ScanError::InvalidPayload {
            reason: "payload is empty".to_string(),
        });
    }

    if !regex.is_match(payload) {
        return Err(ScanError::InvalidPayload {
            reason: format!("payload must be alphanumeric, got '{payload}'"),
        });
    }

    let encoded = urlencoding::encode(payload);
    Ok(VerificationLink(format!(
        "{TEMPLATE_HEAD}{encoded}{TEMPLATE_TAIL}"
    )))
}
