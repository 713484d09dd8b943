//! Scan flow error types.
//!
//! Nothing here is fatal: every error resolves to a session state the user
//! can exit via `reset` or `cancel`. Persistence faults never appear in
//! this taxonomy at all — `certscan-store` handles them fail-open — and an
//! unavailable platform permission API surfaces as a plain denial via the
//! gate (fail closed), which lands the session in `AwaitingPermission`.

use certscan_core::Symbology;
use thiserror::Error;

/// Errors arising from a scan attempt.
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// Camera access denied; the user is redirected to settings and the
    /// session is re-enterable.
    #[error("camera access is denied")]
    PermissionDenied,

    /// The captured barcode is not a Code128 identity-card barcode (or was
    /// reported by a platform with no validation contract).
    #[error("unsupported barcode symbology: {0}")]
    UnsupportedSymbology(Symbology),

    /// The scanned payload cannot be embedded in a verification link.
    #[error("invalid scan payload: {reason}")]
    InvalidPayload {
        /// Why the payload was rejected
        reason: String,
    },
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
