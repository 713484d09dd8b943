//! The result-presenter contract.
//!
//! The presenter is an external collaborator: it receives a read-only
//! [`SessionSnapshot`] and renders it. This module defines that snapshot,
//! the embed fragment for an accepted link, and the user-facing message
//! strings the flow surfaces.

use crate::link::VerificationLink;
use crate::session::{RejectReason, SessionState};
use certscan_core::SessionId;
use serde::Serialize;

/// One-time instructional hint shown on the installation's first scan.
pub const ONBOARDING_HINT: &str =
    "Hold the barcode on the back of your identity card up to the camera.";

/// Notice shown whenever the scanning surface opens.
pub const SCANNING_NOTICE: &str =
    "Point the camera at the barcode in the top-left corner of the card's back face.";

/// Message accompanying the settings-redirect affordance.
pub const SETTINGS_REDIRECT: &str = "Camera access is required to scan your identity card. \
     Enable it in your device settings and return to the app.";

/// Read-only view of the session handed to the presenter.
///
/// The pending onboarding hint travels with at most one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Session the snapshot was taken from
    pub session_id: SessionId,
    /// Session state at capture time
    pub state: SessionState,
    /// Whether the settings-redirect affordance should be shown
    pub settings_redirect: bool,
    /// One-time instructional hint, if scheduled and not yet delivered
    pub hint: Option<String>,
}

/// User-facing message for a rejected scan.
#[must_use]
pub fn rejection_message(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::UnsupportedSymbology => {
            "The scanned barcode is not valid. Make sure your identity card is the new \
             format and that you scanned the barcode on the top left of the back face."
        }
        RejectReason::InvalidPayload => {
            "The scanned barcode could not be read. Please try again with the barcode on \
             the back of your identity card."
        }
    }
}

/// The blocking informational message for a state, if it warrants one.
///
/// Every user-visible failure resolves to one of these before control
/// returns to `Idle`; states that are not failures yield `None`.
#[must_use]
pub fn blocking_message(state: &SessionState) -> Option<&'static str> {
    match state {
        SessionState::AwaitingPermission => Some(SETTINGS_REDIRECT),
        SessionState::Rejected { reason } => Some(rejection_message(*reason)),
        _ => None,
    }
}

/// Render the embed fragment for an accepted verification link.
///
/// The fragment fills its container, allows scrolling, and permits
/// `autoplay; encrypted-media`. The link's payload is restricted to
/// alphanumerics and percent-encoded upstream, which is what makes this
/// interpolation safe.
#[must_use]
pub fn render_embed(link: &VerificationLink) -> String {
    format!(
        "<iframe id=\"frame\" style=\"background: rgba(0,0,0,0)\" width=\"100%\" \
         height=\"100%\" scrolling=\"yes\" src=\"{src}\" frameborder=\"0\" \
         allow=\"autoplay; encrypted-media\"></iframe>",
        src = link.as_str()
    )
}
