//! The scan session state machine.
//!
//! Exactly one [`SessionState`] lives inside the controller and is mutated
//! only through its intent methods, so impossible combinations ("scanned
//! but no payload") cannot be represented. A verification link exists if
//! and only if the session is `Accepted`.
//!
//! All transitions run sequentially on the control thread; the methods
//! that suspend (`start_scan`, `resumed`) do so for permission prompts and
//! bounded launch-record I/O, never indefinitely for local work.

use crate::error::ScanError;
use crate::link::{self, VerificationLink};
use crate::presenter::{self, SessionSnapshot};
use crate::validator;
use certscan_core::{Platform, ScanEvent, SessionId};
use certscan_permissions::{PermissionGate, PermissionState};
use certscan_store::FirstLaunchTracker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why a scan attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The barcode was not a Code128 identity-card barcode
    UnsupportedSymbology,
    /// The decoded payload cannot be embedded in a verification link
    InvalidPayload,
}

/// State of the single scan session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No session in progress
    Idle,
    /// Camera access is denied or undetermined; a settings redirect (or a
    /// pending consent prompt) stands between the user and scanning
    AwaitingPermission,
    /// The scanning surface is live, waiting for a capture
    Scanning,
    /// A capture was validated and a verification link built
    Accepted {
        /// The link the result presenter should load
        link: VerificationLink,
    },
    /// The capture was rejected; an explicit restart is required
    Rejected {
        /// Why the capture was rejected
        reason: RejectReason,
    },
    /// The user abandoned the session
    Cancelled,
}

impl SessionState {
    /// Whether the session has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Accepted { .. } | Self::Rejected { .. } | Self::Cancelled
        )
    }

    /// Whether a new `start_scan` intent is accepted from this state.
    #[must_use]
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle) || self.is_terminal()
    }
}

/// Orchestrates one scan session at a time.
///
/// Consults the permission gate, the first-launch tracker, the symbology
/// table, and the link builder; everything the UI needs flows out as a
/// read-only [`SessionSnapshot`].
pub struct ScanSessionController {
    platform: Platform,
    gate: Arc<PermissionGate>,
    first_launch: FirstLaunchTracker,
    session_id: SessionId,
    state: SessionState,
    pending_hint: Option<String>,
}

impl ScanSessionController {
    /// Create a controller for the given platform and collaborators.
    #[must_use]
    pub fn new(
        platform: Platform,
        gate: Arc<PermissionGate>,
        first_launch: FirstLaunchTracker,
    ) -> Self {
        Self {
            platform,
            gate,
            first_launch,
            session_id: SessionId::generate(),
            state: SessionState::Idle,
            pending_hint: None,
        }
    }

    /// Start a new scan session.
    ///
    /// Accepted only from `Idle` or a terminal state; anywhere else this is
    /// a no-op. Queries the permission gate, asking the user once if the
    /// grant was never determined. A denial parks the session in
    /// [`SessionState::AwaitingPermission`] with the settings-redirect
    /// affordance; it does not auto-retry.
    pub async fn start_scan(&mut self) -> &SessionState {
        if !self.state.can_start() {
            debug!(
                session = %self.session_id,
                state = ?self.state,
                "ignoring start intent, session already active"
            );
            return &self.state;
        }

        self.session_id = SessionId::generate();
        info!(session = %self.session_id, platform = %self.platform, "starting scan session");

        let mut permission = self.gate.query_permission().await;
        if permission == PermissionState::Unknown {
            // Never asked: show the consent prompt once. The prompt suspends
            // until the user answers; there is no timeout on a human.
            self.enter(SessionState::AwaitingPermission);
            permission = self.gate.request_permission().await;
        }

        if permission.is_granted() {
            self.begin_scanning().await;
        } else {
            warn!(
                session = %self.session_id,
                error = %ScanError::PermissionDenied,
                "awaiting settings redirect"
            );
            if self.state != SessionState::AwaitingPermission {
                self.enter(SessionState::AwaitingPermission);
            }
        }

        &self.state
    }

    /// Hand control to the OS settings surface.
    ///
    /// Only meaningful while `AwaitingPermission`. Fire-and-forget: the
    /// grant may change while the app is backgrounded, so the caller must
    /// invoke [`resumed`](Self::resumed) when control returns.
    pub fn open_platform_settings(&self) {
        if self.state == SessionState::AwaitingPermission {
            self.gate.open_platform_settings();
        } else {
            debug!(
                session = %self.session_id,
                state = ?self.state,
                "ignoring settings redirect outside awaiting-permission state"
            );
        }
    }

    /// Re-check the grant after resuming from a settings round trip.
    ///
    /// There is no completion callback for the round trip, so this is the
    /// only way a parked session can proceed. A grant moves the session to
    /// `Scanning`; anything else leaves it parked.
    pub async fn resumed(&mut self) -> &SessionState {
        if self.state != SessionState::AwaitingPermission {
            debug!(session = %self.session_id, state = ?self.state, "resume with no parked session");
            return &self.state;
        }

        if self.gate.refresh().await.is_granted() {
            self.begin_scanning().await;
        } else {
            debug!(session = %self.session_id, "camera access still denied after settings round trip");
        }

        &self.state
    }

    /// Feed a barcode capture into the session.
    ///
    /// Valid only while `Scanning`; once the session has left that state
    /// every further capture is ignored, so a trailing camera frame cannot
    /// re-trigger validation (at most one decision per session). The event
    /// is consumed either way.
    pub fn scan_captured(&mut self, event: ScanEvent) -> &SessionState {
        if self.state != SessionState::Scanning {
            debug!(
                session = %self.session_id,
                state = ?self.state,
                "ignoring capture outside scanning state"
            );
            return &self.state;
        }

        let outcome = if validator::is_acceptable(self.platform, &event.symbology) {
            link::build_verification_link(&event.payload)
        } else {
            Err(ScanError::UnsupportedSymbology(event.symbology))
        };

        match outcome {
            Ok(link) => {
                info!(session = %self.session_id, link = %link, "scan accepted");
                self.enter(SessionState::Accepted { link });
            }
            Err(err) => {
                let reason = match &err {
                    ScanError::UnsupportedSymbology(_) => RejectReason::UnsupportedSymbology,
                    _ => RejectReason::InvalidPayload,
                };
                // An invalid scan ends the attempt; the user must restart
                // explicitly rather than keep scanning silently.
                warn!(session = %self.session_id, error = %err, "scan rejected");
                self.enter(SessionState::Rejected { reason });
            }
        }

        &self.state
    }

    /// Abandon a live session.
    ///
    /// Valid in `Scanning` and `AwaitingPermission`. The scanning surface
    /// drops straight back to the start screen, so the session passes
    /// through `Cancelled` and settles at `Idle`.
    pub fn cancel(&mut self) -> &SessionState {
        match self.state {
            SessionState::Scanning | SessionState::AwaitingPermission => {
                self.enter(SessionState::Cancelled);
                self.enter(SessionState::Idle);
            }
            _ => {
                debug!(
                    session = %self.session_id,
                    state = ?self.state,
                    "ignoring cancel outside a live session"
                );
            }
        }
        &self.state
    }

    /// Return a terminal session to `Idle`, clearing any verification link.
    pub fn reset(&mut self) -> &SessionState {
        if self.state.is_terminal() {
            self.enter(SessionState::Idle);
        } else {
            debug!(
                session = %self.session_id,
                state = ?self.state,
                "ignoring reset outside terminal state"
            );
        }
        &self.state
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current session identifier.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The verification link, present if and only if the session is
    /// `Accepted`.
    #[must_use]
    pub fn verification_link(&self) -> Option<&VerificationLink> {
        match &self.state {
            SessionState::Accepted { link } => Some(link),
            _ => None,
        }
    }

    /// Whether the settings-redirect affordance should be surfaced.
    #[must_use]
    pub fn needs_settings_redirect(&self) -> bool {
        self.state == SessionState::AwaitingPermission
    }

    /// Take the pending one-time instructional hint, if any.
    ///
    /// Scheduled on the first launch of the installation and handed out at
    /// most once.
    pub fn take_onboarding_hint(&mut self) -> Option<String> {
        self.pending_hint.take()
    }

    /// Read-only snapshot for the result presenter.
    ///
    /// The pending onboarding hint travels with the snapshot exactly once.
    pub fn snapshot(&mut self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            state: self.state.clone(),
            settings_redirect: self.needs_settings_redirect(),
            hint: self.pending_hint.take(),
        }
    }

    /// Enter `Scanning`, consuming the first-launch flag on the way in.
    async fn begin_scanning(&mut self) {
        self.enter(SessionState::Scanning);
        if self.first_launch.consume_first_launch().await {
            self.pending_hint = Some(presenter::ONBOARDING_HINT.to_string());
        }
    }

    fn enter(&mut self, next: SessionState) {
        info!(
            session = %self.session_id,
            from = ?self.state,
            to = ?next,
            "session transition"
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certscan_core::Symbology;
    use certscan_permissions::ScriptedAuthority;
    use certscan_store::Store;
    use std::time::Duration;

    async fn controller_with(
        platform: Platform,
        authority: ScriptedAuthority,
    ) -> ScanSessionController {
        let store = Arc::new(Store::in_memory().await.expect("create store"));
        let tracker = FirstLaunchTracker::new(store, Duration::from_millis(2000));
        let gate = Arc::new(PermissionGate::new(Arc::new(authority)));
        ScanSessionController::new(platform, gate, tracker)
    }

    #[tokio::test]
    async fn test_capture_ignored_while_idle() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        let event = ScanEvent::new(Symbology::name("org.iso.Code128"), "11912534422");
        assert_eq!(controller.scan_captured(event), &SessionState::Idle);
        assert!(controller.verification_link().is_none());
    }

    #[tokio::test]
    async fn test_start_ignored_while_scanning() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        controller.start_scan().await;
        let first_session = controller.session_id().clone();
        assert_eq!(controller.state(), &SessionState::Scanning);

        // A second start intent mid-session must not restart anything.
        controller.start_scan().await;
        assert_eq!(controller.state(), &SessionState::Scanning);
        assert_eq!(controller.session_id(), &first_session);
    }

    #[tokio::test]
    async fn test_at_most_one_decision_per_session() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        controller.start_scan().await;
        controller.scan_captured(ScanEvent::new(
            Symbology::name("org.iso.Code128"),
            "11912534422",
        ));
        let link = controller
            .verification_link()
            .expect("link after accept")
            .clone();

        // A trailing camera frame with a different payload changes nothing.
        controller.scan_captured(ScanEvent::new(
            Symbology::name("org.iso.Code128"),
            "99999999999",
        ));
        assert_eq!(controller.verification_link(), Some(&link));
    }

    #[tokio::test]
    async fn test_unknown_grant_prompts_once() {
        let mut controller = controller_with(
            Platform::Ios,
            ScriptedAuthority::undetermined(PermissionState::Granted),
        )
        .await;

        controller.start_scan().await;
        assert_eq!(controller.state(), &SessionState::Scanning);
    }

    #[tokio::test]
    async fn test_onboarding_hint_scheduled_once() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        controller.start_scan().await;
        assert!(controller.take_onboarding_hint().is_some());
        assert!(controller.take_onboarding_hint().is_none());

        // Later sessions on the same installation never schedule it again.
        controller.cancel();
        controller.start_scan().await;
        assert!(controller.take_onboarding_hint().is_none());
    }

    #[tokio::test]
    async fn test_rejected_requires_explicit_restart() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        controller.start_scan().await;
        controller.scan_captured(ScanEvent::new(Symbology::Code(1), "11912534422"));
        assert_eq!(
            controller.state(),
            &SessionState::Rejected {
                reason: RejectReason::UnsupportedSymbology
            }
        );

        // Still rejected until reset; captures stay ignored.
        controller.scan_captured(ScanEvent::new(
            Symbology::name("org.iso.Code128"),
            "11912534422",
        ));
        assert!(controller.state().is_terminal());

        controller.reset();
        assert_eq!(controller.state(), &SessionState::Idle);
    }

    #[tokio::test]
    async fn test_reset_ignored_while_scanning() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        controller.start_scan().await;
        controller.reset();
        assert_eq!(controller.state(), &SessionState::Scanning);
    }

    #[tokio::test]
    async fn test_cancel_ignored_while_idle() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;
        controller.cancel();
        assert_eq!(controller.state(), &SessionState::Idle);
    }

    #[tokio::test]
    async fn test_snapshot_carries_hint_once() {
        let mut controller = controller_with(Platform::Ios, ScriptedAuthority::granted()).await;

        controller.start_scan().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, SessionState::Scanning);
        assert!(snapshot.hint.is_some());

        let snapshot = controller.snapshot();
        assert!(snapshot.hint.is_none());
    }
}
