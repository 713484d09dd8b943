//! Permission gate folding platform failures into plain grant states.

use crate::{CameraAuthority, PermissionState};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Gate in front of the host platform's camera authorization API.
///
/// The gate is the only component that talks to the [`CameraAuthority`];
/// everything downstream sees [`PermissionState`] and nothing else. A
/// failing or missing platform API is treated as `Denied` (fail closed)
/// rather than propagated.
pub struct PermissionGate {
    authority: Arc<dyn CameraAuthority>,
    observed: RwLock<PermissionState>,
}

impl PermissionGate {
    /// Create a gate over the given authority.
    pub fn new(authority: Arc<dyn CameraAuthority>) -> Self {
        Self {
            authority,
            observed: RwLock::new(PermissionState::Unknown),
        }
    }

    /// Non-mutating probe of the current grant.
    ///
    /// Never shows UI; safe to call repeatedly. Authority failures read as
    /// `Denied`.
    pub async fn query_permission(&self) -> PermissionState {
        let state = match self.authority.query().await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "permission query failed, failing closed");
                PermissionState::Denied
            }
        };
        self.record(state);
        state
    }

    /// Trigger the OS consent prompt and wait for the user's answer.
    ///
    /// Shows the prompt exactly once per invocation. Authority failures
    /// read as `Denied`.
    pub async fn request_permission(&self) -> PermissionState {
        debug!("requesting camera permission");
        let state = match self.authority.request().await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "permission request failed, failing closed");
                PermissionState::Denied
            }
        };
        info!(?state, "camera permission prompt resolved");
        self.record(state);
        state
    }

    /// Hand control to the OS settings surface.
    ///
    /// There is no completion callback: the grant may have changed by the
    /// time the app resumes, so the cached observation drops back to
    /// `Unknown` and the caller must [`refresh`](Self::refresh).
    pub fn open_platform_settings(&self) {
        info!("redirecting to platform settings");
        self.authority.open_settings();
        self.record(PermissionState::Unknown);
    }

    /// Re-query the grant after resuming from a settings round trip.
    pub async fn refresh(&self) -> PermissionState {
        debug!("re-querying camera permission on resume");
        self.query_permission().await
    }

    /// The most recently observed grant state.
    #[must_use]
    pub fn last_observed(&self) -> PermissionState {
        *self.observed.read().expect("observed state lock poisoned")
    }

    fn record(&self, state: PermissionState) {
        *self.observed.write().expect("observed state lock poisoned") = state;
    }
}
