//! The platform authorization seam.

use crate::{PermissionError, PermissionState, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Host platform camera authorization API.
///
/// Implementations bridge to the OS: probing the current grant, showing
/// the consent prompt, and handing control to the settings surface. The
/// prompt suspends until the user responds; there is no enforced timeout
/// (human-interaction latency is unbounded).
#[async_trait]
pub trait CameraAuthority: Send + Sync {
    /// Non-mutating probe of the current grant. Safe to call repeatedly;
    /// never shows UI.
    async fn query(&self) -> Result<PermissionState>;

    /// Show the OS consent prompt exactly once and wait for the answer.
    async fn request(&self) -> Result<PermissionState>;

    /// Hand control to the OS settings surface.
    ///
    /// Fire-and-forget: the app is backgrounded and there is no callback,
    /// so callers must re-query when they resume.
    fn open_settings(&self);
}

/// Scripted authority for tests and demos.
///
/// Responses are set up front and can be changed between calls (e.g. to
/// simulate the user flipping the grant in the settings app). Prompt and
/// settings invocations are counted so tests can assert on them.
#[derive(Debug)]
pub struct ScriptedAuthority {
    query_response: Mutex<Result<PermissionState>>,
    request_response: Mutex<Result<PermissionState>>,
    requests: AtomicUsize,
    settings_opens: AtomicUsize,
}

impl ScriptedAuthority {
    /// Authority reporting the given state for both query and request.
    #[must_use]
    pub fn with_state(state: PermissionState) -> Self {
        Self {
            query_response: Mutex::new(Ok(state)),
            request_response: Mutex::new(Ok(state)),
            requests: AtomicUsize::new(0),
            settings_opens: AtomicUsize::new(0),
        }
    }

    /// Authority with camera access already granted.
    #[must_use]
    pub fn granted() -> Self {
        Self::with_state(PermissionState::Granted)
    }

    /// Authority with camera access denied.
    #[must_use]
    pub fn denied() -> Self {
        Self::with_state(PermissionState::Denied)
    }

    /// Authority that has never been asked; the prompt resolves to
    /// `outcome`.
    #[must_use]
    pub fn undetermined(outcome: PermissionState) -> Self {
        Self {
            query_response: Mutex::new(Ok(PermissionState::Unknown)),
            request_response: Mutex::new(Ok(outcome)),
            requests: AtomicUsize::new(0),
            settings_opens: AtomicUsize::new(0),
        }
    }

    /// Authority whose platform API fails outright.
    #[must_use]
    pub fn unavailable(reason: &str) -> Self {
        let err = PermissionError::Unavailable(reason.to_string());
        Self {
            query_response: Mutex::new(Err(err.clone())),
            request_response: Mutex::new(Err(err)),
            requests: AtomicUsize::new(0),
            settings_opens: AtomicUsize::new(0),
        }
    }

    /// Change the grant reported by subsequent queries, simulating the
    /// user toggling it in the settings app.
    pub fn set_query(&self, state: PermissionState) {
        *self
            .query_response
            .lock()
            .expect("query response lock poisoned") = Ok(state);
    }

    /// Number of consent prompts shown so far.
    #[must_use]
    pub fn prompts_shown(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of settings redirects issued so far.
    #[must_use]
    pub fn settings_opened(&self) -> usize {
        self.settings_opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraAuthority for ScriptedAuthority {
    async fn query(&self) -> Result<PermissionState> {
        self.query_response
            .lock()
            .expect("query response lock poisoned")
            .clone()
    }

    async fn request(&self) -> Result<PermissionState> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.request_response
            .lock()
            .expect("request response lock poisoned")
            .clone()
    }

    fn open_settings(&self) {
        self.settings_opens.fetch_add(1, Ordering::SeqCst);
    }
}
