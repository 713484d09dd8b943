//! End-to-end tests for the scan-to-verification flow.

use certscan_core::{Platform, ScanEvent, Symbology};
use certscan_permissions::{PermissionGate, PermissionState, ScriptedAuthority};
use certscan_scanner::{
    presenter, RejectReason, ScanSessionController, SessionState,
};
use certscan_store::{FirstLaunchTracker, Store};
use std::sync::Arc;
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_millis(2000);

async fn controller(
    platform: Platform,
    authority: Arc<ScriptedAuthority>,
) -> ScanSessionController {
    let store = Arc::new(Store::in_memory().await.expect("create store"));
    let tracker = FirstLaunchTracker::new(store, IO_TIMEOUT);
    let gate = Arc::new(PermissionGate::new(authority));
    ScanSessionController::new(platform, gate, tracker)
}

#[tokio::test]
async fn granted_ios_scan_accepts_code128_and_resets_clean() {
    let authority = Arc::new(ScriptedAuthority::granted());
    let mut controller = controller(Platform::Ios, authority).await;

    assert_eq!(controller.start_scan().await, &SessionState::Scanning);

    // Fresh installation: the one-time hint is scheduled on first scan.
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.hint.as_deref(), Some(presenter::ONBOARDING_HINT));

    controller.scan_captured(ScanEvent::new(
        Symbology::name("org.iso.Code128"),
        "11912534422",
    ));

    let link = controller.verification_link().expect("accepted link");
    assert_eq!(
        link.as_str(),
        "https://iccw.us/iccw/admin/view-certificate/11912534422/21?table=true"
    );

    let fragment = presenter::render_embed(link);
    assert!(fragment.contains(link.as_str()));

    assert_eq!(controller.reset(), &SessionState::Idle);
    assert!(controller.verification_link().is_none());
}

#[tokio::test]
async fn granted_android_scan_accepts_numeric_code128() {
    let authority = Arc::new(ScriptedAuthority::granted());
    let mut controller = controller(Platform::Android, authority).await;

    controller.start_scan().await;
    controller.scan_captured(ScanEvent::new(Symbology::Code(1), "11912534422"));

    assert!(controller.verification_link().is_some());
}

#[tokio::test]
async fn denied_permission_parks_session_and_cancel_returns_to_idle() {
    let authority = Arc::new(ScriptedAuthority::denied());
    let mut controller = controller(Platform::Ios, authority.clone()).await;

    assert_eq!(
        controller.start_scan().await,
        &SessionState::AwaitingPermission
    );
    assert!(controller.needs_settings_redirect());
    assert_eq!(
        presenter::blocking_message(controller.state()),
        Some(presenter::SETTINGS_REDIRECT)
    );

    assert_eq!(controller.cancel(), &SessionState::Idle);

    // A grant observed after cancellation must not resurrect the session.
    authority.set_query(PermissionState::Granted);
    assert_eq!(controller.resumed().await, &SessionState::Idle);
}

#[tokio::test]
async fn settings_round_trip_resumes_into_scanning() {
    let authority = Arc::new(ScriptedAuthority::denied());
    let mut controller = controller(Platform::Ios, authority.clone()).await;

    controller.start_scan().await;
    assert_eq!(controller.state(), &SessionState::AwaitingPermission);

    controller.open_platform_settings();
    assert_eq!(authority.settings_opened(), 1);

    // User flips the grant in the settings app, then returns.
    authority.set_query(PermissionState::Granted);
    assert_eq!(controller.resumed().await, &SessionState::Scanning);
}

#[tokio::test]
async fn unavailable_platform_api_fails_closed() {
    let authority = Arc::new(ScriptedAuthority::unavailable("no camera service"));
    let mut controller = controller(Platform::Ios, authority).await;

    assert_eq!(
        controller.start_scan().await,
        &SessionState::AwaitingPermission
    );
}

#[tokio::test]
async fn unsupported_symbology_rejects_until_explicit_restart() {
    let authority = Arc::new(ScriptedAuthority::granted());
    let mut controller = controller(Platform::Ios, authority).await;

    controller.start_scan().await;
    controller.scan_captured(ScanEvent::new(Symbology::name("org.iso.QRCode"), "whatever"));

    assert_eq!(
        controller.state(),
        &SessionState::Rejected {
            reason: RejectReason::UnsupportedSymbology
        }
    );
    assert!(presenter::blocking_message(controller.state()).is_some());

    // Restart is allowed straight from the rejected state.
    assert_eq!(controller.start_scan().await, &SessionState::Scanning);
}

#[tokio::test]
async fn invalid_payload_rejects_with_its_own_reason() {
    let authority = Arc::new(ScriptedAuthority::granted());
    let mut controller = controller(Platform::Ios, authority).await;

    controller.start_scan().await;
    controller.scan_captured(ScanEvent::new(
        Symbology::name("org.iso.Code128"),
        "abc/def",
    ));

    assert_eq!(
        controller.state(),
        &SessionState::Rejected {
            reason: RejectReason::InvalidPayload
        }
    );
}

#[tokio::test]
async fn capture_before_start_is_a_no_op() {
    let authority = Arc::new(ScriptedAuthority::granted());
    let mut controller = controller(Platform::Ios, authority).await;

    controller.scan_captured(ScanEvent::new(
        Symbology::name("org.iso.Code128"),
        "11912534422",
    ));
    assert_eq!(controller.state(), &SessionState::Idle);
}

#[tokio::test]
async fn other_platform_rejects_everything() {
    let authority = Arc::new(ScriptedAuthority::granted());
    let mut controller = controller(Platform::Other, authority).await;

    controller.start_scan().await;
    controller.scan_captured(ScanEvent::new(
        Symbology::name("org.iso.Code128"),
        "11912534422",
    ));

    assert_eq!(
        controller.state(),
        &SessionState::Rejected {
            reason: RejectReason::UnsupportedSymbology
        }
    );
}

#[tokio::test]
async fn first_launch_hint_shared_across_controllers_on_one_store() {
    let store = Arc::new(Store::in_memory().await.expect("create store"));
    let authority = Arc::new(ScriptedAuthority::granted());

    let gate = Arc::new(PermissionGate::new(authority.clone()));
    let tracker = FirstLaunchTracker::new(store.clone(), IO_TIMEOUT);
    let mut first = ScanSessionController::new(Platform::Ios, gate, tracker);
    first.start_scan().await;
    assert!(first.take_onboarding_hint().is_some());

    // Same installation, new controller (e.g. after a process restart
    // backed by the same store): no hint.
    let gate = Arc::new(PermissionGate::new(authority));
    let tracker = FirstLaunchTracker::new(store, IO_TIMEOUT);
    let mut second = ScanSessionController::new(Platform::Ios, gate, tracker);
    second.start_scan().await;
    assert!(second.take_onboarding_hint().is_none());
}
