//! End-to-end demo of the scan-to-verification flow.
//!
//! Wires a scripted camera authority and an in-memory store through the
//! session controller, then prints what the result presenter would render.
//!
//! ```sh
//! cargo run --example verify_flow
//! ```

use certscan_core::{AppConfig, CertscanError, Platform, ScanEvent, Symbology};
use certscan_permissions::{PermissionGate, ScriptedAuthority};
use certscan_scanner::{presenter, ScanSessionController};
use certscan_store::{FirstLaunchTracker, Store};
use std::sync::Arc;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,certscan=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), CertscanError> {
    init_tracing();

    let config = AppConfig::load_with_env()?;

    // The demo speaks the iOS scanning dialect unless overridden.
    let platform = match config.resolved_platform() {
        Platform::Other => Platform::Ios,
        platform => platform,
    };
    info!(%platform, "starting demo flow");

    let store = Arc::new(Store::in_memory().await?);
    let tracker = FirstLaunchTracker::new(store, config.io_timeout());
    let gate = Arc::new(PermissionGate::new(Arc::new(ScriptedAuthority::granted())));

    let mut controller = ScanSessionController::new(platform, gate, tracker);

    controller.start_scan().await;
    if let Some(hint) = controller.take_onboarding_hint() {
        println!("hint: {hint}");
    }
    println!("notice: {}", presenter::SCANNING_NOTICE);

    // What the external scanning capability would deliver for an
    // identity-card barcode on iOS.
    controller.scan_captured(ScanEvent::new(
        Symbology::name("org.iso.Code128"),
        "11912534422",
    ));

    match controller.verification_link() {
        Some(link) => {
            println!("verification link: {link}");
            println!("embed fragment:\n{}", presenter::render_embed(link));
        }
        None => {
            if let Some(message) = presenter::blocking_message(controller.state()) {
                println!("alert: {message}");
            }
        }
    }

    controller.reset();
    info!(state = ?controller.state(), "demo flow finished");
    Ok(())
}
