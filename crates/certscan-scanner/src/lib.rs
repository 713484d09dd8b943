//! Certscan Scanner - The scan-to-verification workflow.
//!
//! This crate is the core of the identity-card verification flow: it
//! decides whether a captured barcode is acceptable for the running
//! platform, turns an accepted payload into a safe verification link, and
//! drives the single scan session through its states. Rendering is an
//! external collaborator; the [`presenter`] module defines the read-only
//! snapshot and embed fragment handed to it.
//!
//! # Flow
//!
//! 1. `start_scan` consults the permission gate; denial parks the session
//!    in `AwaitingPermission` with a settings-redirect affordance.
//! 2. The first ever entry into `Scanning` consumes the persisted
//!    first-launch flag and schedules a one-time instructional hint.
//! 3. `scan_captured` validates the symbology against the platform table,
//!    builds the verification link, and settles the session in `Accepted`
//!    or `Rejected`. One decision per session: later captures are ignored.
//! 4. `reset` returns a terminal session to `Idle`; `cancel` abandons a
//!    live one.
//!
//! # Example
//!
//! ```rust,ignore
//! use certscan_scanner::ScanSessionController;
//!
//! let mut controller = ScanSessionController::new(platform, gate, tracker);
//! controller.start_scan().await;
//! controller.scan_captured(event);
//! if let Some(link) = controller.verification_link() {
//!     println!("{}", certscan_scanner::presenter::render_embed(link));
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod link;
pub mod presenter;
pub mod session;
pub mod validator;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use link::{build_verification_link, VerificationLink};
pub use presenter::SessionSnapshot;
pub use session::{RejectReason, ScanSessionController, SessionState};
pub use validator::is_acceptable;
