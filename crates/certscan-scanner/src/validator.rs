//! Platform-aware barcode symbology validation.
//!
//! Identity-card barcodes are printed in Code128; anything else (QR, EAN,
//! ...) must be rejected outright rather than silently mis-parsed. The
//! same physical barcode reports a different symbology identifier depending
//! on the host platform's scanning backend, so acceptance is a two-row
//! table keyed by [`Platform`].

use certscan_core::{Platform, Symbology};

/// Vendor-internal numeric constant the Android backend reports for Code128.
pub const ANDROID_CODE128: i64 = 1;

/// Reverse-DNS name the iOS backend reports for Code128.
pub const IOS_CODE128: &str = "org.iso.Code128";

/// Whether a captured code's symbology is acceptable on `platform`.
///
/// Pure and total: never fails, and any platform outside the table (or a
/// symbology shape the platform's backend would never produce) is `false`.
#[must_use]
pub fn is_acceptable(platform: Platform, symbology: &Symbology) -> bool {
    match (platform, symbology) {
        (Platform::Android, Symbology::Code(code)) => *code == ANDROID_CODE128,
        (Platform::Ios, Symbology::Name(name)) => name == IOS_CODE128,
        _ => false,
    }
}
