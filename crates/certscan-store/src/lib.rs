//! Certscan Store - Local key-value persistence for the scan flow.
//!
//! This crate provides the small `SQLite`-backed settings store the flow
//! uses for durable one-shot flags, and the [`FirstLaunchTracker`] built on
//! top of it. The store holds nothing secret (a single `hasLaunched`
//! boolean today), so there is no encryption at rest.
//!
//! All launch-record I/O is bounded by a short timeout and fails OPEN: a
//! slow or broken disk must never block the scan flow or surface an error
//! to the user.
//!
//! # Example
//!
//! ```rust,ignore
//! use certscan_store::{FirstLaunchTracker, Store};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(Store::in_memory().await?);
//! let tracker = FirstLaunchTracker::new(store, Duration::from_millis(2000));
//!
//! assert!(tracker.consume_first_launch().await);
//! assert!(!tracker.consume_first_launch().await);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod connection;
mod error;
mod launch;
mod settings;

pub use connection::Store;
pub use error::{Result, StoreError};
pub use launch::{FirstLaunchTracker, LAUNCH_FLAG_KEY};
