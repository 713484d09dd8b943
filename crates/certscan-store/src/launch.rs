//! First-launch tracking.
//!
//! A single persisted boolean gates the one-time onboarding hint. The
//! contract is deliberately asymmetric: the flag is set on the first
//! successful read-miss and never reset, and every failure path returns
//! `false` (fail open) so the hint is never shown twice on ambiguous state
//! and persistence trouble never blocks the main flow.

use crate::connection::Store;
use crate::error::StoreError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Settings key under which the launch record is persisted.
pub const LAUNCH_FLAG_KEY: &str = "hasLaunched";

/// Persisted one-shot flag gating the onboarding hint.
#[derive(Debug, Clone)]
pub struct FirstLaunchTracker {
    store: Arc<Store>,
    io_timeout: Duration,
    settled: Arc<AtomicBool>,
}

impl FirstLaunchTracker {
    /// Create a tracker over the given store.
    ///
    /// `io_timeout` bounds each read and write; operations beyond it are
    /// treated as failures.
    #[must_use]
    pub fn new(store: Arc<Store>, io_timeout: Duration) -> Self {
        Self {
            store,
            io_timeout,
            settled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Consume the first-launch flag.
    ///
    /// Returns `true` exactly once per installation: on the first call that
    /// both misses the stored flag and durably writes it. Every later call
    /// returns `false`, including after process restarts. Read or write
    /// failures (including timeouts) return `false` and are only logged.
    ///
    /// The store is consulted at most once per process; after the first call
    /// settles, later calls short-circuit without I/O.
    ///
    /// The read-then-write is not transactional; a lost update can at worst
    /// show the hint one extra time, never corrupt state.
    pub async fn consume_first_launch(&self) -> bool {
        if self.settled.swap(true, Ordering::AcqRel) {
            return false;
        }

        let existing = match self.bounded(self.store.get_setting(LAUNCH_FLAG_KEY)).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read launch record, assuming launched");
                return false;
            }
        };

        if existing.is_some() {
            tracing::debug!("launch record present, not first launch");
            return false;
        }

        let write = self
            .bounded(self.store.set_setting(LAUNCH_FLAG_KEY, &serde_json::json!(true)))
            .await;

        match write {
            Ok(()) => {
                tracing::info!("first launch recorded");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist launch record, assuming launched");
                false
            }
        }
    }

    /// Run a store operation under the configured I/O bound.
    async fn bounded<T>(
        &self,
        op: impl std::future::Future<Output = crate::error::Result<T>>,
    ) -> crate::error::Result<T> {
        timeout(self.io_timeout, op)
            .await
            .map_err(|_| StoreError::Timeout(self.io_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TIMEOUT: Duration = Duration::from_millis(2000);

    #[tokio::test]
    async fn test_first_launch_consumed_once() {
        let store = Arc::new(Store::in_memory().await.expect("create store"));
        let tracker = FirstLaunchTracker::new(store, TEST_TIMEOUT);

        assert!(tracker.consume_first_launch().await);
        assert!(!tracker.consume_first_launch().await);
    }

    #[tokio::test]
    async fn test_restart_returns_false() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("certscan.db");

        {
            let store = Arc::new(Store::open(&path).await.expect("open store"));
            let tracker = FirstLaunchTracker::new(store, TEST_TIMEOUT);
            assert!(tracker.consume_first_launch().await);
        }

        // Simulated restart: a fresh store over the same file.
        let store = Arc::new(Store::open(&path).await.expect("reopen store"));
        let tracker = FirstLaunchTracker::new(store, TEST_TIMEOUT);
        assert!(!tracker.consume_first_launch().await);
    }

    #[tokio::test]
    async fn test_fails_open_on_store_error() {
        let store = Store::in_memory().await.expect("create store");
        let pool = store.pool().clone();
        let store = Arc::new(store);
        let tracker = FirstLaunchTracker::new(store, TEST_TIMEOUT);

        // Closing the pool makes every query fail; the tracker must swallow
        // that and report "not first launch".
        pool.close().await;
        assert!(!tracker.consume_first_launch().await);
    }

    #[tokio::test]
    async fn test_flag_value_ignored_once_present() {
        let store = Arc::new(Store::in_memory().await.expect("create store"));
        store
            .set_setting(LAUNCH_FLAG_KEY, &serde_json::json!(false))
            .await
            .expect("seed flag");

        // Any persisted value means the installation has launched before.
        let tracker = FirstLaunchTracker::new(store, TEST_TIMEOUT);
        assert!(!tracker.consume_first_launch().await);
    }
}
