//! Runtime configuration for followers and synchronizer waits.
//!
//! Both structs are plain data with public fields and `Default` impls.
//! Applications typically load them from JSON (with the `serde` feature) and
//! call `validate()` before handing them to the runtime.

use std::time::Duration;

use crate::{PfError, PfResult};

// ── FollowerConfig ────────────────────────────────────────────────────────────

/// Tuning knobs for a path-following task.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FollowerConfig {
    /// Interval between readiness checks, in milliseconds.  Default: 500.
    pub poll_interval_ms: u64,

    /// Upper bound on a single readiness wait.  `None` waits until the
    /// environment is ready or the task is cancelled.
    pub max_ready_wait_ms: Option<u64>,

    /// Worker threads are named `<prefix>-<task id>`.
    pub thread_name_prefix: String,
}

impl FollowerConfig {
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

    #[inline]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[inline]
    pub fn max_ready_wait(&self) -> Option<Duration> {
        self.max_ready_wait_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> PfResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(PfError::Config("poll_interval_ms must be positive".into()));
        }
        if self.max_ready_wait_ms == Some(0) {
            return Err(PfError::Config("max_ready_wait_ms must be positive when set".into()));
        }
        if self.thread_name_prefix.is_empty() {
            return Err(PfError::Config("thread_name_prefix must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms:   Self::DEFAULT_POLL_INTERVAL_MS,
            max_ready_wait_ms:  None,
            thread_name_prefix: "path-follower".to_string(),
        }
    }
}

// ── WaitConfig ────────────────────────────────────────────────────────────────

/// Deadline and backoff for blocking waits on external readiness conditions.
///
/// A wait retries after `initial_backoff_ms`, doubling the delay on every
/// retry up to `max_backoff_ms`, and gives up once `timeout_ms` has elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaitConfig {
    pub timeout_ms:         u64,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms:     u64,
}

impl WaitConfig {
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay before retry number `attempt` (0-based), capped at
    /// `max_backoff_ms`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(32);
        let ms = self.initial_backoff_ms.saturating_mul(factor).min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }

    pub fn validate(&self) -> PfResult<()> {
        if self.timeout_ms == 0 {
            return Err(PfError::Config("timeout_ms must be positive".into()));
        }
        if self.initial_backoff_ms == 0 {
            return Err(PfError::Config("initial_backoff_ms must be positive".into()));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(PfError::Config(format!(
                "initial_backoff_ms ({}) exceeds max_backoff_ms ({})",
                self.initial_backoff_ms, self.max_backoff_ms
            )));
        }
        Ok(())
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms:         10_000,
            initial_backoff_ms: 50,
            max_backoff_ms:     1_000,
        }
    }
}
