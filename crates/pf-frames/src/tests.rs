//! Unit tests for pf-frames.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pf_core::WaitConfig;

use crate::{FrameDriver, SyncError, SyncResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn quick_wait(timeout_ms: u64) -> WaitConfig {
    WaitConfig { timeout_ms, initial_backoff_ms: 1, max_backoff_ms: 5 }
}

/// Records driver calls; the queue drains and frames load after a set number
/// of polls.
#[derive(Default)]
struct ScriptedDriver {
    busy_polls:    AtomicUsize,
    loading_polls: AtomicUsize,
    never_loads:   bool,
    fail_switch:   bool,
    calls:         Mutex<Vec<String>>,
}

impl ScriptedDriver {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn countdown(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_err()
}

impl FrameDriver for ScriptedDriver {
    fn event_queue_empty(&self) -> bool {
        let empty = countdown(&self.busy_polls);
        if empty {
            self.log("drained".into());
        }
        empty
    }

    fn switch_to_default(&self) -> SyncResult<()> {
        self.log("default".into());
        Ok(())
    }

    fn switch_to_frame(&self, name: &str) -> SyncResult<()> {
        if self.fail_switch {
            return Err(SyncError::Driver(format!("no frame named {name}")));
        }
        self.log(format!("frame:{name}"));
        Ok(())
    }

    fn is_present(&self, selector: &str) -> bool {
        if self.never_loads {
            return false;
        }
        let present = countdown(&self.loading_polls);
        if present {
            self.log(format!("present:{selector}"));
        }
        present
    }
}

// ── wait_until ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wait {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::wait_until;

    #[test]
    fn immediate_success_checks_once() {
        let mut checks = 0;
        wait_until("nothing", || { checks += 1; true }, &quick_wait(100)).unwrap();
        assert_eq!(checks, 1);
    }

    #[test]
    fn retries_until_condition_holds() {
        let mut checks = 0;
        wait_until("third check", || { checks += 1; checks == 3 }, &quick_wait(1_000)).unwrap();
        assert_eq!(checks, 3);
    }

    #[test]
    fn times_out_near_deadline() {
        let started = Instant::now();
        let err = wait_until("never", || false, &quick_wait(40)).unwrap_err();
        let elapsed = started.elapsed();
        match err {
            SyncError::Timeout { what, waited } => {
                assert_eq!(what, "never");
                assert!(waited >= Duration::from_millis(40));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(elapsed < Duration::from_millis(500), "overran: {elapsed:?}");
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = WaitConfig { timeout_ms: 0, ..WaitConfig::default() };
        assert!(matches!(wait_until("x", || true, &bad), Err(SyncError::Config(_))));
    }
}

// ── Frame table ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod frame {
    use std::collections::HashSet;

    use crate::Frame;

    #[test]
    fn names_and_selectors_are_distinct() {
        let names: HashSet<_> = Frame::ALL.iter().map(|f| f.name()).collect();
        let selectors: HashSet<_> = Frame::ALL.iter().map(|f| f.ready_selector()).collect();
        assert_eq!(names.len(), Frame::ALL.len());
        assert_eq!(selectors.len(), Frame::ALL.len());
    }

    #[test]
    fn display_is_name() {
        assert_eq!(Frame::Map.to_string(), Frame::Map.name());
    }
}

// ── FrameManager ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod manager {
    use super::*;
    use crate::{Frame, FrameManager};

    #[test]
    fn drains_then_switches_then_waits_for_content() {
        let driver = ScriptedDriver {
            busy_polls: AtomicUsize::new(2),
            loading_polls: AtomicUsize::new(3),
            ..ScriptedDriver::default()
        };
        let manager = FrameManager::with_wait(driver, quick_wait(1_000)).unwrap();
        manager.switch_to(Frame::Map).unwrap();

        assert_eq!(
            manager.driver().calls(),
            vec![
                "drained".to_string(),
                "default".to_string(),
                format!("frame:{}", Frame::Map.name()),
                format!("present:{}", Frame::Map.ready_selector()),
            ]
        );
    }

    #[test]
    fn frame_that_never_loads_times_out() {
        let driver = ScriptedDriver { never_loads: true, ..ScriptedDriver::default() };
        let manager = FrameManager::with_wait(driver, quick_wait(30)).unwrap();
        let err = manager.switch_to(Frame::Item).unwrap_err();
        assert!(matches!(err, SyncError::Timeout { ref what, .. } if what.contains("itemFrame")));
    }

    #[test]
    fn driver_errors_propagate() {
        let driver = ScriptedDriver { fail_switch: true, ..ScriptedDriver::default() };
        let manager = FrameManager::with_wait(driver, quick_wait(100)).unwrap();
        assert!(matches!(manager.switch_to(Frame::Main), Err(SyncError::Driver(_))));
    }
}
