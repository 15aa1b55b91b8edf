//! Blocking waits on external conditions.

use std::thread;
use std::time::Instant;

use tracing::trace;

use pf_core::WaitConfig;

use crate::{SyncError, SyncResult};

/// Block until `condition` returns `true` or `config.timeout()` elapses.
///
/// The condition is evaluated once immediately, then after each backoff
/// delay (see [`WaitConfig::backoff`]).  The last sleep is shortened so the
/// wait never overruns its deadline; one final check runs at the deadline.
///
/// `what` names the condition in logs and in the timeout error.
pub fn wait_until<F>(what: &str, mut condition: F, config: &WaitConfig) -> SyncResult<()>
where
    F: FnMut() -> bool,
{
    config.validate()?;
    let started = Instant::now();
    let deadline = started + config.timeout();
    let mut attempt = 0u32;

    loop {
        if condition() {
            trace!(what = what, attempts = attempt + 1, "condition met");
            return Ok(());
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(SyncError::Timeout {
                what:   what.to_string(),
                waited: now - started,
            });
        }
        thread::sleep(config.backoff(attempt).min(deadline - now));
        attempt = attempt.saturating_add(1);
    }
}
