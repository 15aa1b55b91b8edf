//! Switching between frames.

use std::sync::Arc;

use tracing::debug;

use pf_core::WaitConfig;

use crate::{Frame, SyncResult, wait_until};

/// Low-level access to the session's frames.
///
/// Implemented by whatever drives the remote session (a browser automation
/// client, a test double, a simulator).  Every method may block on the
/// session.
pub trait FrameDriver: Send + Sync {
    /// `true` once every queued input event has been processed.
    fn event_queue_empty(&self) -> bool;

    /// Leave any frame and return to the top-level document.
    fn switch_to_default(&self) -> SyncResult<()>;

    /// Enter the frame called `name`.
    fn switch_to_frame(&self, name: &str) -> SyncResult<()>;

    /// `true` if an element matching `selector` is present in the current
    /// frame.
    fn is_present(&self, selector: &str) -> bool;
}

impl<D: FrameDriver + ?Sized> FrameDriver for Arc<D> {
    fn event_queue_empty(&self) -> bool {
        (**self).event_queue_empty()
    }

    fn switch_to_default(&self) -> SyncResult<()> {
        (**self).switch_to_default()
    }

    fn switch_to_frame(&self, name: &str) -> SyncResult<()> {
        (**self).switch_to_frame(name)
    }

    fn is_present(&self, selector: &str) -> bool {
        (**self).is_present(selector)
    }
}

/// Switches a [`FrameDriver`] between frames safely.
pub struct FrameManager<D: FrameDriver> {
    driver: D,
    wait:   WaitConfig,
}

impl<D: FrameDriver> FrameManager<D> {
    pub fn new(driver: D) -> Self {
        Self { driver, wait: WaitConfig::default() }
    }

    pub fn with_wait(driver: D, wait: WaitConfig) -> SyncResult<Self> {
        wait.validate()?;
        Ok(Self { driver, wait })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Switch to `frame` and wait until it has loaded.
    ///
    /// Queued events are drained first so they are not delivered to the
    /// wrong frame.
    ///
    /// # Errors
    ///
    /// [`SyncError::Timeout`][crate::SyncError::Timeout] if the queue never
    /// drains or the frame never loads; driver errors are passed through.
    pub fn switch_to(&self, frame: Frame) -> SyncResult<()> {
        debug!(%frame, "switching frame");
        wait_until("event queue to drain", || self.driver.event_queue_empty(), &self.wait)?;

        self.driver.switch_to_default()?;
        self.driver.switch_to_frame(frame.name())?;

        let selector = frame.ready_selector();
        wait_until(
            &format!("{frame} to load"),
            || self.driver.is_present(selector),
            &self.wait,
        )
    }
}
