//! A simulated session for the demo.
//!
//! Moves land after a fixed latency, the mover is randomly busy, and the
//! map frame takes a few polls to appear, which is enough to exercise every
//! wait in the follower and the frame manager.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use pf_core::{MoveType, Position};
use pf_frames::{Frame, FrameDriver, SyncError, SyncResult};
use pf_movement::{Inventory, Locator, Mover};

pub struct SimWorld {
    state:        Mutex<WorldState>,
    rng:          Mutex<SmallRng>,
    latency:      Duration,
    busy_chance:  f64,
}

struct WorldState {
    pos:            Position,
    /// A move that has been issued but not yet registered.
    pending:        Option<(Position, Instant)>,
    items_used:     u32,
    queued_events:  u32,
    frame:          Option<String>,
    frame_loading:  u32,
}

impl SimWorld {
    pub fn new(start: Position, seed: u64, latency: Duration, busy_chance: f64) -> Self {
        Self {
            state: Mutex::new(WorldState {
                pos:           start,
                pending:       None,
                items_used:    0,
                queued_events: 3,
                frame:         None,
                frame_loading: 0,
            }),
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
            latency,
            busy_chance,
        }
    }

    pub fn items_used(&self) -> u32 {
        self.lock().items_used
    }

    pub fn position(&self) -> Position {
        self.current_position()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WorldState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Issue a move that registers after `latency`.
    fn schedule(&self, state: &mut WorldState, destination: Position) {
        state.pending = Some((destination, Instant::now() + self.latency));
    }
}

impl WorldState {
    fn settle(&mut self) {
        if let Some((dest, at)) = self.pending {
            if Instant::now() >= at {
                self.pos = dest;
                self.pending = None;
            }
        }
    }
}

impl Locator for SimWorld {
    fn current_position(&self) -> Position {
        let mut state = self.lock();
        state.settle();
        state.pos
    }
}

impl Mover for SimWorld {
    fn can_move(&self) -> bool {
        let mut state = self.lock();
        state.settle();
        if state.pending.is_some() {
            return false;
        }
        let busy = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .gen_bool(self.busy_chance);
        !busy
    }

    fn move_to(&self, source: Position, destination: Position) -> bool {
        let mut state = self.lock();
        state.settle();
        if state.pending.is_some() || state.pos != source || !source.is_adjacent(destination) {
            return false;
        }
        self.schedule(&mut state, destination);
        true
    }
}

impl Inventory for SimWorld {
    fn use_item_for_move(&self, kind: MoveType, source: Position, destination: Position) -> bool {
        let mut state = self.lock();
        state.settle();
        if state.pos != source {
            return false;
        }
        state.items_used += 1;
        if kind == MoveType::Teleport {
            self.schedule(&mut state, destination);
        }
        true
    }
}

impl FrameDriver for SimWorld {
    fn event_queue_empty(&self) -> bool {
        let mut state = self.lock();
        state.queued_events = state.queued_events.saturating_sub(1);
        state.queued_events == 0
    }

    fn switch_to_default(&self) -> SyncResult<()> {
        self.lock().frame = None;
        Ok(())
    }

    fn switch_to_frame(&self, name: &str) -> SyncResult<()> {
        if !Frame::ALL.iter().any(|f| f.name() == name) {
            return Err(SyncError::Driver(format!("no frame named {name:?}")));
        }
        let mut state = self.lock();
        state.frame = Some(name.to_string());
        state.frame_loading = 2;
        Ok(())
    }

    fn is_present(&self, selector: &str) -> bool {
        let mut state = self.lock();
        if state.frame_loading > 0 {
            state.frame_loading -= 1;
            return false;
        }
        Frame::ALL
            .iter()
            .any(|f| state.frame.as_deref() == Some(f.name()) && f.ready_selector() == selector)
    }
}
