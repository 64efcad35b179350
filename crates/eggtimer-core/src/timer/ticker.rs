//! Periodic tick sources.
//!
//! A [`TickSource`] arms a one-second repeating timer and hands back a
//! [`TickHandle`]. The timer stays alive exactly as long as the handle:
//! dropping it cancels the timer. The controller keeps at most one handle
//! and drops it on every transition that stops the countdown.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};
use tracing::trace;

/// One elapsed second, stamped with the generation of the handle that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Owned token for an armed timer. Cancels the timer on drop.
pub struct TickHandle {
    generation: u64,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TickHandle {
    pub fn new(generation: u64, cancel: impl FnOnce() + 'static) -> Self {
        Self {
            generation,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            trace!(generation = self.generation, "tick timer cancelled");
            cancel();
        }
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("generation", &self.generation)
            .finish()
    }
}

pub trait TickSource {
    /// Arm a repeating one-second timer whose ticks carry `generation`.
    fn arm(&mut self, generation: u64) -> TickHandle;
}

#[derive(Debug, Default)]
struct ManualState {
    armed: Option<u64>,
    times_armed: u32,
}

/// Tick source that never fires on its own. Tests drive the controller's
/// `tick()` directly and use this to observe whether a timer is armed.
#[derive(Debug, Clone, Default)]
pub struct ManualTickSource {
    state: Rc<RefCell<ManualState>>,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.state.borrow().armed.is_some()
    }

    pub fn armed_generation(&self) -> Option<u64> {
        self.state.borrow().armed
    }

    pub fn times_armed(&self) -> u32 {
        self.state.borrow().times_armed
    }
}

impl TickSource for ManualTickSource {
    fn arm(&mut self, generation: u64) -> TickHandle {
        {
            let mut state = self.state.borrow_mut();
            state.armed = Some(generation);
            state.times_armed += 1;
        }
        let state = Rc::clone(&self.state);
        TickHandle::new(generation, move || {
            let mut state = state.borrow_mut();
            if state.armed == Some(generation) {
                state.armed = None;
            }
        })
    }
}

/// Wall-clock tick source backed by a tokio interval task.
///
/// Ticks are delivered over the channel returned from [`IntervalTickSource::new`].
/// `arm` must be called from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalTickSource {
    tx: mpsc::UnboundedSender<Tick>,
    period: Duration,
}

impl IntervalTickSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, period }, rx)
    }
}

impl TickSource for IntervalTickSource {
    fn arm(&mut self, generation: u64) -> TickHandle {
        let tx = self.tx.clone();
        let period = self.period;
        // Default burst behaviour: a stalled runtime catches up on missed
        // seconds so the countdown tracks wall-clock time.
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });
        TickHandle::new(generation, move || task.abort())
    }
}
