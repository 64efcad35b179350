//! Countdown controller.
//!
//! The controller is a one-second-resolution state machine. It never reads
//! the wall clock: a [`TickSource`] is armed while the countdown runs and
//! the caller feeds its ticks back through [`CountdownController::on_tick`]
//! (or calls [`CountdownController::tick`] directly in tests).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!        Finished
//!
//! any -> Idle   (reset, select)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let (ticks, mut rx) = IntervalTickSource::new();
//! let mut timer = CountdownController::new(HostServices::headless(), ticks);
//! timer.start();
//! while let Some(tick) = rx.recv().await {
//!     if let Some(Event::TimerCompleted { .. }) = timer.on_tick(tick) {
//!         break;
//!     }
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use super::format::format_clock;
use super::ticker::{Tick, TickHandle, TickSource};
use crate::error::Result;
use crate::events::Event;
use crate::host::HostServices;
use crate::preset::{self, Preset};

/// Externally visible phase, derived from the running/finished flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Not started since the last reset or select.
    Idle,
    Running,
    Paused,
    /// Reached zero. Stays here until reset or select.
    Finished,
}

pub struct CountdownController {
    preset: &'static Preset,
    remaining_secs: u32,
    running: bool,
    finished: bool,
    /// Set by `start`, cleared by `reset` and `select`.
    started: bool,
    host: HostServices,
    ticks: Box<dyn TickSource>,
    /// Present exactly while `running` is true.
    ticker: Option<TickHandle>,
    generation: u64,
}

impl CountdownController {
    /// Create a controller on the catalog's default preset.
    pub fn new(host: HostServices, ticks: impl TickSource + 'static) -> Self {
        Self::with_preset(preset::default_preset(), host, ticks)
    }

    pub fn with_preset(
        preset: &'static Preset,
        host: HostServices,
        ticks: impl TickSource + 'static,
    ) -> Self {
        Self {
            preset,
            remaining_secs: preset.duration_secs(),
            running: false,
            finished: false,
            started: false,
            host,
            ticks: Box::new(ticks),
            ticker: None,
            generation: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.preset.duration_secs()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.finished {
            TimerPhase::Finished
        } else if self.started {
            TimerPhase::Paused
        } else {
            TimerPhase::Idle
        }
    }

    /// 0.0 .. 1.0 share of the preset that has elapsed.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn remaining_display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    /// Generation of the armed tick timer, if any.
    pub fn armed_generation(&self) -> Option<u64> {
        self.ticker.as_ref().map(TickHandle::generation)
    }

    pub fn host(&self) -> &HostServices {
        &self.host
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            preset_id: self.preset.id.to_string(),
            preset_name: self.preset.name.to_string(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            remaining_display: self.remaining_display(),
            progress: self.progress_fraction(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch presets. Cancels any countdown in flight.
    pub fn select(&mut self, preset: &'static Preset) -> Option<Event> {
        self.stop();
        self.preset = preset;
        self.finished = false;
        self.started = false;
        self.remaining_secs = preset.duration_secs();
        info!(preset = preset.id, "preset selected");
        Some(Event::PresetSelected {
            preset_id: preset.id.to_string(),
            duration_secs: preset.duration_secs(),
            at: Utc::now(),
        })
    }

    /// [`select`](Self::select) by catalog id.
    pub fn select_id(&mut self, id: &str) -> Result<Option<Event>> {
        let preset = preset::resolve(id)?;
        Ok(self.select(preset))
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.remaining_secs == 0 || self.running {
            return None;
        }
        self.running = true;
        self.finished = false;
        self.started = true;
        self.generation += 1;
        self.ticker = Some(self.ticks.arm(self.generation));
        self.host.on_start();
        info!(
            preset = self.preset.id,
            remaining = self.remaining_secs,
            "countdown started"
        );
        Some(Event::TimerStarted {
            preset_id: self.preset.id.to_string(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.stop();
        info!(remaining = self.remaining_secs, "countdown paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.stop();
        self.finished = false;
        self.started = false;
        self.remaining_secs = self.total_secs();
        info!(preset = self.preset.id, "countdown reset");
        Some(Event::TimerReset {
            preset_id: self.preset.id.to_string(),
            duration_secs: self.total_secs(),
            at: Utc::now(),
        })
    }

    /// Advance by one second. Returns `Some(Event::TimerCompleted)` on the
    /// tick that reaches zero, after firing the completion alerts.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        self.stop();
        self.finished = true;
        self.host.fire_completion(self.preset);
        info!(preset = self.preset.id, "countdown finished");
        Some(Event::TimerCompleted {
            preset_id: self.preset.id.to_string(),
            preset_name: self.preset.name.to_string(),
            at: Utc::now(),
        })
    }

    /// Feed a tick from the armed source. Ticks from a cancelled timer
    /// are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> Option<Event> {
        if self.armed_generation() != Some(tick.generation) {
            trace!(generation = tick.generation, "stale tick ignored");
            return None;
        }
        self.tick()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Every path that clears `running` goes through here.
    fn stop(&mut self) {
        self.running = false;
        self.ticker = None;
        self.host.on_stop();
    }
}

impl Drop for CountdownController {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CountdownController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownController")
            .field("preset", &self.preset.id)
            .field("remaining_secs", &self.remaining_secs)
            .field("running", &self.running)
            .field("finished", &self.finished)
            .field("ticker", &self.ticker)
            .field("host", &self.host)
            .finish()
    }
}
