//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no threads and no
//! clock: each call to `tick()` stands for one elapsed second. The
//! [`FocusTimer`](super::FocusTimer) scheduler supplies those ticks.
//!
//! ## State Transitions
//!
//! ```text
//! Idle <-> Running -> (Complete) -> Idle
//! ```
//!
//! `Complete` is momentary: the listener runs, the notice is emitted and the
//! engine is back at `Idle` with the current mode's full duration before
//! `tick()` returns.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(ModePresets::default(), Box::new(recorder));
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::TimerCompleted) when the countdown ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{ModePresets, TimerMode};
use crate::events::Event;
use crate::model::SessionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

/// Receives finished focus sessions.
pub trait CompletionListener: Send {
    fn on_work_session_complete(&mut self, duration_secs: u64) -> crate::error::Result<()>;
}

/// Listener that records nothing.
#[derive(Debug, Default)]
pub struct NoopListener;

impl CompletionListener for NoopListener {
    fn on_work_session_complete(&mut self, _duration_secs: u64) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Core timer engine. In-flight state is never persisted.
pub struct TimerEngine {
    presets: ModePresets,
    mode: TimerMode,
    run: RunState,
    remaining_secs: u64,
    /// Focus sessions finished by this engine instance.
    sessions_completed: u32,
    listener: Box<dyn CompletionListener>,
}

impl TimerEngine {
    /// Create an engine in `Pomodoro` mode, idle, with the full duration.
    pub fn new(presets: ModePresets, listener: Box<dyn CompletionListener>) -> Self {
        Self {
            presets,
            mode: TimerMode::Pomodoro,
            run: RunState::Idle,
            remaining_secs: presets.duration_secs(TimerMode::Pomodoro),
            sessions_completed: 0,
            listener,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.run == RunState::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.presets.duration_secs(self.mode)
    }

    pub fn presets(&self) -> ModePresets {
        self.presets
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// 0.0 .. 1.0 elapsed fraction of the current mode.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (total - self.remaining_secs.min(total)) as f64 / total as f64
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            label: self.mode.label().to_string(),
            run_state: self.run,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress: self.progress(),
            sessions_completed: self.sessions_completed,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.run == RunState::Running || self.remaining_secs == 0 {
            return None;
        }
        self.run = RunState::Running;
        tracing::debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.run != RunState::Running {
            return None;
        }
        self.run = RunState::Idle;
        tracing::debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start when idle, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.run {
            RunState::Idle => self.start(),
            RunState::Running => self.pause(),
        }
    }

    pub fn reset(&mut self) -> Event {
        self.run = RunState::Idle;
        self.remaining_secs = self.total_secs();
        Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Switch presets. Any countdown in progress is dropped unrecorded.
    pub fn change_mode(&mut self, mode: TimerMode) -> Event {
        let from = self.mode;
        self.mode = mode;
        self.run = RunState::Idle;
        self.remaining_secs = self.total_secs();
        tracing::debug!(?from, to = ?mode, "timer mode changed");
        Event::ModeChanged {
            from,
            to: mode,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Account for one elapsed second. Returns `Some(Event::TimerCompleted)`
    /// when the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.run != RunState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        Some(self.complete())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        let mode = self.mode;
        let kind = mode.session_kind();
        let mut recorded = false;

        if kind == SessionKind::Work {
            self.sessions_completed = self.sessions_completed.saturating_add(1);
            let duration = self.total_secs();
            match self.listener.on_work_session_complete(duration) {
                Ok(()) => recorded = true,
                Err(e) => tracing::warn!(error = %e, "failed to record focus session"),
            }
        }

        self.reset();
        Event::TimerCompleted {
            mode,
            kind,
            notice: mode.completion_notice().to_string(),
            recorded,
            at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("mode", &self.mode)
            .field("run", &self.run)
            .field("remaining_secs", &self.remaining_secs)
            .field("sessions_completed", &self.sessions_completed)
            .finish_non_exhaustive()
    }
}
