use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::SessionKind;
use crate::timer::{RunState, TimerMode};

/// Every timer state change produces an Event.
/// The CLI renders them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        mode: TimerMode,
        remaining_secs: u64,
        total_secs: u64,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        from: TimerMode,
        to: TimerMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. The engine has already reset itself.
    TimerCompleted {
        mode: TimerMode,
        kind: SessionKind,
        notice: String,
        /// Whether a session record was written for this completion.
        recorded: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        label: String,
        run_state: RunState,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        sessions_completed: u32,
        at: DateTime<Utc>,
    },
}
