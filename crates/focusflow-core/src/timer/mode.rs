use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::SessionKind;

/// One of the three fixed timer presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Pomodoro, TimerMode::ShortBreak, TimerMode::LongBreak];

    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn session_kind(&self) -> SessionKind {
        match self {
            TimerMode::Pomodoro => SessionKind::Work,
            TimerMode::ShortBreak | TimerMode::LongBreak => SessionKind::Break,
        }
    }

    /// Message shown when a countdown in this mode runs out.
    pub fn completion_notice(&self) -> &'static str {
        match self.session_kind() {
            SessionKind::Work => "Deep focus session complete! Take a break.",
            SessionKind::Break => "Break over. Ready to grind?",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pomodoro" | "focus" => Ok(TimerMode::Pomodoro),
            "short-break" | "short" => Ok(TimerMode::ShortBreak),
            "long-break" | "long" => Ok(TimerMode::LongBreak),
            _ => Err(ValidationError::UnknownVariant {
                kind: "mode",
                value: s.to_string(),
                expected: "pomodoro, short-break, long-break",
            }),
        }
    }
}

/// Total duration of each mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModePresets {
    pub pomodoro_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
}

impl ModePresets {
    /// Build presets from minute values. Zero is raised to one minute so
    /// every mode can actually count down.
    pub fn from_minutes(pomodoro: u32, short_break: u32, long_break: u32) -> Self {
        let secs = |min: u32| u64::from(min.max(1)) * 60;
        Self {
            pomodoro_secs: secs(pomodoro),
            short_break_secs: secs(short_break),
            long_break_secs: secs(long_break),
        }
    }

    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Pomodoro => self.pomodoro_secs,
            TimerMode::ShortBreak => self.short_break_secs,
            TimerMode::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for ModePresets {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15)
    }
}

/// Render seconds as `MM:SS`. Minutes keep counting past 59.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
