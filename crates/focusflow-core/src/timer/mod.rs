mod engine;
mod mode;
mod scheduler;

pub use engine::{CompletionListener, NoopListener, RunState, TimerEngine};
pub use mode::{format_clock, ModePresets, TimerMode};
pub use scheduler::{FocusTimer, TickHandle};
