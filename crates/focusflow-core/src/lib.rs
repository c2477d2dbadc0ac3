//! # FocusFlow Core Library
//!
//! Business logic for FocusFlow, a study tracker for exam aspirants. The
//! `focusflow` CLI is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven Pomodoro state machine with three fixed
//!   presets; a [`FocusTimer`] owns the single cancellable tick task
//! - **Storage**: backlog, session log and profile documents over a pluggable
//!   key-value backend (SQLite, JSON files or memory), plus TOML configuration
//! - **Recorder**: appends a session and bumps the streak when a focus
//!   countdown completes
//! - **Planner**: best-effort AI study plans for the pending backlog
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Store`]: Typed collections over a [`KvBackend`]
//! - [`SessionRecorder`]: Completion listener writing sessions and streaks
//! - [`Config`]: Application configuration management

pub mod dashboard;
pub mod error;
pub mod events;
pub mod model;
pub mod planner;
pub mod recorder;
pub mod storage;
pub mod timer;

pub use dashboard::{BacklogSummary, SessionStats};
pub use error::{ConfigError, CoreError, PlannerError, StoreError, ValidationError};
pub use events::Event;
pub use model::{BacklogItem, FocusSession, NewBacklogItem, Priority, SessionKind, Subject, UserProfile};
pub use planner::StudyPlanner;
pub use recorder::SessionRecorder;
pub use storage::{BackendKind, Collection, Config, DynBackend, KvBackend, Store};
pub use timer::{CompletionListener, FocusTimer, ModePresets, RunState, TimerEngine, TimerMode};

/// Open the configured backend in the data directory and wrap it in a store
/// seeded with the configured first-run profile values.
pub fn open_store(config: &Config) -> error::Result<Store<DynBackend>> {
    let dir = storage::data_dir()?;
    let backend = config.storage.backend.open(&dir)?;
    Ok(Store::new(backend).with_profile_defaults(
        &config.profile.default_name,
        &config.profile.default_target_year,
    ))
}
