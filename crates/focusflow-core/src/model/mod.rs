//! Persisted entities.
//!
//! Field names serialize in camelCase and timestamps as epoch milliseconds,
//! so documents written by earlier installs keep decoding.

mod backlog;
mod profile;
mod session;

pub use backlog::{BacklogItem, NewBacklogItem, Priority, Subject};
pub use profile::UserProfile;
pub use session::{FocusSession, SessionKind};

use chrono::{DateTime, Utc};

/// Current time truncated to the millisecond precision documents store.
pub fn now_millis() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap_or_default()
}
