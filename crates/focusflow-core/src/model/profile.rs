use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single per-installation profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Completed focus sessions; see DESIGN.md for why this is not day-gated.
    pub streak: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_active: DateTime<Utc>,
    pub target_exam_year: String,
}

impl UserProfile {
    pub const DEFAULT_NAME: &'static str = "Aspirant";
    pub const DEFAULT_TARGET_YEAR: &'static str = "2025";

    pub fn new(name: impl Into<String>, target_exam_year: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            streak: 0,
            last_active: super::now_millis(),
            target_exam_year: target_exam_year.into(),
        }
    }

    /// Count one more completed focus session.
    pub fn record_completion(&mut self, at: DateTime<Utc>) {
        self.streak = self.streak.saturating_add(1);
        self.last_active = at;
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME, Self::DEFAULT_TARGET_YEAR)
    }
}
