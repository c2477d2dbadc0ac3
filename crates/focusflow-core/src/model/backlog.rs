use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Maths,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Maths];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Maths => "Maths",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physics" => Ok(Subject::Physics),
            "chemistry" => Ok(Subject::Chemistry),
            "maths" | "math" => Ok(Subject::Maths),
            _ => Err(ValidationError::UnknownVariant {
                kind: "subject",
                value: s.to_string(),
                expected: "physics, chemistry, maths",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ValidationError::UnknownVariant {
                kind: "priority",
                value: s.to_string(),
                expected: "high, medium, low",
            }),
        }
    }
}

/// A chapter or topic waiting to be studied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItem {
    pub id: String,
    pub title: String,
    pub subject: Subject,
    pub priority: Priority,
    pub estimated_hours: f64,
    /// 0..=100, informational only; `is_completed` is the source of truth.
    #[serde(default)]
    pub completed_percentage: u8,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
}

impl BacklogItem {
    pub fn is_pending(&self) -> bool {
        !self.is_completed
    }
}

/// User input for a new backlog entry, before it gets an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewBacklogItem {
    pub title: String,
    pub subject: Subject,
    pub priority: Priority,
    pub estimated_hours: f64,
}

impl NewBacklogItem {
    /// Build the stored entity.
    ///
    /// Returns `None` for a blank title or a non-positive effort estimate;
    /// rejected input creates nothing and raises nothing.
    pub fn into_item(self) -> Option<BacklogItem> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        if !self.estimated_hours.is_finite() || self.estimated_hours <= 0.0 {
            return None;
        }
        Some(BacklogItem {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            subject: self.subject,
            priority: self.priority,
            estimated_hours: self.estimated_hours,
            completed_percentage: 0,
            created_at: super::now_millis(),
            is_completed: false,
        })
    }
}
