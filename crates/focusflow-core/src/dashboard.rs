//! Read-only summaries for the home screen: backlog health, urgent items,
//! session totals and a motivational line.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::model::{BacklogItem, FocusSession, Priority, SessionKind, Subject};

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Success is the sum of small efforts, repeated day in and day out.",
    "Your competition is practicing while you are sleeping.",
    "Don't stop when you're tired. Stop when you're done.",
    "Focus on the step, not the mountain.",
    "IIT is not a destination, it's a reward for your discipline.",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: Subject,
    pub total: usize,
    pub completed: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogSummary {
    pub pending: usize,
    pub completed: usize,
    /// Share of items completed, rounded to a whole percent.
    pub health_percent: u8,
    pub by_subject: Vec<SubjectProgress>,
}

impl BacklogSummary {
    pub fn from_items(items: &[BacklogItem]) -> Self {
        let completed = items.iter().filter(|i| i.is_completed).count();
        let by_subject = Subject::ALL
            .iter()
            .map(|&subject| {
                let total = items.iter().filter(|i| i.subject == subject).count();
                let done = items
                    .iter()
                    .filter(|i| i.subject == subject && i.is_completed)
                    .count();
                SubjectProgress {
                    subject,
                    total,
                    completed: done,
                    percent: percent(done, total),
                }
            })
            .collect();

        Self {
            pending: items.len() - completed,
            completed,
            health_percent: percent(completed, items.len()),
            by_subject,
        }
    }
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}

/// Pending high-priority items in stored order, at most `limit`.
pub fn urgent_items(items: &[BacklogItem], limit: usize) -> Vec<&BacklogItem> {
    items
        .iter()
        .filter(|i| i.is_pending() && i.priority == Priority::High)
        .take(limit)
        .collect()
}

/// Listing order: newest first.
pub fn sorted_newest_first(items: &[BacklogItem]) -> Vec<&BacklogItem> {
    let mut sorted: Vec<&BacklogItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_sessions: u64,
    pub total_focus_min: u64,
    pub today_sessions: u64,
    pub today_focus_min: u64,
}

impl SessionStats {
    /// Work-session totals; "today" is the UTC calendar day of `now`.
    pub fn from_sessions(sessions: &[FocusSession], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let mut stats = Self::default();
        let mut total_secs = 0u64;
        let mut today_secs = 0u64;
        for session in sessions.iter().filter(|s| s.kind == SessionKind::Work) {
            stats.total_sessions += 1;
            total_secs = total_secs.saturating_add(session.duration_seconds);
            if session.end_time().date_naive() == today {
                stats.today_sessions += 1;
                today_secs = today_secs.saturating_add(session.duration_seconds);
            }
        }
        stats.total_focus_min = total_secs / 60;
        stats.today_focus_min = today_secs / 60;
        stats
    }
}

pub fn motivational_quote() -> &'static str {
    MOTIVATIONAL_QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(MOTIVATIONAL_QUOTES[0])
}
