use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Work,
    Break,
}

/// One finished interval. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

impl FocusSession {
    /// A session of `duration_seconds` that ended at `ended_at`.
    pub fn ending_at(kind: SessionKind, duration_seconds: u64, ended_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time: ended_at
                .checked_sub_signed(span(duration_seconds))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            duration_seconds,
            kind,
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time
            .checked_add_signed(span(self.duration_seconds))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

fn span(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_time_is_backdated_by_duration() {
        let end = Utc::now();
        let session = FocusSession::ending_at(SessionKind::Work, 1500, end);
        assert_eq!(end - session.start_time, Duration::seconds(1500));
        assert_eq!(session.end_time(), end);
    }

    #[test]
    fn kind_serializes_under_type_key() {
        let session = FocusSession::ending_at(SessionKind::Work, 60, Utc::now());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["type"], "Work");
        assert_eq!(json["durationSeconds"], 60);
        assert!(json["startTime"].is_i64());
    }
}
