//! Turns finished focus countdowns into session records and streak bumps.

use crate::error::Result;
use crate::model::{now_millis, FocusSession, SessionKind, UserProfile};
use crate::storage::{KvBackend, Store};
use crate::timer::CompletionListener;

/// Owns the store and the in-memory profile handle.
///
/// The handle is refreshed from the store just before each completion is
/// applied, so profile edits saved elsewhere while a countdown runs are kept.
pub struct SessionRecorder<B> {
    store: Store<B>,
    profile: UserProfile,
}

impl<B: KvBackend> SessionRecorder<B> {
    pub fn new(store: Store<B>) -> Self {
        let profile = store.profile();
        Self { store, profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn into_store(self) -> Store<B> {
        self.store
    }

    /// Append a Work session that ended now and bump the streak by one.
    ///
    /// No dedup or calendar-day gating: every completion counts.
    pub fn record_work_session(&mut self, duration_secs: u64) -> Result<FocusSession> {
        let now = now_millis();
        let session = FocusSession::ending_at(SessionKind::Work, duration_secs, now);
        self.store.add_session(session.clone())?;

        self.profile = self.store.profile();
        self.profile.record_completion(now);
        self.store.save_profile(&self.profile)?;

        tracing::info!(
            session_id = %session.id,
            duration_secs,
            streak = self.profile.streak,
            "focus session recorded"
        );
        Ok(session)
    }
}

impl<B: KvBackend + Send> CompletionListener for SessionRecorder<B> {
    fn on_work_session_complete(&mut self, duration_secs: u64) -> Result<()> {
        self.record_work_session(duration_secs).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use chrono::Duration;

    #[test]
    fn records_session_and_increments_streak() {
        let backend = MemoryBackend::new();
        let mut recorder = SessionRecorder::new(Store::new(backend.clone()));

        let session = recorder.record_work_session(1500).unwrap();
        assert_eq!(session.kind, SessionKind::Work);
        assert_eq!(session.duration_seconds, 1500);
        assert_eq!(session.end_time() - session.start_time, Duration::seconds(1500));

        let view = Store::new(backend);
        assert_eq!(view.sessions(), vec![session]);
        assert_eq!(view.profile().streak, 1);
    }

    #[test]
    fn every_completion_counts_even_on_the_same_day() {
        let backend = MemoryBackend::new();
        let mut recorder = SessionRecorder::new(Store::new(backend.clone()));
        for _ in 0..3 {
            recorder.record_work_session(1500).unwrap();
        }
        let view = Store::new(backend);
        assert_eq!(view.sessions().len(), 3);
        assert_eq!(view.profile().streak, 3);
        assert_eq!(recorder.profile().streak, 3);
    }

    #[test]
    fn continues_from_stored_profile() {
        let backend = MemoryBackend::new();
        let mut seed = Store::new(backend.clone());
        let mut profile = UserProfile::new("Kabir", "2026");
        profile.streak = 9;
        seed.save_profile(&profile).unwrap();

        let mut recorder = SessionRecorder::new(Store::new(backend.clone()));
        recorder.record_work_session(60).unwrap();

        let stored = Store::new(backend).profile();
        assert_eq!(stored.streak, 10);
        assert_eq!(stored.name, "Kabir");
        assert_eq!(stored.target_exam_year, "2026");
    }

    #[test]
    fn keeps_profile_edits_saved_during_a_countdown() {
        let backend = MemoryBackend::new();
        let mut recorder = SessionRecorder::new(Store::new(backend.clone()));

        let mut other = Store::new(backend.clone());
        let mut edited = other.profile();
        edited.name = "Riya".into();
        edited.target_exam_year = "2027".into();
        other.save_profile(&edited).unwrap();

        recorder.record_work_session(1500).unwrap();

        let stored = Store::new(backend).profile();
        assert_eq!(stored.name, "Riya");
        assert_eq!(stored.target_exam_year, "2027");
        assert_eq!(stored.streak, 1);
        assert_eq!(recorder.profile(), &stored);
    }
}
