//! Typed collections over a [`KvBackend`].
//!
//! Reads never fail: a missing document, a backend read error and a document
//! that no longer decodes all yield the collection default. Writes propagate
//! their errors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KvBackend;
use crate::error::StoreError;
use crate::model::{BacklogItem, FocusSession, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Backlog,
    Sessions,
    Profile,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Backlog, Collection::Sessions, Collection::Profile];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Backlog => "focusflow_backlog",
            Collection::Sessions => "focusflow_sessions",
            Collection::Profile => "focusflow_profile",
        }
    }
}

pub struct Store<B> {
    backend: B,
    default_name: String,
    default_target_year: String,
}

impl<B: KvBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            default_name: UserProfile::DEFAULT_NAME.to_string(),
            default_target_year: UserProfile::DEFAULT_TARGET_YEAR.to_string(),
        }
    }

    /// Override the values a first-run profile is created with.
    pub fn with_profile_defaults(mut self, name: &str, target_exam_year: &str) -> Self {
        self.default_name = name.to_string();
        self.default_target_year = target_exam_year.to_string();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Generic access ───────────────────────────────────────────────

    /// Decoded document, or `None` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, collection: Collection) -> Option<T> {
        let key = collection.key();
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed; using default");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored document is malformed; using default");
                None
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(
        &mut self,
        collection: Collection,
        value: &T,
    ) -> Result<(), StoreError> {
        let key = collection.key();
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.write(key, &json)
    }

    // ── Backlog ──────────────────────────────────────────────────────

    pub fn backlog(&self) -> Vec<BacklogItem> {
        self.get(Collection::Backlog).unwrap_or_default()
    }

    pub fn save_backlog(&mut self, items: &[BacklogItem]) -> Result<(), StoreError> {
        self.save(Collection::Backlog, items)
    }

    /// Append an item. Returns `false` and writes nothing if the id is
    /// already in the backlog.
    pub fn add_backlog_item(&mut self, item: BacklogItem) -> Result<bool, StoreError> {
        let mut items = self.backlog();
        if items.iter().any(|i| i.id == item.id) {
            tracing::warn!(id = %item.id, "backlog item id already stored; not added");
            return Ok(false);
        }
        items.push(item);
        self.save_backlog(&items)?;
        Ok(true)
    }

    /// Replace the item with the same id, keeping its stored `created_at`.
    /// Unknown ids change nothing.
    pub fn update_backlog_item(&mut self, updated: &BacklogItem) -> Result<bool, StoreError> {
        let mut items = self.backlog();
        let Some(slot) = items.iter_mut().find(|i| i.id == updated.id) else {
            return Ok(false);
        };
        *slot = BacklogItem {
            created_at: slot.created_at,
            ..updated.clone()
        };
        self.save_backlog(&items)?;
        Ok(true)
    }

    /// Remove by id. Returns whether anything was removed; deleting twice is safe.
    pub fn delete_backlog_item(&mut self, id: &str) -> Result<bool, StoreError> {
        let items = self.backlog();
        let before = items.len();
        let kept: Vec<BacklogItem> = items.into_iter().filter(|i| i.id != id).collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.save_backlog(&kept)?;
        Ok(true)
    }

    /// Flip the completion flag, returning the updated item.
    pub fn toggle_backlog_item(&mut self, id: &str) -> Result<Option<BacklogItem>, StoreError> {
        self.modify_backlog_item(id, |item| item.is_completed = !item.is_completed)
    }

    /// Record partial progress, clamped to 100.
    pub fn set_backlog_progress(
        &mut self,
        id: &str,
        percentage: u8,
    ) -> Result<Option<BacklogItem>, StoreError> {
        self.modify_backlog_item(id, |item| item.completed_percentage = percentage.min(100))
    }

    fn modify_backlog_item(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut BacklogItem),
    ) -> Result<Option<BacklogItem>, StoreError> {
        let mut items = self.backlog();
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        f(item);
        let updated = item.clone();
        self.save_backlog(&items)?;
        Ok(Some(updated))
    }

    // ── Sessions ─────────────────────────────────────────────────────

    pub fn sessions(&self) -> Vec<FocusSession> {
        self.get(Collection::Sessions).unwrap_or_default()
    }

    /// Append to the session log. Read-modify-write, not an atomic append.
    pub fn add_session(&mut self, session: FocusSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions();
        sessions.push(session);
        self.save(Collection::Sessions, &sessions)
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub fn profile(&self) -> UserProfile {
        self.get(Collection::Profile)
            .unwrap_or_else(|| UserProfile::new(&self.default_name, &self.default_target_year))
    }

    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        self.save(Collection::Profile, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewBacklogItem, Priority, SessionKind, Subject};
    use crate::storage::MemoryBackend;
    use chrono::Utc;

    fn item(title: &str) -> BacklogItem {
        NewBacklogItem {
            title: title.into(),
            subject: Subject::Chemistry,
            priority: Priority::Medium,
            estimated_hours: 2.0,
        }
        .into_item()
        .unwrap()
    }

    #[test]
    fn empty_store_yields_defaults() {
        let store = Store::new(MemoryBackend::new());
        assert!(store.backlog().is_empty());
        assert!(store.sessions().is_empty());
        let profile = store.profile();
        assert_eq!(profile.name, "Aspirant");
        assert_eq!(profile.streak, 0);
        assert_eq!(profile.target_exam_year, "2025");
    }

    #[test]
    fn profile_defaults_can_be_overridden() {
        let store = Store::new(MemoryBackend::new()).with_profile_defaults("Riya", "2027");
        let profile = store.profile();
        assert_eq!(profile.name, "Riya");
        assert_eq!(profile.target_exam_year, "2027");
    }

    #[test]
    fn malformed_documents_fall_back_to_defaults() {
        let backend = MemoryBackend::new();
        backend.insert_raw(Collection::Backlog.key(), "{not json");
        backend.insert_raw(Collection::Sessions.key(), "{\"wrong\":\"shape\"}");
        backend.insert_raw(Collection::Profile.key(), "[]");
        let store = Store::new(backend);
        assert!(store.backlog().is_empty());
        assert!(store.sessions().is_empty());
        assert_eq!(store.profile().streak, 0);
    }

    #[test]
    fn backlog_roundtrip() {
        let mut store = Store::new(MemoryBackend::new());
        let items = vec![item("Mole Concept"), item("Thermodynamics")];
        store.save_backlog(&items).unwrap();
        assert_eq!(store.backlog(), items);
    }

    #[test]
    fn profile_roundtrip() {
        let mut store = Store::new(MemoryBackend::new());
        let mut profile = UserProfile::new("Arjun", "2026");
        profile.streak = 7;
        store.save_profile(&profile).unwrap();
        assert_eq!(store.profile(), profile);
    }

    #[test]
    fn sessions_append_in_order() {
        let mut store = Store::new(MemoryBackend::new());
        let first = FocusSession::ending_at(SessionKind::Work, 1500, Utc::now());
        let second = FocusSession::ending_at(SessionKind::Work, 1500, Utc::now());
        store.add_session(first.clone()).unwrap();
        store.add_session(second.clone()).unwrap();
        let ids: Vec<String> = store.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = Store::new(MemoryBackend::new());
        let keep = item("Keep");
        let drop = item("Drop");
        store.add_backlog_item(keep.clone()).unwrap();
        store.add_backlog_item(drop.clone()).unwrap();

        assert!(store.delete_backlog_item(&drop.id).unwrap());
        let after_first = store.backlog();
        assert!(!store.delete_backlog_item(&drop.id).unwrap());
        assert_eq!(store.backlog(), after_first);
        assert_eq!(after_first, vec![keep]);
    }

    #[test]
    fn toggle_flips_completion_and_keeps_created_at() {
        let mut store = Store::new(MemoryBackend::new());
        let original = item("Integration");
        store.add_backlog_item(original.clone()).unwrap();

        let toggled = store.toggle_backlog_item(&original.id).unwrap().unwrap();
        assert!(toggled.is_completed);
        assert_eq!(toggled.created_at, original.created_at);

        let toggled_back = store.toggle_backlog_item(&original.id).unwrap().unwrap();
        assert!(!toggled_back.is_completed);
        assert!(store.toggle_backlog_item("missing").unwrap().is_none());
    }

    #[test]
    fn update_replaces_by_id_only() {
        let mut store = Store::new(MemoryBackend::new());
        let a = item("Limits");
        let b = item("Vectors");
        store.add_backlog_item(a.clone()).unwrap();
        store.add_backlog_item(b.clone()).unwrap();

        let mut renamed = a.clone();
        renamed.title = "Limits & Continuity".into();
        assert!(store.update_backlog_item(&renamed).unwrap());
        assert_eq!(store.backlog(), vec![renamed, b]);

        let stranger = item("Stranger");
        assert!(!store.update_backlog_item(&stranger).unwrap());
        assert_eq!(store.backlog().len(), 2);
    }

    #[test]
    fn update_keeps_created_at() {
        let mut store = Store::new(MemoryBackend::new());
        let a = item("Sequences");
        store.add_backlog_item(a.clone()).unwrap();

        let mut backdated = a.clone();
        backdated.created_at = a.created_at - chrono::Duration::days(400);
        backdated.completed_percentage = 30;
        assert!(store.update_backlog_item(&backdated).unwrap());

        let stored = &store.backlog()[0];
        assert_eq!(stored.created_at, a.created_at);
        assert_eq!(stored.completed_percentage, 30);
    }

    #[test]
    fn duplicate_id_is_not_added() {
        let mut store = Store::new(MemoryBackend::new());
        let a = item("Probability");
        assert!(store.add_backlog_item(a.clone()).unwrap());

        let mut copy = a.clone();
        copy.title = "Probability again".into();
        assert!(!store.add_backlog_item(copy).unwrap());

        let items = store.backlog();
        assert_eq!(items.iter().filter(|i| i.id == a.id).count(), 1);
        assert_eq!(items, vec![a]);
    }

    #[test]
    fn progress_is_clamped() {
        let mut store = Store::new(MemoryBackend::new());
        let a = item("Waves");
        store.add_backlog_item(a.clone()).unwrap();
        let updated = store.set_backlog_progress(&a.id, 250).unwrap().unwrap();
        assert_eq!(updated.completed_percentage, 100);
        assert_eq!(store.backlog()[0].completed_percentage, 100);
    }
}
