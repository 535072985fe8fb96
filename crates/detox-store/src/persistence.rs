//! Persistence adapter between the session store and a storage backend.
//!
//! Two keys are used:
//! - [`SESSION_KEY`] holds the versioned session snapshot.
//! - [`ONBOARDING_KEY`] holds `true` once the walkthrough was completed.
//!
//! Malformed or unreadable snapshots are never surfaced as errors to the
//! user: loading replaces them with the sample dataset, keeps the old value
//! under [`CORRUPT_KEY`] and reports why through [`LoadOutcome::Discarded`].

use crate::backend::KeyValueStore;
use crate::error::StoreResult;
use crate::version::{SnapshotEnvelope, SnapshotVersion};
use chrono::{DateTime, Utc};
use detox_core::{SessionData, Store};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key of the session snapshot.
pub const SESSION_KEY: &str = "brainDetoxData";

/// Key of the onboarding-completed flag.
pub const ONBOARDING_KEY: &str = "brainDetoxOnboarding";

/// File name of a data export.
pub const EXPORT_FILE_NAME: &str = "brain-detox-data.json";

/// Key the last unusable session value is moved to when it is replaced.
pub const CORRUPT_KEY: &str = "brainDetoxData.corrupt";

const ONBOARDING_DONE: &str = "true";

// ============================================================================
// Load Result
// ============================================================================

/// How the session data returned by [`Persistence::load`] was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored; the sample dataset was used and written.
    Fresh,
    /// A current-version snapshot was read.
    Restored,
    /// An older snapshot was read and rewritten in the current format.
    Migrated { from: SnapshotVersion },
    /// The stored value was unusable; the sample dataset was used.
    Discarded { reason: String },
}

/// Session data together with how it was loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub data: SessionData,
    pub outcome: LoadOutcome,
}

// ============================================================================
// Persistence
// ============================================================================

/// Reads and writes session state through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<B> {
    backend: B,
    saved_revision: Option<u64>,
}

impl<B: KeyValueStore> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            saved_revision: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decodes the stored session without writing anything.
    ///
    /// Only backend I/O failures are returned as errors.
    pub fn read(&self) -> StoreResult<Loaded> {
        let Some(raw) = self.backend.get(SESSION_KEY)? else {
            return Ok(Loaded {
                data: SessionData::sample(),
                outcome: LoadOutcome::Fresh,
            });
        };

        Ok(match SnapshotEnvelope::decode(&raw) {
            Ok((data, version)) if version.is_current() => Loaded {
                data,
                outcome: LoadOutcome::Restored,
            },
            Ok((data, version)) => Loaded {
                data,
                outcome: LoadOutcome::Migrated { from: version },
            },
            Err(e) => Loaded {
                data: SessionData::sample(),
                outcome: LoadOutcome::Discarded {
                    reason: e.to_string(),
                },
            },
        })
    }

    /// Rehydrates session data, falling back to the sample dataset.
    ///
    /// Anything other than a current snapshot is rewritten: fresh and
    /// unusable values are replaced by the sample dataset, older versions
    /// are migrated. An unusable value is kept under [`CORRUPT_KEY`].
    pub fn load(&mut self) -> StoreResult<Loaded> {
        let loaded = self.read()?;
        match &loaded.outcome {
            LoadOutcome::Restored => {
                debug!(apps = loaded.data.apps.len(), "Restored stored session");
            }
            LoadOutcome::Fresh => {
                info!("No stored session, starting from sample data");
                self.save(&loaded.data)?;
            }
            LoadOutcome::Migrated { from } => {
                info!(from = %from, to = %SnapshotVersion::CURRENT, "Migrating stored session");
                self.save(&loaded.data)?;
            }
            LoadOutcome::Discarded { reason } => {
                warn!(error = %reason, "Stored session unusable, starting from sample data");
                if let Some(raw) = self.backend.get(SESSION_KEY)? {
                    self.backend.set(CORRUPT_KEY, &raw)?;
                }
                self.save(&loaded.data)?;
            }
        }
        Ok(loaded)
    }

    /// Writes a snapshot stamped with the current time.
    pub fn save(&mut self, data: &SessionData) -> StoreResult<()> {
        self.save_at(data, Utc::now())
    }

    /// Writes a snapshot stamped with `saved_at`.
    pub fn save_at(&mut self, data: &SessionData, saved_at: DateTime<Utc>) -> StoreResult<()> {
        let encoded = SnapshotEnvelope::new(data.clone(), saved_at).encode()?;
        self.backend.set(SESSION_KEY, &encoded)
    }

    /// Writes the store's snapshot if it changed since the last sync.
    ///
    /// Returns true if a write happened.
    pub fn sync(&mut self, store: &Store) -> StoreResult<bool> {
        if self.saved_revision == Some(store.revision()) {
            return Ok(false);
        }
        self.save(store.data())?;
        self.saved_revision = Some(store.revision());
        debug!(revision = store.revision(), "Session synced to storage");
        Ok(true)
    }

    /// Marks the store's current revision as already persisted.
    pub fn mark_synced(&mut self, store: &Store) {
        self.saved_revision = Some(store.revision());
    }

    /// Returns true once the onboarding walkthrough was completed.
    pub fn onboarding_complete(&self) -> StoreResult<bool> {
        Ok(self
            .backend
            .get(ONBOARDING_KEY)?
            .is_some_and(|value| !value.trim().is_empty()))
    }

    /// Records that the onboarding walkthrough was completed.
    pub fn complete_onboarding(&mut self) -> StoreResult<()> {
        info!("Onboarding completed");
        self.backend.set(ONBOARDING_KEY, ONBOARDING_DONE)
    }

    /// Deletes the session snapshot, the onboarding flag and any kept corrupt copy.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.backend.remove(SESSION_KEY)?;
        self.backend.remove(ONBOARDING_KEY)?;
        self.backend.remove(CORRUPT_KEY)?;
        self.saved_revision = None;
        info!("Stored data cleared");
        Ok(())
    }

    /// Returns the stored session data as pretty-printed JSON, or `None`
    /// if nothing is stored.
    pub fn export(&self) -> StoreResult<Option<String>> {
        let Some(raw) = self.backend.get(SESSION_KEY)? else {
            return Ok(None);
        };
        let (data, _) = SnapshotEnvelope::decode(&raw)?;
        Ok(Some(serde_json::to_string_pretty(&data)?))
    }

    /// Writes [`EXPORT_FILE_NAME`] into `dir`.
    ///
    /// Returns the written path, or `None` when there was nothing to export.
    pub fn export_to_dir(&self, dir: &Path) -> StoreResult<Option<PathBuf>> {
        let Some(json) = self.export()? else {
            return Ok(None);
        };
        fs::create_dir_all(dir)?;
        let path = dir.join(EXPORT_FILE_NAME);
        fs::write(&path, json)?;
        info!(path = %path.display(), "Session data exported");
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use detox_core::SessionPatch;

    fn persistence() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new())
    }

    #[test]
    fn test_fresh_load_uses_sample_and_writes_it() {
        let mut p = persistence();
        let loaded = p.load().unwrap();

        assert_eq!(loaded.outcome, LoadOutcome::Fresh);
        assert_eq!(loaded.data, SessionData::sample());
        assert!(p.backend().contains(SESSION_KEY));
    }

    #[test]
    fn test_saved_data_is_restored() {
        let mut p = persistence();
        let mut data = SessionData::sample();
        data.blocked_attempts = 99;
        p.save(&data).unwrap();

        let loaded = p.load().unwrap();
        assert_eq!(loaded.outcome, LoadOutcome::Restored);
        assert_eq!(loaded.data.blocked_attempts, 99);
    }

    #[test]
    fn test_legacy_value_is_migrated_and_rewritten() {
        let mut backend = MemoryStore::new();
        let legacy = serde_json::to_string(&SessionData::default()).unwrap();
        backend.set(SESSION_KEY, &legacy).unwrap();
        let mut p = Persistence::new(backend);

        let loaded = p.load().unwrap();
        assert_eq!(loaded.outcome, LoadOutcome::Migrated { from: SnapshotVersion::LEGACY });
        assert_eq!(loaded.data, SessionData::default());

        let rewritten = p.backend().get(SESSION_KEY).unwrap().unwrap();
        assert!(rewritten.contains("\"version\":2"));
        assert_eq!(p.load().unwrap().outcome, LoadOutcome::Restored);
    }

    #[test]
    fn test_malformed_value_is_replaced() {
        let mut backend = MemoryStore::new();
        backend.set(SESSION_KEY, "{ garbage").unwrap();
        let mut p = Persistence::new(backend);

        let loaded = p.load().unwrap();
        assert!(matches!(loaded.outcome, LoadOutcome::Discarded { .. }));
        assert_eq!(loaded.data, SessionData::sample());

        let stored = p.backend().get(SESSION_KEY).unwrap().unwrap();
        let (data, version) = SnapshotEnvelope::decode(&stored).unwrap();
        assert!(version.is_current());
        assert_eq!(data, SessionData::sample());
        assert_eq!(p.backend().get(CORRUPT_KEY).unwrap().as_deref(), Some("{ garbage"));

        let exported: SessionData = serde_json::from_str(&p.export().unwrap().unwrap()).unwrap();
        assert_eq!(exported, SessionData::sample());
        assert_eq!(p.load().unwrap().outcome, LoadOutcome::Restored);
    }

    #[test]
    fn test_replaced_value_survives_synced_store() {
        let mut backend = MemoryStore::new();
        backend.set(SESSION_KEY, "[1, 2").unwrap();
        let mut p = Persistence::new(backend);

        let store = Store::new(p.load().unwrap().data);
        p.mark_synced(&store);

        assert!(!p.sync(&store).unwrap());
        assert!(p.export().unwrap().is_some());
    }

    #[test]
    fn test_read_never_writes() {
        let p = persistence();
        let loaded = p.read().unwrap();
        assert_eq!(loaded.outcome, LoadOutcome::Fresh);
        assert!(!p.backend().contains(SESSION_KEY));

        let mut backend = MemoryStore::new();
        let legacy = serde_json::to_string(&SessionData::default()).unwrap();
        backend.set(SESSION_KEY, &legacy).unwrap();
        backend.set(ONBOARDING_KEY, "true").unwrap();
        let p = Persistence::new(backend);
        let loaded = p.read().unwrap();
        assert_eq!(loaded.outcome, LoadOutcome::Migrated { from: SnapshotVersion::LEGACY });
        assert_eq!(p.backend().get(SESSION_KEY).unwrap().as_deref(), Some(legacy.as_str()));

        let mut backend = MemoryStore::new();
        backend.set(SESSION_KEY, "{ garbage").unwrap();
        let p = Persistence::new(backend);
        assert!(matches!(p.read().unwrap().outcome, LoadOutcome::Discarded { .. }));
        assert!(!p.backend().contains(CORRUPT_KEY));
    }

    #[test]
    fn test_sync_writes_only_on_new_revision() {
        let mut p = persistence();
        let mut store = Store::new(SessionData::sample());

        assert!(p.sync(&store).unwrap());
        assert!(!p.sync(&store).unwrap());

        store.apply(&SessionPatch {
            focus_time: Some(1),
            ..SessionPatch::default()
        });
        assert!(p.sync(&store).unwrap());
        assert_eq!(p.load().unwrap().data.focus_time, 1);
    }

    #[test]
    fn test_mark_synced_skips_next_write() {
        let mut p = persistence();
        let store = Store::new(SessionData::sample());
        p.mark_synced(&store);
        assert!(!p.sync(&store).unwrap());
    }

    #[test]
    fn test_onboarding_flag() {
        let mut p = persistence();
        assert!(!p.onboarding_complete().unwrap());
        p.complete_onboarding().unwrap();
        assert!(p.onboarding_complete().unwrap());
        assert_eq!(p.backend().get(ONBOARDING_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut p = persistence();
        p.load().unwrap();
        p.complete_onboarding().unwrap();

        p.clear().unwrap();

        assert!(!p.backend().contains(SESSION_KEY));
        assert!(!p.backend().contains(ONBOARDING_KEY));
        assert!(!p.onboarding_complete().unwrap());
        assert_eq!(p.load().unwrap().outcome, LoadOutcome::Fresh);
    }

    #[test]
    fn test_clear_removes_corrupt_copy() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "{ garbage").unwrap();
        let mut p = Persistence::new(store);
        p.load().unwrap();
        assert!(p.backend().contains(CORRUPT_KEY));

        p.clear().unwrap();

        assert!(!p.backend().contains(CORRUPT_KEY));
    }

    #[test]
    fn test_export_without_data() {
        assert_eq!(persistence().export().unwrap(), None);
    }

    #[test]
    fn test_export_is_plain_session_json() {
        let mut p = persistence();
        p.load().unwrap();
        let json = p.export().unwrap().unwrap();
        let parsed: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SessionData::sample());
        assert!(!json.contains("savedAt"));
    }
}
