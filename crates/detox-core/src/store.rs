//! Single source of truth for [`SessionData`].
//!
//! The store is owned by the application root and handed to each view by
//! reference. Views never mutate the snapshot directly: they compute a
//! [`SessionPatch`] and the store merges it, producing a new immutable
//! snapshot. The revision counter lets the owner detect that a write-back
//! is due.

use crate::session::{SessionData, SessionPatch};
use std::sync::Arc;
use tracing::debug;

/// Explicit store holding the current session snapshot.
#[derive(Debug, Clone)]
pub struct Store {
    snapshot: Arc<SessionData>,
    revision: u64,
}

impl Store {
    /// Creates a store around an initial snapshot.
    pub fn new(data: SessionData) -> Self {
        Self {
            snapshot: Arc::new(data),
            revision: 0,
        }
    }

    /// Returns the current snapshot.
    pub fn data(&self) -> &SessionData {
        &self.snapshot
    }

    /// Returns a shared handle to the current snapshot.
    ///
    /// The handle stays valid and unchanged after later updates.
    pub fn snapshot(&self) -> Arc<SessionData> {
        Arc::clone(&self.snapshot)
    }

    /// Returns the number of changes applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merges a partial update into the current snapshot.
    ///
    /// Empty patches are ignored and do not bump the revision.
    pub fn apply(&mut self, patch: &SessionPatch) -> &SessionData {
        if patch.is_empty() {
            return &self.snapshot;
        }
        self.snapshot = Arc::new(self.snapshot.merge(patch));
        self.revision = self.revision.wrapping_add(1);
        debug!(revision = self.revision, "Session patch applied");
        &self.snapshot
    }

    /// Replaces the whole snapshot (rehydrate or clear).
    pub fn replace(&mut self, data: SessionData) {
        self.snapshot = Arc::new(data);
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SessionData::sample())
    }
}
