//! Detox Store - Durable storage for session data
//!
//! This crate persists [`detox_core::SessionData`] as a versioned snapshot
//! envelope in a small key-value store, migrates older snapshots on load,
//! and records the onboarding-completed flag under a separate key.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod backend;
pub mod error;
pub mod persistence;
pub mod version;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use persistence::{
    CORRUPT_KEY, LoadOutcome, Loaded, Persistence, EXPORT_FILE_NAME, ONBOARDING_KEY,
    SESSION_KEY,
};
pub use version::{SnapshotEnvelope, SnapshotVersion};
