//! Snapshot versioning for safe format changes.
//!
//! Session data is stored inside an envelope that records the format
//! version:
//!
//! ```text
//! {"version": 2, "savedAt": "2024-01-15T10:00:00Z", "data": { ...SessionData... }}
//! ```
//!
//! A stored value without an envelope is the bare SessionData object
//! written by the first release and is read as version 1.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use detox_core::SessionData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Format version of a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotVersion(u32);

impl SnapshotVersion {
    /// Bare SessionData without an envelope.
    pub const LEGACY: SnapshotVersion = SnapshotVersion(1);

    /// Version written by this release.
    pub const CURRENT: SnapshotVersion = SnapshotVersion(2);

    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns true if this release can read the version, possibly after
    /// migrating it.
    pub fn is_supported(&self) -> bool {
        self.0 >= Self::LEGACY.0 && self.0 <= Self::CURRENT.0
    }

    pub fn is_current(&self) -> bool {
        *self == Self::CURRENT
    }
}

impl Default for SnapshotVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// Versioned wrapper around persisted session data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEnvelope {
    pub version: SnapshotVersion,
    pub saved_at: DateTime<Utc>,
    pub data: SessionData,
}

impl SnapshotEnvelope {
    /// Wraps data in a current-version envelope.
    pub fn new(data: SessionData, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SnapshotVersion::CURRENT,
            saved_at,
            data,
        }
    }

    /// Serializes the envelope for storage.
    pub fn encode(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored value, migrating older formats.
    ///
    /// Returns the session data together with the version it was stored
    /// in, so the caller can tell a migration happened.
    pub fn decode(raw: &str) -> StoreResult<(SessionData, SnapshotVersion)> {
        let value: Value = serde_json::from_str(raw)?;
        let object = value
            .as_object()
            .ok_or_else(|| StoreError::InvalidSnapshot("expected a JSON object".to_string()))?;

        let (version, payload) = match (object.get("version"), object.get("data")) {
            (Some(version), Some(data)) => {
                let version = version.as_u64().and_then(|v| u32::try_from(v).ok()).ok_or_else(|| {
                    StoreError::InvalidSnapshot(format!("bad version field: {version}"))
                })?;
                (SnapshotVersion(version), data.clone())
            }
            _ => (SnapshotVersion::LEGACY, value.clone()),
        };

        if !version.is_supported() {
            return Err(StoreError::UnsupportedVersion {
                found: version.get(),
                supported: SnapshotVersion::CURRENT.get(),
            });
        }

        let payload = migrate(version, payload)?;
        let data = serde_json::from_value(payload)?;
        Ok((data, version))
    }
}

/// Upgrades a payload one version at a time until it is current.
fn migrate(from: SnapshotVersion, mut payload: Value) -> StoreResult<Value> {
    let mut version = from.get();
    while version < SnapshotVersion::CURRENT.get() {
        payload = match version {
            // v1 payloads share the v2 field layout; only the envelope is new.
            1 => payload,
            other => {
                return Err(StoreError::InvalidSnapshot(format!(
                    "no migration from version {other}"
                )))
            }
        };
        version = version.saturating_add(1);
    }
    Ok(payload)
}
