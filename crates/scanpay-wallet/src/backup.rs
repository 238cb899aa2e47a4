//! Backup verification metadata.

use chrono::{DateTime, Utc};
use scanpay_core::{BackupState, BackupTarget};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Recorded backup state with the time it last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Current state
    pub state: BackupState,
    /// When the state was last set
    pub updated_at: DateTime<Utc>,
}

/// Store of backup states keyed by account or master seed.
#[derive(Debug, Default)]
pub struct BackupStore {
    records: RwLock<HashMap<BackupTarget, BackupRecord>>,
}

impl BackupStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state of `target`.
    pub fn set_state(&self, target: BackupTarget, state: BackupState) {
        tracing::info!(?target, ?state, "updating backup state");
        self.records.write().expect("backup lock poisoned").insert(
            target,
            BackupRecord {
                state,
                updated_at: Utc::now(),
            },
        );
    }

    /// Shorthand for setting [`BackupState::Verified`].
    pub fn mark_verified(&self, target: BackupTarget) {
        self.set_state(target, BackupState::Verified);
    }

    /// Current state of `target`, [`BackupState::Unknown`] if never recorded.
    #[must_use]
    pub fn state(&self, target: BackupTarget) -> BackupState {
        self.record(target)
            .map_or(BackupState::Unknown, |record| record.state)
    }

    /// Full record for `target`.
    #[must_use]
    pub fn record(&self, target: BackupTarget) -> Option<BackupRecord> {
        self.records
            .read()
            .expect("backup lock poisoned")
            .get(&target)
            .copied()
    }
}
