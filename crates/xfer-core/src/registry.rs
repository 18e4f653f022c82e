//! Shared map of in-flight transfers to their last reported byte count.
//!
//! Progress handlers on many threads upsert into the registry; terminal
//! handlers remove from it. The summary line is built from `snapshot()`.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::resource::{TransferId, TransferResource};

/// Last known progress of one transfer, as rendered on the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub id: TransferId,
    /// Declared length; negative when unknown.
    pub content_length: i64,
    pub transferred: u64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    content_length: i64,
    transferred: u64,
}

/// Internally synchronized registry; callers need no external locking.
#[derive(Debug, Default)]
pub struct ProgressRegistry {
    entries: RwLock<BTreeMap<TransferId, Entry>>,
}

impl ProgressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the transferred byte count for `resource`.
    pub fn record_progress(&self, resource: &TransferResource, transferred: u64) {
        // Entries are plain counters, so a panic elsewhere cannot leave them inconsistent.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            resource.id(),
            Entry {
                content_length: resource.raw_content_length(),
                transferred,
            },
        );
    }

    /// Remove the entry for `id`. Returns whether one was present; absent ids are a no-op.
    pub fn remove(&self, id: TransferId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&id).is_some()
    }

    /// Copy of the current entries, ordered by transfer id.
    pub fn snapshot(&self) -> Vec<StatusEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|(id, e)| StatusEntry {
                id: *id,
                content_length: e.content_length,
                transferred: e.transferred,
            })
            .collect()
    }

    pub fn contains(&self, id: TransferId) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
