//! Shared client-side record cache.

use std::collections::HashMap;

use rollout_types::{StoreId, StorePatch, StoreRecord};
use tokio::sync::RwLock;

/// Client-local cache of the store collection.
///
/// The mutation coordinators are its only writers; the filter engine and the
/// workload board read owned snapshots. Each record carries a monotonic
/// revision so a failed mutation's rollback can detect that a later edit
/// superseded it and must win.
#[derive(Debug, Default)]
pub struct StoreCache {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoreRecord>,
    revisions: HashMap<StoreId, u64>,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection, e.g. after a fetch or a post-bulk
    /// refresh. Pending revisions are obsolete at that point and reset.
    pub async fn replace_all(&self, records: Vec<StoreRecord>) {
        let mut inner = self.inner.write().await;
        inner.records = records;
        inner.revisions.clear();
    }

    /// Owned copy of the current collection for filtering and display.
    pub async fn snapshot(&self) -> Vec<StoreRecord> {
        self.inner.read().await.records.clone()
    }

    pub async fn get(&self, id: StoreId) -> Option<StoreRecord> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Apply `patch` to one record, returning the pre-mutation snapshot and
    /// the revision the mutation now owns. `None` if the record is unknown.
    pub(crate) async fn apply_patch(
        &self,
        id: StoreId,
        patch: &StorePatch,
    ) -> Option<(StoreRecord, u64)> {
        let mut inner = self.inner.write().await;
        let record = inner.records.iter_mut().find(|r| r.id == id)?;
        let snapshot = record.clone();
        patch.apply_to(record);
        let revision = inner.revisions.entry(id).or_insert(0);
        *revision += 1;
        Some((snapshot, *revision))
    }

    /// Roll a record back to `snapshot`, but only if its revision still
    /// equals `expected`; a later edit otherwise owns the record and the
    /// stale rollback is dropped. Returns whether the rollback applied.
    pub(crate) async fn restore_if_current(&self, snapshot: StoreRecord, expected: u64) -> bool {
        let mut inner = self.inner.write().await;
        let current = inner.revisions.get(&snapshot.id).copied().unwrap_or(0);
        if current != expected {
            return false;
        }
        match inner.records.iter_mut().find(|r| r.id == snapshot.id) {
            Some(record) => {
                *record = snapshot;
                true
            }
            None => false,
        }
    }
}
