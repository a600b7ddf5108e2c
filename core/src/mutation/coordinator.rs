//! Optimistic and bulk mutation coordinators.

use std::sync::Arc;

use rollout_types::{StoreId, StorePatch};

use super::backend::{BackendError, StoreBackend};
use super::cache::StoreCache;

/// Errors from a single-record optimistic mutation. The `Display` text is
/// suitable for a user-facing failure notice.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("store {0} is not in the local cache")]
    UnknownRecord(StoreId),
    #[error("saving store {id} failed: {source}")]
    Remote {
        id: StoreId,
        /// Whether the local record was restored to its pre-mutation state.
        /// `false` means a later edit superseded this one and kept its value.
        rolled_back: bool,
        source: BackendError,
    },
}

/// Errors from a bulk mutation. The empty variants are rejected client-side
/// before any network round trip.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BulkMutationError {
    #[error("no stores selected")]
    EmptySelection,
    #[error("no fields to update")]
    EmptyPatch,
    #[error("bulk update failed: {0}")]
    Remote(#[from] BackendError),
}

/// Successful bulk call. The batch endpoint may partially apply on the
/// server, so the local cache was deliberately not patched; the caller must
/// re-fetch the collection to converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Number of records submitted in the batch.
    pub submitted: usize,
}

/// Coordinates record mutations between the local cache and the backend.
pub struct MutationCoordinator<B: StoreBackend> {
    cache: Arc<StoreCache>,
    backend: B,
}

impl<B: StoreBackend> MutationCoordinator<B> {
    pub fn new(cache: Arc<StoreCache>, backend: B) -> Self {
        Self { cache, backend }
    }

    pub fn cache(&self) -> &Arc<StoreCache> {
        &self.cache
    }

    /// Optimistically mutate one record.
    ///
    /// The patch is applied to the local cache before the remote write is
    /// issued, so the view updates on the same tick. On remote failure the
    /// exact pre-mutation snapshot is restored, unless a later edit already
    /// advanced the record, in which case the stale rollback is discarded and
    /// the later edit's resolution determines the final state. No other
    /// record is ever touched.
    pub async fn mutate(&self, id: StoreId, patch: StorePatch) -> Result<(), MutationError> {
        let Some((snapshot, revision)) = self.cache.apply_patch(id, &patch).await else {
            return Err(MutationError::UnknownRecord(id));
        };

        match self.backend.update_store(id, &patch).await {
            Ok(()) => Ok(()),
            Err(source) => {
                let rolled_back = self.cache.restore_if_current(snapshot, revision).await;
                if !rolled_back {
                    tracing::debug!(id, "Stale rollback discarded; a later edit owns the record");
                }
                Err(MutationError::Remote {
                    id,
                    rolled_back,
                    source,
                })
            }
        }
    }

    /// Apply one patch to a whole selection via a single remote call.
    ///
    /// Pessimistic: nothing changes locally on either path. On success the
    /// caller must re-fetch the collection (see [`BulkOutcome`]); on failure
    /// the selection is still intact for a retry.
    pub async fn bulk_mutate(
        &self,
        ids: &[StoreId],
        patch: &StorePatch,
    ) -> Result<BulkOutcome, BulkMutationError> {
        if ids.is_empty() {
            return Err(BulkMutationError::EmptySelection);
        }
        if patch.is_empty() {
            return Err(BulkMutationError::EmptyPatch);
        }
        self.backend.bulk_update(ids, patch).await?;
        Ok(BulkOutcome {
            submitted: ids.len(),
        })
    }

    /// Ask the backend to re-sync one record out of band. The caller follows
    /// up with a soft refresh once the sync lands.
    pub async fn request_deep_sync(&self, id: StoreId) -> Result<(), BackendError> {
        self.backend.deep_sync(id).await
    }
}
