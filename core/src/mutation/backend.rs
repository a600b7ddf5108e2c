//! Remote write surface the mutation coordinators depend on.

use rollout_types::{StoreId, StorePatch};

/// Errors from the remote store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Network-level failure before any usable response arrived.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),
}

/// Write operations against the backend store.
///
/// `rollout-client` provides the HTTP implementation; tests substitute an
/// in-process mock.
#[allow(async_fn_in_trait)]
pub trait StoreBackend {
    /// PUT a partial record update.
    async fn update_store(&self, id: StoreId, patch: &StorePatch) -> Result<(), BackendError>;

    /// POST one patch for a whole id set in a single call.
    async fn bulk_update(&self, ids: &[StoreId], patch: &StorePatch) -> Result<(), BackendError>;

    /// Trigger an out-of-band re-sync for one record. Fire-and-forget; the
    /// caller follows up with a soft refresh.
    async fn deep_sync(&self, id: StoreId) -> Result<(), BackendError>;
}
