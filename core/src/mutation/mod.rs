//! Record mutations against the remote store.
//!
//! Single-record edits are optimistic (local apply, rollback on failure);
//! bulk edits are pessimistic (no local change until the server confirms,
//! then a full re-fetch).

mod backend;
mod cache;
mod coordinator;

#[cfg(test)]
mod coordinator_tests;

pub use backend::{BackendError, StoreBackend};
pub use cache::StoreCache;
pub use coordinator::{BulkMutationError, BulkOutcome, MutationCoordinator, MutationError};
