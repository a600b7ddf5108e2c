//! Tests for the mutation coordinators.
//!
//! Covers the optimistic apply/rollback protocol, the stale-rollback guard,
//! and the pessimistic bulk path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rollout_types::{StoreId, StorePatch, StoreRecord};
use tokio::sync::oneshot;

use super::backend::{BackendError, StoreBackend};
use super::cache::StoreCache;
use super::coordinator::{BulkMutationError, MutationCoordinator, MutationError};

fn record(id: StoreId, status: &str) -> StoreRecord {
    StoreRecord {
        id,
        name: format!("Loja {id}"),
        status: status.to_string(),
        assignee: None,
        network: None,
        financial_status: None,
        risk_score: 0.0,
        days_in_transit: None,
        contract_days: None,
        start_date: None,
        finish_date: None,
        predicted_date: None,
        prediction: None,
    }
}

async fn seeded_cache(records: Vec<StoreRecord>) -> Arc<StoreCache> {
    let cache = Arc::new(StoreCache::new());
    cache.replace_all(records).await;
    cache
}

/// Shared-handle mock so tests can inspect calls after the coordinator takes
/// ownership of its clone.
#[derive(Clone, Default)]
struct MockBackend(Arc<MockState>);

#[derive(Default)]
struct MockState {
    fail: AtomicBool,
    update_calls: AtomicUsize,
    bulk_calls: AtomicUsize,
    sync_calls: AtomicUsize,
}

impl MockBackend {
    fn failing() -> Self {
        let mock = Self::default();
        mock.0.fail.store(true, Ordering::SeqCst);
        mock
    }

    fn result(&self) -> Result<(), BackendError> {
        if self.0.fail.load(Ordering::SeqCst) {
            Err(BackendError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl StoreBackend for MockBackend {
    async fn update_store(&self, _id: StoreId, _patch: &StorePatch) -> Result<(), BackendError> {
        self.0.update_calls.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn bulk_update(&self, _ids: &[StoreId], _patch: &StorePatch) -> Result<(), BackendError> {
        self.0.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn deep_sync(&self, _id: StoreId) -> Result<(), BackendError> {
        self.0.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.result()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Optimistic mutation
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_mutation_updates_only_the_target() {
    let cache = seeded_cache(vec![record(1, "A"), record(2, "B")]).await;
    let coordinator = MutationCoordinator::new(cache.clone(), MockBackend::default());

    coordinator.mutate(1, StorePatch::status("C")).await.unwrap();

    let records = cache.snapshot().await;
    assert_eq!(records[0].status, "C");
    assert_eq!(records[1].status, "B");
}

#[tokio::test]
async fn failed_mutation_restores_the_exact_snapshot() {
    let cache = seeded_cache(vec![record(1, "A"), record(2, "B")]).await;
    let before = cache.snapshot().await;
    let coordinator = MutationCoordinator::new(cache.clone(), MockBackend::failing());

    let err = coordinator
        .mutate(1, StorePatch::status("C"))
        .await
        .unwrap_err();
    match err {
        MutationError::Remote { id, rolled_back, .. } => {
            assert_eq!(id, 1);
            assert!(rolled_back, "rollback must apply when no edit superseded");
        }
        other => panic!("expected a remote error, got {other:?}"),
    }

    assert_eq!(
        cache.snapshot().await,
        before,
        "every record must be exactly its pre-mutation value"
    );
}

#[tokio::test]
async fn mutating_an_unknown_record_makes_no_network_call() {
    let cache = seeded_cache(vec![record(1, "A")]).await;
    let backend = MockBackend::default();
    let coordinator = MutationCoordinator::new(cache, backend.clone());

    let err = coordinator
        .mutate(99, StorePatch::status("C"))
        .await
        .unwrap_err();
    assert!(matches!(err, MutationError::UnknownRecord(99)));
    assert_eq!(backend.0.update_calls.load(Ordering::SeqCst), 0);
}

/// The local apply must be visible before the network call is issued.
#[tokio::test]
async fn local_state_updates_before_the_remote_write() {
    struct ObservingBackend {
        cache: Arc<StoreCache>,
        seen: Arc<std::sync::Mutex<Option<String>>>,
    }

    impl StoreBackend for ObservingBackend {
        async fn update_store(&self, id: StoreId, _patch: &StorePatch) -> Result<(), BackendError> {
            let status = self.cache.get(id).await.map(|r| r.status);
            *self.seen.lock().unwrap() = status;
            Ok(())
        }

        async fn bulk_update(&self, _: &[StoreId], _: &StorePatch) -> Result<(), BackendError> {
            Ok(())
        }

        async fn deep_sync(&self, _: StoreId) -> Result<(), BackendError> {
            Ok(())
        }
    }

    let cache = seeded_cache(vec![record(1, "A")]).await;
    let seen = Arc::new(std::sync::Mutex::new(None));
    let coordinator = MutationCoordinator::new(
        cache.clone(),
        ObservingBackend {
            cache: cache.clone(),
            seen: seen.clone(),
        },
    );

    coordinator.mutate(1, StorePatch::status("C")).await.unwrap();
    assert_eq!(
        seen.lock().unwrap().as_deref(),
        Some("C"),
        "the backend must already observe the optimistic value"
    );
}

/// A rollback that arrives after a superseding edit must be discarded: the
/// later request's resolution determines the final local state.
#[tokio::test]
async fn stale_rollback_is_discarded_after_a_superseding_edit() {
    struct GatedBackend {
        gate: std::sync::Mutex<Option<oneshot::Receiver<()>>>,
    }

    impl StoreBackend for GatedBackend {
        async fn update_store(&self, _id: StoreId, _patch: &StorePatch) -> Result<(), BackendError> {
            let gate = self.gate.lock().unwrap().take();
            match gate {
                // First call parks until released, then fails.
                Some(rx) => {
                    let _ = rx.await;
                    Err(BackendError::Transport("connection reset".to_string()))
                }
                None => Ok(()),
            }
        }

        async fn bulk_update(&self, _: &[StoreId], _: &StorePatch) -> Result<(), BackendError> {
            Ok(())
        }

        async fn deep_sync(&self, _: StoreId) -> Result<(), BackendError> {
            Ok(())
        }
    }

    let cache = seeded_cache(vec![record(1, "A")]).await;
    let (release, gate) = oneshot::channel();
    let coordinator = Arc::new(MutationCoordinator::new(
        cache.clone(),
        GatedBackend {
            gate: std::sync::Mutex::new(Some(gate)),
        },
    ));

    let first = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.mutate(1, StorePatch::status("B")).await })
    };
    // Let the first mutation apply locally and park on its in-flight request.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(cache.get(1).await.unwrap().status, "B");

    // Superseding edit on the same record completes first.
    coordinator.mutate(1, StorePatch::status("C")).await.unwrap();

    release.send(()).unwrap();
    let err = first.await.unwrap().unwrap_err();
    match err {
        MutationError::Remote { rolled_back, .. } => {
            assert!(!rolled_back, "stale rollback must be discarded");
        }
        other => panic!("expected a remote error, got {other:?}"),
    }
    assert_eq!(
        cache.get(1).await.unwrap().status,
        "C",
        "the later edit owns the final state"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Bulk mutation
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_rejects_empty_selection_before_the_network() {
    let cache = seeded_cache(vec![record(1, "A")]).await;
    let backend = MockBackend::default();
    let coordinator = MutationCoordinator::new(cache, backend.clone());

    let err = coordinator
        .bulk_mutate(&[], &StorePatch::status("C"))
        .await
        .unwrap_err();
    assert_eq!(err, BulkMutationError::EmptySelection);

    let err = coordinator
        .bulk_mutate(&[1], &StorePatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, BulkMutationError::EmptyPatch);

    assert_eq!(backend.0.bulk_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_bulk_leaves_the_collection_untouched() {
    let cache = seeded_cache(vec![record(1, "A"), record(2, "B")]).await;
    let before = cache.snapshot().await;
    let coordinator = MutationCoordinator::new(cache.clone(), MockBackend::failing());

    let err = coordinator
        .bulk_mutate(&[1, 2], &StorePatch::status("C"))
        .await
        .unwrap_err();
    assert!(matches!(err, BulkMutationError::Remote(_)));
    assert_eq!(cache.snapshot().await, before);
}

#[tokio::test]
async fn successful_bulk_defers_to_a_refetch() {
    let cache = seeded_cache(vec![record(1, "A"), record(2, "B")]).await;
    let coordinator = MutationCoordinator::new(cache.clone(), MockBackend::default());

    let outcome = coordinator
        .bulk_mutate(&[1, 2], &StorePatch::status("C"))
        .await
        .unwrap();
    assert_eq!(outcome.submitted, 2);

    // Pessimistic: the cache is only updated by the follow-up re-fetch.
    let records = cache.snapshot().await;
    assert_eq!(records[0].status, "A");
    assert_eq!(records[1].status, "B");
}

#[tokio::test]
async fn deep_sync_is_a_single_backend_call() {
    let cache = seeded_cache(vec![record(1, "A")]).await;
    let backend = MockBackend::default();
    let coordinator = MutationCoordinator::new(cache, backend.clone());

    coordinator.request_deep_sync(1).await.unwrap();
    assert_eq!(backend.0.sync_calls.load(Ordering::SeqCst), 1);
}
