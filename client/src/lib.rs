//! Backend API client
//!
//! Provides type-safe wrappers around the monitor backend's HTTP endpoints,
//! centralizing all network communication. Every fetched payload passes
//! through the core normalizer before it reaches typed collections, so a
//! misshapen response degrades to an empty result instead of an error deep
//! inside the grid.

use std::time::Duration;

use reqwest::Response;
use serde::Serialize;
use serde_json::Value;

use rollout_core::mutation::{BackendError, StoreBackend};
use rollout_core::normalize::{StoresPayload, normalize_stores, normalize_vec};
use rollout_types::{CapacityRecord, PerformanceRecord, StoreId, StorePatch};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => BackendError::Transport(e.to_string()),
            ApiError::Status(code) => BackendError::Status(code),
        }
    }
}

/// Wire body for the bulk-update endpoint: the id list plus the patch fields
/// inlined at the top level.
#[derive(Debug, Serialize)]
struct BulkUpdateBody<'a> {
    store_ids: &'a [StoreId],
    #[serde(flatten)]
    patch: &'a StorePatch,
}

/// Typed client for the monitor backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Fetch the store collection, optionally pre-filtered by backend status.
    pub async fn fetch_stores(&self, status: Option<&str>) -> Result<StoresPayload, ApiError> {
        let mut request = self.http.get(self.url("/stores")).timeout(REQUEST_TIMEOUT);
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        let response = check(request.send().await?)?;
        let value: Value = response.json().await?;
        let payload = normalize_stores(value);
        tracing::debug!(
            stores = payload.stores.len(),
            matrices = payload.matrices.len(),
            "Fetched store collection"
        );
        Ok(payload)
    }

    /// Fetch the windowed per-person performance dataset.
    pub async fn fetch_performance(&self) -> Result<Vec<PerformanceRecord>, ApiError> {
        let value = self.get_json("/analytics/performance").await?;
        Ok(normalize_vec(value, "performance"))
    }

    /// Fetch the per-person capacity snapshot. Fetched independently of
    /// performance; callers re-fetch it only when its own inputs change, not
    /// on every filter change.
    pub async fn fetch_capacity(&self) -> Result<Vec<CapacityRecord>, ApiError> {
        let value = self.get_json("/analytics/capacity").await?;
        Ok(normalize_vec(value, "capacity"))
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Ok(check(response)?.json().await?)
    }

    async fn put_store(&self, id: StoreId, patch: &StorePatch) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/store/{id}")))
            .timeout(REQUEST_TIMEOUT)
            .json(patch)
            .send()
            .await?;
        check(response)?;
        Ok(())
    }

    async fn post_bulk_update(&self, ids: &[StoreId], patch: &StorePatch) -> Result<(), ApiError> {
        let body = BulkUpdateBody {
            store_ids: ids,
            patch,
        };
        let response = self
            .http
            .post(self.url("/stores/bulk-update"))
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;
        check(response)?;
        Ok(())
    }

    async fn post_deep_sync(&self, id: StoreId) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/deep-sync/store/{id}")))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        check(response)?;
        Ok(())
    }
}

impl StoreBackend for ApiClient {
    async fn update_store(&self, id: StoreId, patch: &StorePatch) -> Result<(), BackendError> {
        self.put_store(id, patch).await.map_err(Into::into)
    }

    async fn bulk_update(&self, ids: &[StoreId], patch: &StorePatch) -> Result<(), BackendError> {
        self.post_bulk_update(ids, patch).await.map_err(Into::into)
    }

    async fn deep_sync(&self, id: StoreId) -> Result<(), BackendError> {
        self.post_deep_sync(id).await.map_err(Into::into)
    }
}

fn check(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status().as_u16()))
    }
}
