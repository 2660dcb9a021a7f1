//! Fetch/cache layer over the listing API.
//!
//! [`WorkerClient`] memoizes successful responses in a shared
//! [`ResponseCache`]; every clone of a client sees the same cache, so data
//! survives views being torn down and rebuilt within a session.

mod http;

pub use http::HttpSource;

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{Clock, ResponseCache, SystemClock, keys};
use crate::config::AppConfig;
use crate::error::FetchError;
use crate::models::services::ServiceStats;
use crate::models::workers::{WorkerPage, WorkerQuery, WorkerRecord};

/// Message shown for any failed worker fetch.
pub const WORKERS_ERROR: &str = "Failed to load workers";

/// Message shown for any failed service fetch.
pub const SERVICES_ERROR: &str = "Failed to load services";

/// Where listing data comes from. [`HttpSource`] is the real transport.
pub trait WorkerSource: Send + Sync {
    fn fetch_workers(
        &self,
        query: &WorkerQuery,
    ) -> impl Future<Output = Result<WorkerPage, FetchError>> + Send;

    fn fetch_services(&self) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;

    fn fetch_service_stats(
        &self,
    ) -> impl Future<Output = Result<Vec<ServiceStats>, FetchError>> + Send;
}

/// Outcome of [`WorkerClient::get_workers`], ready to hand to a view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkersResult {
    pub records: Vec<WorkerRecord>,
    pub total_count: u64,
    pub error: Option<String>,
}

impl WorkersResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            total_count: 0,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<WorkerPage> for WorkersResult {
    fn from(page: WorkerPage) -> Self {
        Self {
            records: page.records,
            total_count: page.total_count,
            error: None,
        }
    }
}

pub struct WorkerClient<S, C = SystemClock> {
    source: Arc<S>,
    cache: Arc<Mutex<ResponseCache<C>>>,
}

impl<S, C> Clone for WorkerClient<S, C> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl WorkerClient<HttpSource> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(HttpSource::new(&config.api_url), config.cache.ttl)
    }

    /// The process-wide client, built from the environment on first use.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<WorkerClient<HttpSource>> = OnceLock::new();
        SHARED.get_or_init(|| Self::from_config(&AppConfig::from_env()))
    }
}

impl<S: WorkerSource> WorkerClient<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, SystemClock)
    }
}

impl<S: WorkerSource, C: Clock> WorkerClient<S, C> {
    pub fn with_clock(source: S, ttl: Duration, clock: C) -> Self {
        Self {
            source: Arc::new(source),
            cache: Arc::new(Mutex::new(ResponseCache::with_clock(ttl, clock))),
        }
    }

    /// Fetch one listing page, serving it from cache while fresh.
    pub async fn fetch_workers(&self, query: &WorkerQuery) -> Result<WorkerPage, FetchError> {
        let key = keys::worker_list(query);
        self.cached(&key, || self.source.fetch_workers(query)).await
    }

    /// Fetch one listing page and fold any failure into the generic error
    /// state. Failures are not cached; calling again is the retry.
    pub async fn get_workers(&self, query: &WorkerQuery) -> WorkersResult {
        match self.fetch_workers(query).await {
            Ok(page) => page.into(),
            Err(e) => {
                warn!(page = query.page, "Worker fetch failed: {e}");
                WorkersResult::failed(WORKERS_ERROR)
            }
        }
    }

    pub async fn fetch_services(&self) -> Result<Vec<String>, FetchError> {
        self.cached(&keys::services(), || self.source.fetch_services())
            .await
    }

    /// Distinct service names, or the generic error message.
    pub async fn get_services(&self) -> Result<Vec<String>, String> {
        self.fetch_services().await.map_err(|e| {
            warn!("Service fetch failed: {e}");
            SERVICES_ERROR.to_string()
        })
    }

    pub async fn get_service_stats(&self) -> Result<Vec<ServiceStats>, String> {
        self.cached(&keys::service_stats(), || self.source.fetch_service_stats())
            .await
            .map_err(|e| {
                warn!("Service stats fetch failed: {e}");
                SERVICES_ERROR.to_string()
            })
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Drop one cached response by key (see [`crate::cache::keys`]).
    pub async fn invalidate(&self, key: &str) -> bool {
        self.cache.lock().await.invalidate(key)
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn cached<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T, FetchError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        if let Some(hit) = self.cache.lock().await.get::<T>(key) {
            debug!(key, "Cache hit");
            return Ok(hit);
        }

        debug!(key, "Cache miss");
        // The lock is not held across the request; overlapping misses on the
        // same key both fetch and the later write wins.
        let value = fetch().await?;

        if let Err(e) = self.cache.lock().await.insert(key, &value) {
            warn!(key, "Failed to cache response: {e}");
        }
        Ok(value)
    }
}
