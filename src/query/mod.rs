//! Query orchestration.
//!
//! Decides whether a declared query is answered from cache or from the network,
//! and in what state the result is exposed to pages.
//!
//! - `enabled = false` never calls the fetch function and reports `Idle`.
//! - At most one fetch per key is in flight; concurrent callers wait on it and
//!   share its outcome.
//! - Retryable failures get `retry` more attempts before the error is exposed.
//! - A failure keeps the entry's previous data alongside the error.

mod cache;
mod key;

pub use key::{KeyPart, QueryKey};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;

use cache::{Payload, QueryCache, Snapshot};

use crate::config::Config;
use crate::errors::ClientError;

/// Retention rules for cached query results.
#[derive(Debug, Clone, PartialEq)]
pub struct CachePolicy {
    /// Age after which an entry is refetched on next use.
    pub stale_after: Duration,
    /// Idle time after which an entry is dropped.
    pub evict_after: Duration,
    /// Upper bound on entries; least recently used go first.
    pub max_entries: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(300),
            evict_after: Duration::from_secs(1800),
            max_entries: 256,
        }
    }
}

/// Per-declaration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Precondition; when false the query is not requested at all.
    pub enabled: bool,
    /// Extra attempts after a retryable failure. `None` uses the client default.
    pub retry: Option<u32>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            retry: None,
        }
    }
}

impl QueryOptions {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = Some(retry);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Not requested (disabled, or never fetched).
    Idle,
    Loading,
    Success,
    Error,
}

/// What a page sees for one declared query.
#[derive(Debug)]
pub struct QueryResult<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<ClientError>,
}

impl<T> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T> QueryResult<T> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    fn success(data: Arc<T>) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }
}

struct Inner {
    cache: QueryCache,
    inflight: DashMap<QueryKey, Arc<Mutex<()>>>,
    retries: u32,
    retry_delay: Duration,
}

/// Shared query cache plus the in-flight registry. Cheap to clone.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl QueryClient {
    pub fn new(policy: CachePolicy, retries: u32, retry_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache: QueryCache::new(policy),
                inflight: DashMap::new(),
                retries,
                retry_delay,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.cache_policy(),
            config.query_retries,
            config.query_retry_delay,
        )
    }

    pub fn policy(&self) -> &CachePolicy {
        self.inner.cache.policy()
    }

    /// Resolve a declared query.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        options: QueryOptions,
        fetch_fn: F,
    ) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if !options.enabled {
            tracing::trace!(key = %key, "query disabled");
            return QueryResult::idle();
        }

        if let Some(snapshot) = self.inner.cache.lookup(key) {
            if snapshot.fresh {
                tracing::trace!(key = %key, "cache hit");
                return typed(key, snapshot);
            }
        }

        let seen = self.inner.cache.generation(key);
        let slot = self.slot(key);
        let result = {
            let _guard = slot.lock().await;

            // Someone else settled this key while we waited; take their outcome.
            let settled = if self.inner.cache.generation(key) != seen {
                self.inner.cache.lookup(key)
            } else {
                None
            };

            match settled {
                Some(snapshot) => {
                    tracing::trace!(key = %key, "joined in-flight query");
                    typed(key, snapshot)
                }
                None => {
                    let retries = options.retry.unwrap_or(self.inner.retries);
                    self.run(key, retries, &fetch_fn).await
                }
            }
        };

        drop(slot);
        self.release(key);
        result
    }

    async fn run<T, F, Fut>(&self, key: &QueryKey, retries: u32, fetch_fn: &F) -> QueryResult<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            tracing::debug!(key = %key, attempt, "fetching");
            match fetch_fn().await {
                Ok(value) => {
                    let data = Arc::new(value);
                    self.inner.cache.store_success(key, data.clone());
                    return QueryResult::success(data);
                }
                Err(e) if e.is_retryable() && attempt < retries => {
                    attempt += 1;
                    tracing::warn!(key = %key, attempt, "query failed, retrying: {}", e);
                    tokio::time::sleep(self.inner.retry_delay).await;
                }
                Err(e) => {
                    tracing::warn!(key = %key, "query failed: {}", e);
                    let prior = self.inner.cache.store_failure(key, e.clone());
                    return QueryResult {
                        status: QueryStatus::Error,
                        data: prior.and_then(|p| downcast(key, p)),
                        error: Some(e),
                    };
                }
            }
        }
    }

    fn slot(&self, key: &QueryKey) -> Arc<Mutex<()>> {
        self.inner
            .inflight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    fn release(&self, key: &QueryKey) {
        self.inner
            .inflight
            .remove_if(key, |_, slot| Arc::strong_count(slot) == 1);
    }

    /// Current state of a key without fetching. `Loading` while a fetch runs.
    pub fn observe<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryResult<T> {
        let in_flight = self
            .inner
            .inflight
            .get(key)
            .map(|slot| slot.try_lock().is_err())
            .unwrap_or(false);

        let mut result = match self.inner.cache.lookup(key) {
            Some(snapshot) => typed(key, snapshot),
            None => QueryResult::idle(),
        };
        if in_flight {
            result.status = QueryStatus::Loading;
        }
        result
    }

    /// Cached data for a key, stale or not.
    pub fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.inner
            .cache
            .lookup(key)
            .and_then(|s| s.data)
            .and_then(|p| downcast(key, p))
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.cache.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.inner.cache.invalidate(key)
    }

    pub fn invalidate_resource(&self, resource: &str) -> usize {
        let count = self.inner.cache.invalidate_resource(resource);
        tracing::debug!(resource, count, "invalidated queries");
        count
    }

    pub fn remove(&self, key: &QueryKey) -> bool {
        self.inner.cache.remove(key)
    }

    /// Drop idle entries. Returns how many were dropped.
    pub fn prune(&self) -> usize {
        self.inner.cache.prune()
    }

    pub fn clear(&self) {
        self.inner.cache.clear();
    }

    /// Run a mutation; on success mark every query of `resources` stale.
    pub async fn mutate<T, Fut>(&self, mutation: Fut, resources: &[&str]) -> Result<T, ClientError>
    where
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let value = mutation.await?;
        for resource in resources {
            self.invalidate_resource(resource);
        }
        Ok(value)
    }
}

fn typed<T: Send + Sync + 'static>(key: &QueryKey, snapshot: Snapshot) -> QueryResult<T> {
    let status = if snapshot.error.is_some() {
        QueryStatus::Error
    } else if snapshot.data.is_some() {
        QueryStatus::Success
    } else {
        QueryStatus::Idle
    };
    QueryResult {
        status,
        data: snapshot.data.and_then(|p| downcast(key, p)),
        error: snapshot.error,
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, payload: Payload) -> Option<Arc<T>> {
    match payload.downcast::<T>() {
        Ok(data) => Some(data),
        Err(_) => {
            tracing::warn!(key = %key, "cached value has a different type");
            None
        }
    }
}
