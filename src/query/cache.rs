use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::time::Instant;

use super::{CachePolicy, QueryKey};
use crate::errors::ClientError;

pub(crate) type Payload = Arc<dyn Any + Send + Sync>;

struct Entry {
    data: Option<Payload>,
    error: Option<ClientError>,
    updated_at: Instant,
    last_access: Instant,
    generation: u64,
    invalidated: bool,
}

/// Point-in-time view of one entry.
pub(crate) struct Snapshot {
    pub data: Option<Payload>,
    pub error: Option<ClientError>,
    pub fresh: bool,
}

/// Key to entry map with time-based expiry and a size bound.
///
/// Entries are only ever replaced whole. Every write stamps a generation number
/// unique across the cache, which lets a caller tell whether a key settled while
/// it was waiting.
pub(crate) struct QueryCache {
    entries: DashMap<QueryKey, Entry>,
    policy: CachePolicy,
    next_generation: AtomicU64,
}

impl QueryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
            next_generation: AtomicU64::new(1),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Read an entry, touching its access time. Idle entries are evicted first.
    pub fn lookup(&self, key: &QueryKey) -> Option<Snapshot> {
        let now = Instant::now();
        let evict_after = self.policy.evict_after;
        if self
            .entries
            .remove_if(key, |_, entry| now.duration_since(entry.last_access) > evict_after)
            .is_some()
        {
            tracing::debug!(key = %key, "evicted idle query");
            return None;
        }

        let mut entry = self.entries.get_mut(key)?;
        entry.last_access = now;
        let fresh = entry.data.is_some()
            && entry.error.is_none()
            && !entry.invalidated
            && now.duration_since(entry.updated_at) <= self.policy.stale_after;

        Some(Snapshot {
            data: entry.data.clone(),
            error: entry.error.clone(),
            fresh,
        })
    }

    /// Generation of the last write to `key`; 0 if there is none.
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.entries.get(key).map(|e| e.generation).unwrap_or(0)
    }

    pub fn store_success(&self, key: &QueryKey, data: Payload) {
        self.write(key, Some(data), None);
    }

    /// Record a failure, keeping whatever data the entry already had.
    pub fn store_failure(&self, key: &QueryKey, error: ClientError) -> Option<Payload> {
        let prior = self.entries.get(key).and_then(|e| e.data.clone());
        self.write(key, prior.clone(), Some(error));
        prior
    }

    fn write(&self, key: &QueryKey, data: Option<Payload>, error: Option<ClientError>) {
        let now = Instant::now();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            key.clone(),
            Entry {
                data,
                error,
                updated_at: now,
                last_access: now,
                generation,
                invalidated: false,
            },
        );
        self.enforce_capacity(key);
    }

    fn enforce_capacity(&self, keep: &QueryKey) {
        while self.entries.len() > self.policy.max_entries.max(1) {
            let victim = self
                .entries
                .iter()
                .filter(|e| e.key() != keep)
                .min_by_key(|e| e.value().last_access)
                .map(|e| e.key().clone());

            match victim {
                Some(victim) => {
                    tracing::debug!(key = %victim, "evicted least recently used query");
                    self.entries.remove(&victim);
                }
                None => break,
            }
        }
    }

    /// Mark an entry stale; its data stays readable until the refetch lands.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    pub fn invalidate_resource(&self, resource: &str) -> usize {
        let mut count = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.key().resource() == resource {
                entry.invalidated = true;
                count += 1;
            }
        }
        count
    }

    /// Drop every idle entry.
    pub fn prune(&self) -> usize {
        let now = Instant::now();
        let evict_after = self.policy.evict_after;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.last_access) <= evict_after);
        before - self.entries.len()
    }

    pub fn remove(&self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
