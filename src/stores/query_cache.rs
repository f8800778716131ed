//! Request-deduplicating TTL cache keyed by endpoint and parameters.

use crate::core::error::ApiError;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, OnceCell};
use tracing::debug;

/// One key's value, filled at most once by whichever caller gets there first
struct Slot<V> {
    cell: OnceCell<V>,
    created_at: Instant,
}

impl<V> Slot<V> {
    fn new() -> Self {
        Self {
            cell: OnceCell::new(),
            created_at: Instant::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        self.cell.initialized() && self.created_at.elapsed() >= ttl
    }
}

/// Thread-safe cache where concurrent fetches of the same key share one
/// backend request.
///
/// Failed fetches are never stored. Every invalidation bumps a revision that
/// subscribers can watch.
pub struct QueryCache<V> {
    slots: DashMap<String, Arc<Slot<V>>>,
    ttl: Duration,
    revision: watch::Sender<u64>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            slots: DashMap::new(),
            ttl,
            revision,
        }
    }

    fn slot_for(&self, key: &str) -> Arc<Slot<V>> {
        let mut entry = self
            .slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Slot::new()));

        if entry.is_stale(self.ttl) {
            debug!(key = key, "Cache entry expired");
            *entry = Arc::new(Slot::new());
        }

        Arc::clone(entry.value())
    }

    /// Return the cached value for `key`, or run `fetch` to fill it.
    ///
    /// While one fetch is in flight, other callers for the same key wait
    /// for its result instead of issuing their own.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        let slot = self.slot_for(key);
        let result = slot.cell.get_or_try_init(fetch).await.cloned();

        if result.is_err() {
            self.slots.remove_if(key, |_, current| Arc::ptr_eq(current, &slot));
        }

        result
    }

    /// Drop every key starting with `prefix` and notify subscribers
    pub fn invalidate(&self, prefix: &str) {
        self.slots.retain(|key, _| !key.starts_with(prefix));
        self.revision.send_modify(|rev| *rev += 1);
    }

    pub fn invalidate_all(&self) {
        self.invalidate("");
    }

    /// Receiver whose value changes after every invalidation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
