//! Fetch-through query cache.
//!
//! Values are stored as JSON so one cache can hold every resource type.
//! Each key has its own async mutex: while a fetch for a key is running,
//! other callers for the same key wait and then reuse its result instead of
//! issuing a duplicate request. A key's mutex is dropped from the map once
//! nobody holds or waits on it.
//!
//! Invalidation bumps a global epoch and records it against the prefix. A
//! fetch that started before a matching invalidation still returns its value
//! to its caller but does not write it back, so pre-mutation data never
//! repopulates the cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, warn};

use crate::keys::QueryKey;

/// Whether a read may be answered from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve a fresh cached value, otherwise fetch (sharing in-flight requests).
    #[default]
    CacheFirst,
    /// Always fetch, then store the result. Used by pull-to-refresh.
    NetworkOnly,
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<QueryKey, Entry>,
    invalidated: HashMap<QueryKey, u64>,
}

#[derive(Debug)]
struct Inner {
    stale_time: Duration,
    epoch: AtomicU64,
    state: RwLock<State>,
    in_flight: Mutex<HashMap<QueryKey, Arc<AsyncMutex<()>>>>,
}

#[derive(Debug, Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                stale_time,
                epoch: AtomicU64::new(0),
                state: RwLock::new(State::default()),
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.inner.stale_time
    }

    /// Returns the cached value when fresh, otherwise runs `fetcher`.
    ///
    /// Concurrent calls for the same key share one fetch: callers that
    /// queued behind a running fetch receive the value it stored.
    pub async fn fetch<T, E, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let requested_at = Instant::now();
        if let Some(value) = self.lookup(key, |entry| self.is_fresh(entry)).await {
            debug!(key = %key, "Query cache hit");
            return Ok(value);
        }

        let slot = self.key_slot(key);
        let _guard = slot.lock.lock().await;

        let shared = self
            .lookup(key, |entry| {
                entry.fetched_at >= requested_at || self.is_fresh(entry)
            })
            .await;
        if let Some(value) = shared {
            debug!(key = %key, "Reused in-flight query result");
            return Ok(value);
        }

        self.run(key, fetcher).await
    }

    /// Runs `fetcher` regardless of freshness and stores the result.
    ///
    /// Still waits for an in-flight fetch of the same key first, so a
    /// refresh never races a load.
    pub async fn refetch<T, E, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, E>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let slot = self.key_slot(key);
        let _guard = slot.lock.lock().await;
        self.run(key, fetcher).await
    }

    pub async fn fetch_with<T, E, F, Fut>(
        &self,
        policy: FetchPolicy,
        key: &QueryKey,
        fetcher: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match policy {
            FetchPolicy::CacheFirst => self.fetch(key, fetcher).await,
            FetchPolicy::NetworkOnly => self.refetch(key, fetcher).await,
        }
    }

    /// Returns the cached value regardless of age.
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.lookup(key, |_| true).await
    }

    pub async fn set<T: Serialize>(&self, key: &QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.inner.state.write().await.entries.insert(
                    key.clone(),
                    Entry {
                        value,
                        fetched_at: Instant::now(),
                    },
                );
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to serialize value for cache"),
        }
    }

    /// Drops every entry under `prefix`. Returns how many were removed.
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut state = self.inner.state.write().await;
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        state.invalidated.insert(prefix.clone(), epoch);

        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - state.entries.len();
        debug!(prefix = %prefix, removed, "Invalidated queries");
        removed
    }

    pub async fn clear(&self) {
        let mut state = self.inner.state.write().await;
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        state.entries.clear();
        state.invalidated.clear();
        state.invalidated.insert(QueryKey::new(Vec::<String>::new()), epoch);
        drop(state);

        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub async fn len(&self) -> usize {
        self.inner.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn run<T, E, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, E>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = self.inner.epoch.load(Ordering::SeqCst);
        let value = fetcher().await?;
        self.store(key, &value, started).await;
        Ok(value)
    }

    async fn store<T: Serialize>(&self, key: &QueryKey, value: &T, started: u64) {
        let mut state = self.inner.state.write().await;
        let invalidated = state
            .invalidated
            .iter()
            .any(|(prefix, epoch)| *epoch > started && key.starts_with(prefix));
        if invalidated {
            debug!(key = %key, "Discarding result of a fetch invalidated mid-flight");
            return;
        }

        match serde_json::to_value(value) {
            Ok(value) => {
                state.entries.insert(
                    key.clone(),
                    Entry {
                        value,
                        fetched_at: Instant::now(),
                    },
                );
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to serialize value for cache"),
        }
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
        accept: impl Fn(&Entry) -> bool,
    ) -> Option<T> {
        let value = {
            let state = self.inner.state.read().await;
            let entry = state.entries.get(key).filter(|entry| accept(entry))?;
            entry.value.clone()
        };

        match serde_json::from_value(value) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Cached value did not decode, treating as miss");
                None
            }
        }
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        entry.fetched_at.elapsed() < self.inner.stale_time
    }

    fn key_slot(&self, key: &QueryKey) -> KeySlot<'_> {
        let lock = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default()
            .clone();
        KeySlot {
            inner: &self.inner,
            key: key.clone(),
            lock,
        }
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// A caller's handle on a key's mutex.
///
/// Clones are only handed out under the `in_flight` lock, so when the last
/// handle drops the map holds the only other reference and the entry goes.
struct KeySlot<'a> {
    inner: &'a Inner,
    key: QueryKey,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for KeySlot<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let idle = in_flight
            .get(&self.key)
            .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2);
        if idle {
            in_flight.remove(&self.key);
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use schoolhub_core::ListQuery;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    type Never = std::convert::Infallible;

    #[tokio::test]
    async fn test_concurrent_fetches_are_deduplicated() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = keys::list("students", &ListQuery::new());

        let fetch = || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, Never>(vec!["Ada".to_string()])
            }
        };

        let (a, b, c) = tokio::join!(
            cache.fetch(&key, fetch),
            cache.fetch(&key, fetch),
            cache.fetch(&key, fetch),
        );

        assert_eq!(a.unwrap(), vec!["Ada".to_string()]);
        assert_eq!(b.unwrap(), vec!["Ada".to_string()]);
        assert_eq!(c.unwrap(), vec!["Ada".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_key_locks_are_released() {
        let cache = QueryCache::default();
        for page in 0..200 {
            let key = keys::list("students", &ListQuery::new().search(format!("term {page}")));
            cache.fetch(&key, || async { Ok::<_, Never>(page) }).await.unwrap();
        }
        assert_eq!(cache.in_flight_len(), 0);
        assert_eq!(cache.len().await, 200);

        cache.clear().await;
        assert_eq!(cache.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_waiting_caller_keeps_key_lock() {
        let cache = QueryCache::default();
        let key = keys::detail("books", "bk-1");
        let started = Notify::new();
        let release = Notify::new();

        let first = cache.fetch(&key, || async {
            started.notify_one();
            release.notified().await;
            Ok::<_, Never>(1)
        });
        let second = async {
            started.notified().await;
            let (value, ()) = tokio::join!(cache.fetch(&key, || async { Ok::<_, Never>(2) }), async {
                assert_eq!(cache.in_flight_len(), 1);
                release.notify_one();
            });
            value
        };

        let (a, b) = tokio::join!(first, second);
        assert_eq!(a.unwrap(), 1);
        assert!(b.is_ok());
        assert_eq!(cache.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_zero_stale_time_refetches_sequential_calls() {
        let cache = QueryCache::default();
        let calls = AtomicUsize::new(0);
        let key = keys::detail("books", "bk-1");

        for _ in 0..2 {
            cache
                .fetch(&key, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Never>(1)
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fresh_value_is_served_from_cache() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let key = keys::detail("books", "bk-1");

        for _ in 0..3 {
            let value: u32 = cache
                .fetch(&key, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Never>(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = keys::detail("books", "bk-1");

        let failed: Result<u32, &str> = cache.fetch(&key, || async { Err("offline") }).await;
        assert_eq!(failed, Err("offline"));
        assert!(cache.is_empty().await);

        let ok: Result<u32, &str> = cache.fetch(&key, || async { Ok(3) }).await;
        assert_eq!(ok, Ok(3));
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = QueryCache::default();
        cache.set(&keys::list("hostel-buildings", &ListQuery::new()), &vec![1]).await;
        cache.set(&keys::detail("hostel-buildings", "b1"), &1).await;
        cache.set(&keys::detail("hostel-rooms", "r1"), &1).await;

        let removed = cache.invalidate(&keys::all("hostel-buildings")).await;

        assert_eq!(removed, 2);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get::<i32>(&keys::detail("hostel-rooms", "r1")).await, Some(1));
    }

    #[tokio::test]
    async fn test_invalidation_during_fetch_blocks_repopulation() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = keys::list("students", &ListQuery::new());
        let release = Arc::new(Notify::new());

        let pending = {
            let cache = cache.clone();
            let key = key.clone();
            let release = release.clone();
            tokio::spawn(async move {
                cache
                    .fetch(&key, || async move {
                        release.notified().await;
                        Ok::<_, Never>("stale".to_string())
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.invalidate(&keys::all("students")).await;
        release.notify_one();

        assert_eq!(pending.await.unwrap().unwrap(), "stale");
        assert!(cache.get::<String>(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = keys::detail("books", "bk-1");
        cache.set(&key, &"not a number").await;

        let value: u32 = cache.fetch(&key, || async { Ok::<_, Never>(9) }).await.unwrap();
        assert_eq!(value, 9);
    }

    #[tokio::test]
    async fn test_refetch_bypasses_fresh_entry() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = keys::detail("books", "bk-1");
        cache.set(&key, &1).await;

        let value = cache.refetch(&key, || async { Ok::<_, Never>(2) }).await.unwrap();
        assert_eq!(value, 2);
        assert_eq!(cache.get::<i32>(&key).await, Some(2));
    }
}
