#![forbid(unsafe_code)]

use parking_lot::{Condvar, Mutex};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Thread-safe key-value store with per-entry time-to-live.
///
/// Entries are immutable values; racing writers resolve last-write-wins.
/// Concurrent misses for the same key collapse into a single in-flight
/// fetch (see [`TtlCache::get_or_fetch`]).
pub struct TtlCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    fetch_done: Condvar,
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    in_flight: HashSet<K>,
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                in_flight: HashSet::new(),
            }),
            fetch_done: Condvar::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> Inner<K, V> {
    /// Returns the entry under `key` if it has not expired; expired
    /// entries are dropped on sight.
    fn live(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().live(key)
    }

    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.inner.lock().entries.insert(key, entry);
    }

    pub fn delete(&self, key: &K) {
        self.inner.lock().entries.remove(key);
    }

    /// Returns a fresh cached value, or runs `fetch` on a miss and
    /// populates the cache with the result.
    ///
    /// At most one fetch per key is in flight at a time: concurrent
    /// missers block until the leader finishes, then re-read the cache.
    /// A failed fetch caches nothing; one of the waiters takes over as
    /// the next leader. The cache lock is not held while `fetch` runs.
    pub fn get_or_fetch<E>(
        &self,
        key: K,
        ttl: Duration,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        {
            let mut inner = self.inner.lock();
            loop {
                if let Some(value) = inner.live(&key) {
                    return Ok(value);
                }
                if inner.in_flight.insert(key.clone()) {
                    break;
                }
                self.fetch_done.wait(&mut inner);
            }
        }

        let flight = FlightGuard { cache: self, key };
        let result = fetch();
        if let Ok(value) = &result {
            let entry = Entry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            };
            self.inner
                .lock()
                .entries
                .insert(flight.key.clone(), entry);
        }
        drop(flight);
        result
    }
}

/// Clears the in-flight marker and wakes waiters, even if the fetch
/// panicked.
struct FlightGuard<'a, K: Eq + Hash + Clone, V: Clone> {
    cache: &'a TtlCache<K, V>,
    key: K,
}

impl<K: Eq + Hash + Clone, V: Clone> Drop for FlightGuard<'_, K, V> {
    fn drop(&mut self) {
        self.cache.inner.lock().in_flight.remove(&self.key);
        self.cache.fetch_done.notify_all();
    }
}
