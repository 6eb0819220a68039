// TTL cache keyed by string
//
// Entries are never evicted, only overwritten, so the map grows with the
// number of distinct keys for the life of the process. Concurrent `set` on
// the same key is last-write-wins.
use crate::application::clock::Clock;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

struct CacheEntry<T> {
    value: T,
    stored_at: DateTime<Utc>,
}

pub struct CacheStore<T> {
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> CacheStore<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value only while it is younger than the TTL
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let entries = self.lock();
        let entry = entries.get(key)?;
        if now - entry.stored_at < self.ttl {
            Some(entry.value.clone())
        } else {
            tracing::debug!(key, "Cache entry expired");
            None
        }
    }

    pub fn set(&self, key: impl Into<String>, value: T) {
        let stored_at = self.clock.now();
        self.lock().insert(key.into(), CacheEntry { value, stored_at });
    }

    /// Physical entry count, stale entries included
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
