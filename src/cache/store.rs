// Cache store for expiring in-memory entries.
// Handles TTL checking, replace-on-set semantics, and the "known absent" marker.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lock::{rw_read, rw_write};

/// A cached lookup outcome: either a value, or a definitive "nothing there".
///
/// `Absent` is distinct from a cache miss. A miss means the key was never
/// looked up (or its entry expired); `Absent` means it was looked up and the
/// upstream answered that nothing exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Cached<T> {
    Present(T),
    Absent,
}

impl<T> Cached<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Cached::Present(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Cached::Present(value) => Some(value),
            Cached::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Cached<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cached::Absent, Cached::Present)
    }
}

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
    /// How long the entry stays live.
    pub ttl: Duration,
}

impl<T> CachedData<T> {
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
            ttl,
        }
    }

    /// Check if this entry's age exceeds its TTL.
    pub fn is_expired(&self) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed > self.ttl
    }

    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

/// Key/value store with a per-instance time-to-live.
///
/// Expiration is lazy: an expired entry reads as a miss and lingers until it
/// is overwritten or [`ExpiringCache::purge_expired`] runs. Access is
/// serialized internally, so one instance can be shared across tasks behind
/// an `Arc`. The lock only ever covers the map operation itself.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    name: &'static str,
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedData<V>>>,
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Default TTL applied by [`ExpiringCache::set`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry. Expired entries behave exactly like a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = rw_read(&self.entries, "get");
        match entries.get(key) {
            Some(entry) if entry.is_valid() => {
                tracing::trace!(cache = self.name, key, "cache hit");
                Some(entry.data.clone())
            }
            Some(_) => {
                tracing::trace!(cache = self.name, key, "cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Store a value under the instance TTL, replacing any prior entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.ttl);
    }

    /// Store a value with an explicit TTL, replacing any prior entry.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CachedData::new(value, ttl);
        rw_write(&self.entries, "set").insert(key.into(), entry);
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        rw_read(&self.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a live entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        rw_read(&self.entries, "contains")
            .get(key)
            .is_some_and(CachedData::is_valid)
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = rw_write(&self.entries, "purge_expired");
        let before = entries.len();
        entries.retain(|_, entry| entry.is_valid());
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(cache = self.name, removed, "purged expired entries");
        }
        removed
    }

    pub fn clear(&self) {
        rw_write(&self.entries, "clear").clear();
    }

    /// Shift an entry's timestamp into the past.
    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &str, by: chrono::Duration) {
        if let Some(entry) = rw_write(&self.entries, "backdate").get_mut(key) {
            entry.cached_at -= by;
        }
    }
}
