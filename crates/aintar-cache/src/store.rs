//! In-process TTL cache.
//!
//! Values are stored as JSON so one cache can hold permission sets, metadata
//! snapshots and document lists side by side. Expiry is checked explicitly on
//! read; [`CacheManager::purge_expired`] drops stale entries in bulk.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= self.ttl
    }
}

/// Thread-safe key/value cache with per-entry TTL.
#[derive(Debug)]
pub struct CacheManager {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl CacheManager {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Gets a cached value by key.
    ///
    /// Returns `None` if the key is missing, expired or fails to deserialize.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let value = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                Some(entry) if !entry.is_expired(Instant::now()) => entry.value.clone(),
                Some(_) => {
                    debug!(cache.key = %key, "Cache entry expired");
                    return None;
                }
                None => {
                    debug!(cache.key = %key, "Cache miss");
                    return None;
                }
            }
        };

        debug!(cache.key = %key, "Cache hit");
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                error!(cache.key = %key, error = %e, "Failed to deserialize cached value");
                None
            }
        }
    }

    /// Sets a cached value with the default TTL.
    pub fn insert<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.insert_with_ttl(key, value, self.default_ttl)
    }

    /// Sets a cached value with a custom TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    pub fn insert_with_ttl<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let value = serde_json::to_value(value)?;
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
            ttl,
        };

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);

        debug!(cache.key = %key, cache.ttl_secs = %ttl.as_secs(), "Cache set");
        Ok(())
    }

    /// Returns the cached value, or computes, stores and returns it.
    ///
    /// A value that cannot be stored is still returned.
    pub fn get_or_insert_with<T, F>(&self, key: &str, compute: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = compute();
        if let Err(e) = self.insert(key, &value) {
            error!(cache.key = %key, error = %e, "Failed to cache computed value");
        }
        value
    }

    /// Removes one key. Returns whether it was present.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some();
        debug!(cache.key = %key, removed, "Cache invalidated");
        removed
    }

    /// Removes every key starting with `prefix`. Returns how many went.
    #[instrument(skip(self), fields(cache.operation = "DEL_PREFIX"))]
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let deleted = before - entries.len();

        debug!(cache.prefix = %prefix, cache.deleted = %deleted, "Prefix invalidation complete");
        deleted
    }

    /// Drops every expired entry. Returns how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Snapshot {
        id: i32,
        name: String,
    }

    #[test]
    fn test_insert_and_get() {
        let cache = CacheManager::new(Duration::from_secs(60));
        let data = Snapshot {
            id: 1,
            name: "ETAR Viseu".to_string(),
        };

        cache.insert("snapshot:1", &data).unwrap();

        let retrieved: Option<Snapshot> = cache.get("snapshot:1");
        assert_eq!(retrieved, Some(data));
        assert!(cache.get::<Snapshot>("snapshot:2").is_none());
    }

    #[test]
    fn test_expired_entries_are_not_returned() {
        let cache = CacheManager::new(Duration::from_secs(60));
        cache
            .insert_with_ttl("stale", &vec![1, 2, 3], Duration::ZERO)
            .unwrap();
        cache.insert("fresh", &vec![4]).unwrap();

        assert!(cache.get::<Vec<i32>>("stale").is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<Vec<i32>>("fresh"), Some(vec![4]));
    }

    #[test]
    fn test_wrong_type_is_a_miss() {
        let cache = CacheManager::default();
        cache.insert("number", &42).unwrap();
        assert!(cache.get::<Snapshot>("number").is_none());
    }

    #[test]
    fn test_invalidate_and_prefix() {
        let cache = CacheManager::default();
        cache.insert("aintar:user:1:permissions", &[200]).unwrap();
        cache.insert("aintar:user:2:permissions", &[300]).unwrap();
        cache.insert("aintar:metadata:snapshot", &"{}").unwrap();

        assert!(cache.invalidate("aintar:metadata:snapshot"));
        assert!(!cache.invalidate("aintar:metadata:snapshot"));
        assert_eq!(cache.invalidate_prefix("aintar:user:"), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let cache = CacheManager::default();
        let mut calls = 0;
        let first: Vec<u32> = cache.get_or_insert_with("k", || {
            calls += 1;
            vec![200, 201]
        });
        let second: Vec<u32> = cache.get_or_insert_with("k", || {
            calls += 1;
            vec![]
        });
        assert_eq!(first, second);
        assert_eq!(calls, 1);
    }
}
