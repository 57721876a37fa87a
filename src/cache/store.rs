//! In-memory response cache
//!
//! Provides a `ResponseCache` that stores serializable API responses in a
//! shared in-process map with expiry timestamps, supporting graceful
//! degradation when the upstream API is unavailable.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when writing to the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The value could not be serialized to JSON
    #[error("Failed to serialize value for caching: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single stored response with its expiry metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload as plain JSON
    value: serde_json::Value,
    /// When the payload was cached
    cached_at: DateTime<Utc>,
    /// When the entry stops being fresh
    expires_at: DateTime<Utc>,
}

/// Result of reading from the cache, including metadata about freshness
#[derive(Debug)]
pub struct CachedValue<T> {
    /// The cached payload
    pub value: T,
    /// When the payload was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the entry has expired
    pub is_expired: bool,
}

/// Per-key diagnostics reported by [`ResponseCache::stats`]
#[derive(Debug, Clone, Serialize)]
pub struct EntryStats {
    /// Whether the entry is currently expired
    pub expired: bool,
    /// Seconds until expiry; negative once the entry has expired
    pub expires_in_secs: i64,
}

/// Snapshot of the cache contents for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Number of entries currently stored, expired or not
    pub total_items: usize,
    /// Diagnostics for every stored key
    pub items: BTreeMap<String, EntryStats>,
}

/// Shared in-memory cache for upstream API responses
///
/// A `ResponseCache` is a cheap handle: cloning it yields another handle to
/// the same store, so a single instance constructed at startup can be passed
/// to every consumer. Entries carry an expiry timestamp; an entry is fresh
/// while `now < expires_at` and stale afterwards. Stale entries are not
/// evicted — they remain readable through [`read`](Self::read) so consumers
/// can fall back to them when the upstream API fails, and they stay in the
/// store until overwritten or cleared.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    store: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    /// Creates a new, empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store, recovering the guard if a panic poisoned the lock
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a value under `key` with the given time-to-live
    ///
    /// Overwrites any existing entry for `key` unconditionally. The value is
    /// stored as plain JSON; no shape validation is performed.
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the entry (e.g., "league_2021_standings")
    /// * `value` - The payload to cache (must implement Serialize)
    /// * `ttl` - How long the entry should be considered fresh
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CacheError)` if the value cannot be serialized to JSON
    pub fn write<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        let now = Utc::now();
        let entry = CacheEntry {
            value,
            cached_at: now,
            expires_at: now + ttl,
        };

        debug!(key, "caching response");
        self.lock().insert(key.to_string(), entry);
        Ok(())
    }

    /// Reads an entry regardless of freshness
    ///
    /// Returns `Some(CachedValue)` with `is_expired = true` if the entry
    /// exists but has expired, allowing graceful degradation when the
    /// upstream API is unavailable. Returns `None` if no entry exists or the
    /// stored value cannot be deserialized as `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedValue<T>> {
        let entry = self.lock().get(key).cloned()?;
        let value = serde_json::from_value(entry.value).ok()?;

        let now = Utc::now();
        Some(CachedValue {
            value,
            cached_at: entry.cached_at,
            is_expired: now >= entry.expires_at,
        })
    }

    /// Returns the stored value only if the entry is still fresh
    ///
    /// Expired-but-present entries return `None` here; they stay in the
    /// store and remain reachable through [`read`](Self::read).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cached = self.read(key)?;
        if cached.is_expired {
            return None;
        }
        debug!(key, "cache hit");
        Some(cached.value)
    }

    /// Removes a single entry; no-op if the key is absent
    pub fn clear(&self, key: &str) {
        if self.lock().remove(key).is_some() {
            debug!(key, "cleared cache entry");
        }
    }

    /// Empties the entire store
    pub fn clear_all(&self) {
        self.lock().clear();
        debug!("cleared all cache entries");
    }

    /// Reports, for every stored key, whether it is expired and how many
    /// seconds remain until expiry (negative once expired)
    pub fn stats(&self) -> CacheStats {
        let store = self.lock();
        let now = Utc::now();

        let items = store
            .iter()
            .map(|(key, entry)| {
                let stats = EntryStats {
                    expired: now >= entry.expires_at,
                    expires_in_secs: (entry.expires_at - now).num_seconds(),
                };
                (key.clone(), stats)
            })
            .collect();

        CacheStats {
            total_items: store.len(),
            items,
        }
    }
}
