//! Caching policy: per-category TTLs and the fetch-through protocol
//!
//! Every upstream resource belongs to a [`ResourceCategory`] whose TTL
//! reflects how quickly that kind of data goes stale. [`fetch_with_cache`]
//! wraps an upstream call with the cache: fresh hits skip the network
//! entirely, successful fetches refresh the cache, and upstream failures
//! fall back to whatever entry is stored under the key — even an expired
//! one — before the error is allowed to propagate.

use std::future::Future;

use chrono::Duration;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::store::ResponseCache;

/// Classes of upstream data sharing one freshness requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    /// Competition metadata; rarely changes
    Leagues,
    /// Roster and venue data; changes infrequently
    Teams,
    /// Biographical player data; stable
    Players,
    /// League tables; updated after matches conclude
    Standings,
    /// Top scorer lists; derived from match results
    Scorers,
    /// Match fixtures and live status; transitions frequently
    Matches,
}

impl ResourceCategory {
    /// Time-to-live for cached responses in this category
    pub fn ttl(self) -> Duration {
        match self {
            ResourceCategory::Leagues => Duration::hours(24),
            ResourceCategory::Teams => Duration::hours(24),
            ResourceCategory::Players => Duration::hours(24),
            ResourceCategory::Standings => Duration::hours(3),
            ResourceCategory::Scorers => Duration::hours(3),
            ResourceCategory::Matches => Duration::hours(1),
        }
    }
}

/// Fetches a value through the cache
///
/// # Arguments
/// * `cache` - The shared response cache
/// * `key` - Cache key uniquely encoding the logical request
/// * `ttl` - How long a fetched response stays fresh
/// * `fetch` - The upstream call, invoked only on a cache miss
///
/// # Behavior
/// - A fresh cache hit is returned immediately; `fetch` is never invoked.
/// - On a miss, `fetch` runs once. Success stores the response under `key`
///   and returns it.
/// - On fetch failure, any stored entry under `key` — expired or not — is
///   returned instead of the error. Only when no entry exists at all does
///   the upstream error propagate to the caller.
///
/// There is no retry or request coalescing: concurrent misses for the same
/// key each invoke their own upstream call.
pub async fn fetch_with_cache<T, E, F, Fut>(
    cache: &ResponseCache,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(value) = cache.get::<T>(key) {
        return Ok(value);
    }

    debug!(key, "cache miss or expired, fetching from upstream");
    match fetch().await {
        Ok(value) => {
            if let Err(err) = cache.write(key, &value, ttl) {
                warn!(key, error = %err, "failed to cache upstream response");
            }
            Ok(value)
        }
        Err(upstream_err) => {
            // Bypass the expiry check: a stale answer beats no answer
            if let Some(stale) = cache.read::<T>(key) {
                warn!(key, "upstream request failed, serving stale cache entry");
                return Ok(stale.value);
            }
            Err(upstream_err)
        }
    }
}
