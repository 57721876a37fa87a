//! Response caching for upstream API calls
//!
//! This module provides an in-memory cache for API responses with per-category
//! TTL (time-to-live) values. It supports graceful degradation by keeping
//! expired entries readable, allowing the application to serve stale data
//! when the upstream API is unavailable. Key derivation lives in [`key`],
//! the TTL table and fetch-through protocol in [`policy`].

pub mod key;
pub mod policy;
mod store;

pub use key::KeyBuilder;
pub use policy::{fetch_with_cache, ResourceCategory};
pub use store::{CacheError, CacheStats, CachedValue, EntryStats, ResponseCache};
