//! Cache key derivation
//!
//! Builds deterministic cache keys from the logical identity of an upstream
//! request: the resource plus every parameter that affects the response.
//! Identical requests must map to identical keys to get cache hits, and any
//! parameter that changes the response must change the key.

use std::fmt::Display;

/// Composes a cache key from resource segments and optional parameters
///
/// Segments are sanitized (lowercased, spaces replaced with underscores) and
/// joined with underscores. Optional parameters are appended as
/// `name_value` pairs in the order they are declared, and omitted entirely
/// when absent, so requests differing only in unset parameters share a key.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    parts: Vec<String>,
}

impl KeyBuilder {
    /// Starts a key with the resource name (e.g., "league")
    pub fn new(resource: &str) -> Self {
        Self {
            parts: vec![sanitize(resource)],
        }
    }

    /// Appends a key segment (e.g., an entity id or sub-resource name)
    pub fn push(mut self, part: impl Display) -> Self {
        self.parts.push(sanitize(&part.to_string()));
        self
    }

    /// Appends a named parameter when present; skipped entirely when `None`
    pub fn param(mut self, name: &str, value: Option<impl Display>) -> Self {
        if let Some(value) = value {
            self.parts.push(sanitize(name));
            self.parts.push(sanitize(&value.to_string()));
        }
        self
    }

    /// Produces the final key
    pub fn build(self) -> String {
        self.parts.join("_")
    }
}

/// Normalizes a key segment so equivalent spellings collapse to one key
fn sanitize(part: &str) -> String {
    part.trim().replace(' ', "_").to_lowercase()
}
