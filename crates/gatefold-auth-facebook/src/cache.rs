//! The per-consumer-type profile cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Token → profile cache for one consumer schema type.
///
/// The integrator constructs and owns the cache and passes it to the
/// authenticator, so its lifecycle (and reset between tests) is explicit.
/// The type parameter keys the cache by consumer type at compile time:
/// structurally different schemas live in different caches and can never
/// collide on a shared token string.
///
/// Tokens are opaque map keys; no normalization is applied. Entries are
/// never invalidated by this system (tokens are caller-managed), only
/// evicted under the optional capacity bound. Concurrent duplicate inserts
/// for the same token are last-writer-wins, which is idempotent since
/// repeated fetches for a valid token yield equal profiles.
pub struct ProfileCache<P> {
    entries: RwLock<HashMap<String, Arc<P>>>,
    capacity: Option<usize>,
}

impl<P> ProfileCache<P> {
    /// An unbounded cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: None,
        }
    }

    /// A cache holding at most `capacity` entries.
    ///
    /// When full, an arbitrary resident entry is evicted to make room; the
    /// contract only promises that a hit returns what was stored, not which
    /// entries survive.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    /// Look up the profile previously stored under this exact token.
    pub fn get(&self, token: &str) -> Option<Arc<P>> {
        let entries = self.entries.read().ok()?;
        entries.get(token).cloned()
    }

    /// Store a profile under the token, returning the shared view.
    pub fn insert(&self, token: &str, profile: P) -> Arc<P> {
        let profile = Arc::new(profile);

        // A poisoned lock means a panic elsewhere; serve the profile
        // uncached rather than propagating the panic into request handling.
        if let Ok(mut entries) = self.entries.write() {
            if let Some(capacity) = self.capacity {
                if entries.len() >= capacity && !entries.contains_key(token) {
                    if let Some(victim) = entries.keys().next().cloned() {
                        entries.remove(&victim);
                    }
                }
            }
            entries.insert(token.to_string(), profile.clone());
        }

        profile
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for ProfileCache<P> {
    fn default() -> Self {
        Self::new()
    }
}
