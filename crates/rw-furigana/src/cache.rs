//! Content-addressed cache for compiled matchers.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Default number of configurations kept by [`MatcherCache::new`].
pub const DEFAULT_CACHE_LIMIT: usize = 64;

/// Maps a raw configuration string to the value compiled from it.
///
/// Compilation is a pure function of the key, so a lookup never changes the
/// result, only whether it is rebuilt. Safe to share between threads; two
/// threads missing on the same key may both compile, and the first insert
/// wins.
///
/// The cache holds at most `limit` configurations. Inserting into a full
/// cache drops every entry first, so callers that cycle through many distinct
/// option strings pay for recompilation instead of unbounded growth. Values
/// already handed out stay valid.
pub struct MatcherCache<T> {
    entries: RwLock<HashMap<String, Arc<T>>>,
    limit: usize,
}

impl<T> Default for MatcherCache<T> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_CACHE_LIMIT)
    }
}

impl<T> MatcherCache<T> {
    /// Create an empty cache holding up to [`DEFAULT_CACHE_LIMIT`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding up to `limit` entries (at least one).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            limit: limit.max(1),
        }
    }

    /// Return the value for `key`, compiling it with `build` on a miss.
    pub fn get_or_build(&self, key: &str, build: impl FnOnce(&str) -> T) -> Arc<T> {
        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Arc::clone(hit);
        }

        let built = Arc::new(build(key));
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.limit && !entries.contains_key(key) {
            tracing::debug!(limit = self.limit, "Matcher cache full, clearing");
            entries.clear();
        }
        Arc::clone(entries.entry(key.to_owned()).or_insert(built))
    }

    /// Number of cached configurations.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
