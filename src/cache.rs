//! Bounded FIFO cache of ranked results per normalized query.

use crate::types::MatchResult;
use ahash::AHashMap;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of query entries kept before eviction.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Query → results map with first-in-first-out eviction.
///
/// Eviction order is insertion order only: lookups do not refresh an entry,
/// so this is explicitly not an LRU. Re-inserting an existing key replaces
/// its value in place without changing its eviction slot.
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: AHashMap<String, Arc<Vec<MatchResult>>>,
    order: VecDeque<String>,
}

impl ResultCache {
    /// Creates a cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: AHashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Cached results for a normalized query, if present.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<MatchResult>>> {
        self.entries.get(key).cloned()
    }

    /// Inserts results for a normalized query, evicting the oldest insertion
    /// when at capacity.
    pub fn put(&mut self, key: &str, results: Arc<Vec<MatchResult>>) {
        if let Some(slot) = self.entries.get_mut(key) {
            *slot = results;
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.to_owned());
        self.entries.insert(key.to_owned(), results);
    }

    /// Empties the cache. Called on dataset or config replacement.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
