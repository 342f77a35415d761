//! Bounded LRU store for translation results.
//!
//! Classic least-recently-used design: a hash map resolves a key to a slot
//! in a slab-backed doubly-linked list that carries the usage order. Both
//! `get` and `put` are O(1); every access strictly reorders the touched
//! entry to the most-recently-used end, so eviction candidates are never
//! ambiguous.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::key::TranslationKey;

/// Sentinel slot index for list ends
const NIL: usize = usize::MAX;

/// One cached translation plus its links in the usage order.
struct Node {
    key: TranslationKey,
    value: String,
    prev: usize,
    next: usize,
}

/// Usage-ordered storage. `head` is most recently used, `tail` least.
struct LruState {
    map: HashMap<TranslationKey, usize>,
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl LruState {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    /// Detach a slot from the usage list without freeing it.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
    }

    /// Attach a detached slot at the most-recently-used end.
    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;

        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }

    /// Promote a slot to most recently used.
    fn touch(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    /// Remove and return the least-recently-used key.
    fn pop_lru(&mut self) -> Option<TranslationKey> {
        let idx = self.tail;
        if idx == NIL {
            return None;
        }

        self.unlink(idx);
        let key = self.nodes[idx].key.clone();
        self.map.remove(&key);
        // Release the payload now; the slot itself is recycled.
        self.nodes[idx].value = String::new();
        self.free.push(idx);
        Some(key)
    }

    /// Insert a key known to be absent, at the most-recently-used end.
    fn insert_front(&mut self, key: TranslationKey, value: String) {
        let node = Node {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        };

        let idx = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.map.insert(key, idx);
        self.push_front(idx);
    }

    fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Keys in usage order, most recently used first. Test support.
    #[cfg(test)]
    fn usage_order(&self) -> Vec<TranslationKey> {
        let mut order = Vec::with_capacity(self.map.len());
        let mut idx = self.head;
        while idx != NIL {
            order.push(self.nodes[idx].key.clone());
            idx = self.nodes[idx].next;
        }
        order
    }
}

/// Thread-safe bounded LRU cache for translation results.
///
/// Shared process-wide across concurrent requests; a single mutex guards
/// the map and the usage order so reordering and eviction never
/// interleave. Callers perform the translation itself outside the lock.
pub struct TranslationCache {
    inner: Mutex<LruState>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl TranslationCache {
    /// Create a cache holding at most `capacity` translations.
    ///
    /// A capacity of zero disables caching entirely: `put` is a no-op and
    /// every `get` is a miss.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruState::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up a cached translation.
    ///
    /// A hit promotes the entry to most recently used before returning.
    /// A miss leaves the cache untouched.
    pub fn get(&self, key: &TranslationKey) -> Option<String> {
        let mut inner = self.inner.lock();

        match inner.map.get(key).copied() {
            Some(idx) => {
                inner.touch(idx);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(inner.nodes[idx].value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert or overwrite a translation; the entry becomes most recently
    /// used.
    ///
    /// Inserting a new key into a full cache evicts exactly one entry,
    /// the least-recently-used one. Overwriting an existing key never
    /// changes the entry count and never evicts.
    pub fn put(&self, key: TranslationKey, value: String) {
        if self.capacity == 0 {
            return;
        }

        let mut inner = self.inner.lock();

        if let Some(idx) = inner.map.get(&key).copied() {
            inner.nodes[idx].value = value;
            inner.touch(idx);
            return;
        }

        if inner.len() == self.capacity && inner.pop_lru().is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }

        inner.insert_front(key, value);
    }

    /// Check for a key without touching its recency.
    pub fn contains(&self, key: &TranslationKey) -> bool {
        self.inner.lock().map.contains_key(key)
    }

    /// Current entry count; always `<= capacity`.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. Stats counters are preserved.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get hit count
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get miss count
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get eviction count
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Get hit ratio
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits: self.hits(),
            misses: self.misses(),
            evictions: self.evictions(),
            hit_ratio: self.hit_ratio(),
        }
    }

    /// Keys in usage order, most recently used first. Test support.
    #[cfg(test)]
    pub(crate) fn usage_order(&self) -> Vec<TranslationKey> {
        self.inner.lock().usage_order()
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("entries", &self.len())
            .field("capacity", &self.capacity)
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .field("evictions", &self.evictions())
            .finish()
    }
}

/// Cache statistics snapshot
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of entries
    pub entries: usize,
    /// Configured capacity
    pub capacity: usize,
    /// Hit count
    pub hits: u64,
    /// Miss count
    pub misses: u64,
    /// Eviction count
    pub evictions: u64,
    /// Hit ratio (0.0 - 1.0)
    pub hit_ratio: f64,
}

// =============================================================================
// Tests
// =============================================================================
