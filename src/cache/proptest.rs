//! Property-Based Tests for the Translation Cache
//!
//! Uses proptest to verify the LRU contract against a naive reference
//! model across arbitrary operation sequences.
//!
//! # Test Properties
//!
//! 1. **Capacity Bound**: `len() <= capacity` after every operation
//! 2. **Model Equivalence**: lookups and final contents match a
//!    Vec-based reference LRU
//! 3. **Overwrite Stability**: re-putting present keys never changes size
//! 4. **Eviction Order**: overflow always removes the reference model's
//!    oldest entry

#![cfg(test)]

use proptest::prelude::*;

use super::key::TranslationKey;
use super::lru::TranslationCache;

// =============================================================================
// Reference Model
// =============================================================================

/// Naive LRU over a Vec: index 0 is the least recently used end.
struct ModelLru {
    capacity: usize,
    entries: Vec<(TranslationKey, String)>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    fn get(&mut self, key: &TranslationKey) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        let entry = self.entries.remove(pos);
        let value = entry.1.clone();
        self.entries.push(entry);
        Some(value)
    }

    fn put(&mut self, key: TranslationKey, value: String) {
        if self.capacity == 0 {
            return;
        }
        if let Some(pos) = self.entries.iter().position(|(k, _)| k == &key) {
            self.entries.remove(pos);
        } else if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push((key, value));
    }

    fn keys(&self) -> Vec<TranslationKey> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

// =============================================================================
// Operation Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    Put(u8, u16),
}

/// Small key space so sequences revisit, overwrite, and evict.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::Get),
        (0u8..12, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..200)
}

fn nth_key(n: u8) -> TranslationKey {
    TranslationKey::new("en", "fr", format!("text-{}", n))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: any operation sequence keeps the entry count within
    /// capacity, and every lookup matches the reference model.
    #[test]
    fn prop_model_equivalence(capacity in 0usize..8, ops in ops_strategy()) {
        let cache = TranslationCache::new(capacity);
        let mut model = ModelLru::new(capacity);

        for op in &ops {
            match op {
                Op::Get(k) => {
                    let key = nth_key(*k);
                    prop_assert_eq!(cache.get(&key), model.get(&key));
                }
                Op::Put(k, v) => {
                    let key = nth_key(*k);
                    let value = v.to_string();
                    cache.put(key.clone(), value.clone());
                    model.put(key, value);
                }
            }
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.keys().len());
        }

        // Final contents agree with the model.
        for k in 0u8..12 {
            let key = nth_key(k);
            prop_assert_eq!(cache.contains(&key), model.keys().contains(&key));
        }
    }

    /// Property: overwriting a present key never changes the entry count
    /// and never evicts.
    #[test]
    fn prop_overwrite_preserves_len(
        capacity in 1usize..8,
        seed_values in prop::collection::vec(any::<u16>(), 1..8),
        rewrites in prop::collection::vec((0u8..8, any::<u16>()), 1..32),
    ) {
        let cache = TranslationCache::new(capacity);

        let seeded = seed_values.len().min(capacity);
        for (i, v) in seed_values.iter().take(seeded).enumerate() {
            cache.put(nth_key(i as u8), v.to_string());
        }
        let len_before = cache.len();
        let evictions_before = cache.evictions();

        for (k, v) in rewrites {
            let key = nth_key(k % seeded as u8);
            cache.put(key, v.to_string());
            prop_assert_eq!(cache.len(), len_before);
        }
        prop_assert_eq!(cache.evictions(), evictions_before);
    }

    /// Property: inserting capacity+1 distinct keys with no intervening
    /// reads leaves exactly `capacity` entries and drops the first key.
    #[test]
    fn prop_distinct_puts_evict_first(capacity in 1usize..8) {
        let cache = TranslationCache::new(capacity);

        for i in 0..=capacity {
            cache.put(nth_key(i as u8), i.to_string());
        }

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(!cache.contains(&nth_key(0)));
        prop_assert_eq!(cache.evictions(), 1);
    }

    /// Property: reads never change which keys are present.
    #[test]
    fn prop_get_preserves_key_set(
        capacity in 1usize..8,
        reads in prop::collection::vec(0u8..12, 1..64),
    ) {
        let cache = TranslationCache::new(capacity);
        for i in 0..capacity {
            cache.put(nth_key(i as u8), i.to_string());
        }

        let mut present: Vec<u8> = (0..capacity as u8)
            .filter(|i| cache.contains(&nth_key(*i)))
            .collect();
        present.sort_unstable();

        for k in reads {
            cache.get(&nth_key(k));
        }

        let mut after: Vec<u8> = (0..capacity as u8)
            .filter(|i| cache.contains(&nth_key(*i)))
            .collect();
        after.sort_unstable();

        prop_assert_eq!(present, after);
        prop_assert_eq!(cache.len(), capacity);
    }
}
