//! Translation Result Cache
//!
//! Bounded in-memory cache mapping the identity of a translation request
//! to its previously computed result, so repeated inputs never re-invoke
//! the translation backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     TranslationCache                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  HashMap<TranslationKey, slot>   │   usage order (MRU..LRU)  │
//! │  ┌────────────────────────────┐  │  ┌─────────────────────┐  │
//! │  │ (src, dst, text) → node    │  │  │ doubly-linked slab  │  │
//! │  └────────────────────────────┘  │  └─────────────────────┘  │
//! │                 guarded by one parking_lot::Mutex             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - O(1) `get`/`put` via hash map plus intrusive usage list
//! - Strict recency order: every hit and write promotes to MRU
//! - Exactly one eviction per overflow, always the LRU entry
//! - Lock held only for map/list surgery, never across an await

mod key;
mod lru;
mod proptest;

pub use key::TranslationKey;
pub use lru::{CacheStats, TranslationCache};

/// Default number of cached translations
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

// =============================================================================
// Tests
// =============================================================================
