//! # Cache Capability Traits
//!
//! Single-threaded capability traits implemented by
//! [`LruCore`](crate::policy::lru::LruCore). They take `&mut self` for anything
//! that touches recency; the thread-safe [`LruStore`](crate::policy::lru::LruStore)
//! exposes the same operations through `&self` behind its lock.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert, get, contains, len,            │
//!   │  is_empty, capacity, clear              │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │  remove                                 │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru, peek_lru, touch, recency_rank │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! Code that only needs "some cache" can be generic over the narrowest trait:
//!
//! ```
//! use std::sync::Arc;
//! use lru_store::policy::lru::LruCore;
//! use lru_store::traits::CoreCache;
//!
//! fn warm<C: CoreCache<u64, Arc<String>>>(cache: &mut C, items: &[(u64, &str)]) {
//!     for (key, value) in items {
//!         cache.insert(*key, Arc::new(value.to_string()));
//!     }
//! }
//!
//! let mut cache = LruCore::new(8);
//! warm(&mut cache, &[(1, "one"), (2, "two")]);
//! assert_eq!(cache.len(), 2);
//! ```

/// Operations every cache supports.
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key existed.
    ///
    /// Inserting a new key into a full cache evicts one entry first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a value by key, recording the access for eviction purposes.
    ///
    /// Use [`contains`](Self::contains) to test membership without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lru_store::policy::lru::LruCore;
/// use lru_store::traits::{CoreCache, MutableCache};
///
/// let mut cache = LruCore::new(4);
/// cache.insert("a", Arc::new(1));
///
/// assert_eq!(cache.remove(&"a").as_deref(), Some(&1));
/// assert_eq!(cache.remove(&"a"), None);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Recency-ordered operations.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lru_store::policy::lru::LruCore;
/// use lru_store::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCore::new(3);
/// cache.insert(1, Arc::new("first"));
/// cache.insert(2, Arc::new("second"));
///
/// // Key 1 is LRU until touched
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
/// assert!(cache.touch(&1));
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing or promoting it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without reading it.
    ///
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order (0 = most recent). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
