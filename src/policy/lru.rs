//! # Least Recently Used (LRU) Store
//!
//! A fixed-capacity key-value store that evicts the least recently used entry
//! when a new key would exceed capacity, safe to share between threads.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruStore<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │                  Arc<Mutex<LruCore<K, V>>>                   │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   │                               │                                      │
//!   │                               ▼                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │                       LruCore<K, V>                          │   │
//!   │   │                                                              │   │
//!   │   │   index: FxHashMap<K, SlotId>          (lookup index)        │   │
//!   │   │   ┌─────────┬──────────┐                                     │   │
//!   │   │   │  "a"    │  id_2  ──┼──────────────┐                      │   │
//!   │   │   │  "b"    │  id_0  ──┼───────┐      │                      │   │
//!   │   │   │  "c"    │  id_1  ──┼──┐    │      │                      │   │
//!   │   │   └─────────┴──────────┘  │    │      │                      │   │
//!   │   │                           ▼    ▼      ▼                      │   │
//!   │   │   order: IntrusiveList<Entry<K, V>>    (order index)         │   │
//!   │   │   head ──► [c] ◄──► [b] ◄──► [a] ◄── tail                    │   │
//!   │   │            MRU                LRU                            │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries (key + `Arc<V>`) are owned by the recency list, which stores its
//! nodes in a [`SlotArena`](crate::ds::SlotArena). The index only holds the
//! `SlotId` handle of each node.
//!
//! ## Operations
//!
//! | Method        | Recency effect      | Complexity |
//! |---------------|---------------------|------------|
//! | `set`         | key becomes MRU     | O(1)*      |
//! | `get`         | key becomes MRU     | O(1)       |
//! | `peek`        | none                | O(1)       |
//! | `delete`      | entry removed       | O(1)       |
//! | `touch`       | key becomes MRU     | O(1)       |
//! | `pop_lru`     | tail removed        | O(1)       |
//! | `clear`       | all removed         | O(n)       |
//! | `len` / `cap` | none                | O(1)       |
//!
//! \* Setting a new key into a full store evicts exactly one entry, the tail.
//! Updating an existing key never evicts.
//!
//! ## Concurrency Model
//!
//! Every `LruStore` method takes the same `parking_lot::Mutex`. `get` reorders
//! the list, so there is no shared read path; `peek` takes the exclusive lock
//! too. Eviction happens inside the `set` critical section, so no caller can
//! observe `len() > cap()`.
//!
//! Values that leave the store (replaced, evicted, deleted, popped or cleared)
//! are dropped after the lock is released, so a value's `Drop` may call back
//! into the same store.
//!
//! The mutex does not poison. A key whose `Clone` panics leaves the store
//! untouched; a key whose `Hash` or `Eq` panics mid-call leaves the set of
//! entries unspecified, though every later call stays memory safe.
//!
//! ## Example
//!
//! ```
//! use lru_store::policy::lru::LruStore;
//!
//! let store: LruStore<&str, i32> = LruStore::new(2);
//! store.set("a", 1);
//! store.set("b", 2);
//!
//! assert_eq!(store.get(&"a").as_deref(), Some(&1)); // "a" is now MRU
//! store.set("c", 3);                                  // evicts "b"
//!
//! assert!(store.get(&"b").is_none());
//! assert_eq!(store.len(), 2);
//! ```

use std::collections::hash_map::Entry as IndexEntry;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

const ZERO_CAPACITY: &str = "capacity must be greater than 0";

fn validate_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::new(ZERO_CAPACITY));
    }
    Ok(())
}

/// Node payload in the recency list.
///
/// The key is kept alongside the value so evicting the tail can also remove
/// the matching index entry.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// Single-threaded LRU core: lookup index + recency list.
///
/// Not synchronized. [`LruStore`] wraps it in a mutex; use the core directly
/// only when the caller already owns exclusive access.
pub struct LruCore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty core holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) when the
    /// capacity comes from user configuration.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(core) => core,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor; rejects a zero capacity instead of panicking.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        validate_capacity(capacity)?;
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
            capacity,
        })
    }

    /// Looks up `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&Arc<V>> {
        let &id = self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Keys from most to least recently used.
    pub fn keys_mru(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Verifies that the index and the recency list describe the same entries.
    ///
    /// O(n); intended for tests and fuzzing.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.validate()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "length {} exceeds capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} is indexed under a different key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at empty slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    /// Inserts or updates `key` and hands back everything the call displaced:
    /// the previous value of an updated key, and the entry evicted to make
    /// room for a new one.
    ///
    /// [`LruStore`] uses this to release displaced values after unlocking.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lru_store::policy::lru::LruCore;
    ///
    /// let mut core = LruCore::new(1);
    /// assert_eq!(core.insert_with_evicted("a", Arc::new(1)), (None, None));
    ///
    /// let (previous, evicted) = core.insert_with_evicted("b", Arc::new(2));
    /// assert!(previous.is_none());
    /// assert_eq!(evicted, Some(("a", Arc::new(1))));
    /// ```
    pub fn insert_with_evicted(
        &mut self,
        key: K,
        value: Arc<V>,
    ) -> (Option<Arc<V>>, Option<(K, Arc<V>)>) {
        if let Some(&id) = self.index.get(&key) {
            return (self.replace_value(id, value), None);
        }

        // Nothing is mutated until the key clone succeeds.
        let stored = key.clone();

        // len <= capacity holds on entry, so one pop always makes room.
        let evicted = if self.order.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };
        if evicted.is_some() {
            trace!(capacity = self.capacity, "evicted least recently used entry");
        }

        match self.index.entry(key) {
            IndexEntry::Vacant(slot) => {
                slot.insert(self.order.push_front(Entry { key: stored, value }));
                self.debug_check_sizes();
                (None, evicted)
            },
            // The lookup above missed, so this arm only runs for keys whose
            // `Hash`/`Eq` disagree between calls.
            IndexEntry::Occupied(slot) => {
                let id = *slot.get();
                (self.replace_value(id, value), evicted)
            },
        }
    }

    fn replace_value(&mut self, id: SlotId, value: Arc<V>) -> Option<Arc<V>> {
        let previous = self
            .order
            .get_mut(id)
            .map(|entry| mem::replace(&mut entry.value, value));
        self.order.move_to_front(id);
        self.debug_check_sizes();
        previous
    }

    /// Removes the tail entry from both the index and the list.
    ///
    /// The index goes first: hashing the key is the only step that runs
    /// caller code, and a panic there leaves both sides untouched.
    fn evict_lru(&mut self) -> Option<(K, Arc<V>)> {
        let tail = self.order.back()?;
        self.index.remove(&tail.key);
        let entry = self.order.pop_back()?;
        Some((entry.key, entry.value))
    }

    /// Removes `key` and returns the indexed key copy with its entry.
    fn take_entry(&mut self, key: &K) -> Option<(K, Entry<K, V>)> {
        let (indexed, id) = self.index.remove_entry(key)?;
        let entry = self.order.remove(id)?;
        self.debug_check_sizes();
        Some((indexed, entry))
    }

    /// Empties the core, returning the old index and list so the caller
    /// decides where their contents are dropped.
    fn detach_all(&mut self) -> (FxHashMap<K, SlotId>, IntrusiveList<Entry<K, V>>) {
        trace!(dropped = self.order.len(), "cleared store");
        (mem::take(&mut self.index), mem::take(&mut self.order))
    }

    #[inline]
    fn debug_check_sizes(&self) {
        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert!(self.order.len() <= self.capacity);
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let (previous, _evicted) = self.insert_with_evicted(key, value);
        previous
    }

    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let &id = self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        let dropped = self.order.len();
        self.order.clear();
        self.index.clear();
        trace!(dropped, "cleared store");
    }
}

impl<K, V> MutableCache<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.take_entry(key).map(|(_, entry)| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        let popped = self.evict_lru()?;
        trace!(remaining = self.order.len(), "popped least recently used entry");
        Some(popped)
    }

    fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_front(id),
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.order.iter().position(|entry| entry.key == *key)
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.order.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, Arc<V>)> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, Arc<V>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU store.
///
/// Cloning an `LruStore` yields another handle to the same underlying store.
pub struct LruStore<K, V> {
    inner: Arc<Mutex<LruCore<K, V>>>,
    capacity: usize,
}

impl<K, V> Clone for LruStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

impl<K, V> fmt::Debug for LruStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("LruStore")
            .field("len", &core.order.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. A zero-capacity store is a programming
    /// error, never silently clamped.
    ///
    /// ```should_panic
    /// use lru_store::policy::lru::LruStore;
    ///
    /// let _store: LruStore<u32, u32> = LruStore::new(0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(store) => store,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor for capacities taken from configuration.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let core = LruCore::try_new(capacity)?;
        debug!(capacity, "created lru store");
        Ok(Self {
            inner: Arc::new(Mutex::new(core)),
            capacity,
        })
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Setting a new key on a full store evicts the least recently used one.
    pub fn set(&self, key: K, value: V) {
        self.set_arc(key, Arc::new(value));
    }

    /// Like [`set`](Self::set) for a value that is already shared.
    pub fn set_arc(&self, key: K, value: Arc<V>) {
        let mut core = self.inner.lock();
        let displaced = core.insert_with_evicted(key, value);
        drop(core);
        drop(displaced);
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut core = self.inner.lock();
        core.get(key).cloned()
    }

    /// Returns the value for `key` without touching recency order.
    ///
    /// ```
    /// use lru_store::policy::lru::LruStore;
    ///
    /// let store = LruStore::new(2);
    /// store.set(1, "one");
    /// store.set(2, "two");
    ///
    /// assert_eq!(store.peek(&1).as_deref(), Some(&"one"));
    /// store.set(3, "three"); // key 1 was still LRU
    /// assert!(!store.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let core = self.inner.lock();
        core.peek(key).cloned()
    }

    /// Removes `key`; returns whether it was present.
    pub fn delete(&self, key: &K) -> bool {
        let mut core = self.inner.lock();
        let removed = core.take_entry(key);
        drop(core);
        removed.is_some()
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&self) {
        let mut core = self.inner.lock();
        let detached = core.detach_all();
        drop(core);
        drop(detached);
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        let core = self.inner.lock();
        core.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity fixed at construction.
    pub fn cap(&self) -> usize {
        self.capacity
    }

    /// Membership test; does not affect recency.
    pub fn contains(&self, key: &K) -> bool {
        let core = self.inner.lock();
        core.contains(key)
    }

    /// Marks `key` most recently used without reading it.
    pub fn touch(&self, key: &K) -> bool {
        let mut core = self.inner.lock();
        core.touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut core = self.inner.lock();
        let popped = core.pop_lru();
        drop(core);
        popped
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let core = self.inner.lock();
        core.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }

    /// Snapshot of keys, most recently used first.
    pub fn keys_mru(&self) -> Vec<K> {
        let core = self.inner.lock();
        core.keys_mru()
    }

    /// Runs [`LruCore::check_invariants`] under the lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let core = self.inner.lock();
        core.check_invariants()
    }
}
