//! lru-store: a fixed-capacity, thread-safe LRU key-value store.
//!
//! [`LruStore`](policy::lru::LruStore) is the entry point. It pairs a hash
//! index with an arena-backed recency list and guards both with one mutex.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
