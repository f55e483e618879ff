use std::thread;

use lru_store::policy::lru::LruStore;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=lru_store=trace shows construction and eviction events
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store: LruStore<u32, String> = LruStore::new(2);

    store.set(1, "alpha".to_string());
    store.set(2, "beta".to_string());

    if let Some(value) = store.get(&1) {
        println!("hit 1: {}", value.as_str());
    }

    store.set(3, "gamma".to_string());
    println!("contains 2? {}", store.contains(&2));

    let writers: Vec<_> = (10..14u32)
        .map(|key| {
            let store = store.clone();
            thread::spawn(move || store.set(key, format!("from thread {key}")))
        })
        .collect();
    for writer in writers {
        writer.join().expect("writer thread panicked");
    }

    println!("len {} / cap {}", store.len(), store.cap());
}

// Expected output:
// hit 1: alpha
// contains 2? false
// len 2 / cap 2
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2. The four threaded writes each evict one
// entry, so the store stays at its capacity of 2.
