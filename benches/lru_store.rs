use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lru_store::policy::lru::{LruCore, LruStore};
use lru_store::traits::{CoreCache, LruCacheTrait};

fn filled_core(capacity: u64) -> LruCore<u64, u64> {
    let mut core = LruCore::new(capacity as usize);
    for i in 0..capacity {
        core.insert(i, Arc::new(i));
    }
    core
}

fn filled_store(capacity: u64) -> LruStore<u64, u64> {
    let store = LruStore::new(capacity as usize);
    for i in 0..capacity {
        store.set(i, i);
    }
    store
}

fn bench_core_insert_get(c: &mut Criterion) {
    c.bench_function("core_insert_get", |b| {
        b.iter_batched(
            || filled_core(1024),
            |mut core| {
                for i in 0..1024u64 {
                    core.insert(black_box(i + 10_000), Arc::new(i));
                    let _ = black_box(core.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_core_eviction_churn(c: &mut Criterion) {
    c.bench_function("core_eviction_churn", |b| {
        b.iter_batched(
            || filled_core(1024),
            |mut core| {
                for i in 0..4096u64 {
                    core.insert(black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_core_touch_hotset(c: &mut Criterion) {
    c.bench_function("core_touch_hotset", |b| {
        b.iter_batched(
            || filled_core(4096),
            |mut core| {
                for i in 0..4096u64 {
                    let _ = black_box(core.touch(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_store_get_hit(c: &mut Criterion) {
    let store = filled_store(4096);
    c.bench_function("store_get_hit", |b| {
        b.iter(|| {
            for i in 0..4096u64 {
                let _ = black_box(store.get(&black_box(i)));
            }
        })
    });
}

fn bench_store_peek_hit(c: &mut Criterion) {
    let store = filled_store(4096);
    c.bench_function("store_peek_hit", |b| {
        b.iter(|| {
            for i in 0..4096u64 {
                let _ = black_box(store.peek(&black_box(i)));
            }
        })
    });
}

fn bench_store_contended_set_get(c: &mut Criterion) {
    c.bench_function("store_contended_set_get_4t", |b| {
        b.iter_batched(
            || filled_store(1024),
            |store| {
                thread::scope(|s| {
                    for t in 0..4u64 {
                        let store = &store;
                        s.spawn(move || {
                            for i in 0..1024u64 {
                                store.set(t * 100_000 + i, i);
                                let _ = black_box(store.get(&(i % 1024)));
                            }
                        });
                    }
                });
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_core_insert_get,
    bench_core_eviction_churn,
    bench_core_touch_hotset,
    bench_store_get_hit,
    bench_store_peek_hit,
    bench_store_contended_set_get
);
criterion_main!(benches);
