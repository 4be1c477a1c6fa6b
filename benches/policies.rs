//! Policy comparison benchmarks.
//!
//! One seeded workload per group so runs are comparable across policies:
//! an insert-heavy churn pass that keeps eviction hot, and a read pass over
//! a warm cache.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use evictkit::prelude::*;

const CAPACITY: usize = 1_024;
const KEY_SPACE: u64 = 4_096;
const OPS: usize = 10_000;

fn workload(seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..OPS).map(|_| rng.gen_range(0..KEY_SPACE)).collect()
}

fn bench_insert_churn(c: &mut Criterion) {
    let keys = workload(0xE51C);
    let mut group = c.benchmark_group("insert_churn");

    group.bench_function("fifo", |b| {
        b.iter(|| {
            let mut cache = FifoCache::new(CAPACITY);
            for &key in &keys {
                cache.insert(black_box(key), key);
            }
            cache.len()
        })
    });
    group.bench_function("lru", |b| {
        b.iter(|| {
            let mut cache = LruCache::new(CAPACITY);
            for &key in &keys {
                cache.insert(black_box(key), key);
            }
            cache.len()
        })
    });
    group.bench_function("lfu", |b| {
        b.iter(|| {
            let mut cache = LfuCache::new(CAPACITY);
            for &key in &keys {
                cache.insert(black_box(key), key);
            }
            cache.len()
        })
    });
    group.bench_function("random", |b| {
        b.iter(|| {
            let mut cache = RandomCache::with_seed(CAPACITY, 7);
            for &key in &keys {
                cache.insert(black_box(key), key);
            }
            cache.len()
        })
    });
    group.bench_function("weighted", |b| {
        b.iter(|| {
            let mut cache = WeightedCache::new(CAPACITY);
            for (i, &key) in keys.iter().enumerate() {
                cache.insert(black_box(key), key, i as u64);
            }
            cache.len()
        })
    });

    group.finish();
}

fn bench_warm_reads(c: &mut Criterion) {
    let keys = workload(0xBEEF);
    let mut group = c.benchmark_group("warm_reads");

    group.bench_function("fifo", |b| {
        let mut cache = FifoCache::new(CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            let mut hits = 0u32;
            for &key in &keys {
                if cache.get(black_box(&key)).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
    group.bench_function("lru", |b| {
        let mut cache = LruCache::new(CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            let mut hits = 0u32;
            for &key in &keys {
                if cache.get(black_box(&key)).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
    group.bench_function("lfu", |b| {
        let mut cache = LfuCache::new(CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            let mut hits = 0u32;
            for &key in &keys {
                if cache.get(black_box(&key)).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
    group.bench_function("random", |b| {
        let mut cache = RandomCache::with_seed(CAPACITY, 7);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            let mut hits = 0u32;
            for &key in &keys {
                if cache.get(black_box(&key)).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });

    group.finish();
}

fn bench_locked_decorator(c: &mut Criterion) {
    let keys = workload(0xCAFE);
    let mut group = c.benchmark_group("locked_decorator");

    group.bench_function("lru_uncontended", |b| {
        let cache = ConcurrentLruCache::with_capacity(CAPACITY);
        for i in 0..CAPACITY as u64 {
            cache.insert(i, i);
        }
        b.iter(|| {
            let mut hits = 0u32;
            for &key in &keys {
                if cache.get(black_box(&key)).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_churn,
    bench_warm_reads,
    bench_locked_decorator
);
criterion_main!(benches);
