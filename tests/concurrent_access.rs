//! Concurrency tests for the locked decorator.
//!
//! Threads hammer one shared decorator and the tests assert that nothing is
//! lost and nothing is corrupted: disjoint writers land every key, mixed
//! readers and writers leave the wrapped policy's internal indices
//! consistent, and the post-run audit does a full scan of those indices.

use std::thread;

use evictkit::concurrent::{
    ConcurrentFifoCache, ConcurrentLfuCache, ConcurrentLruCache, ConcurrentRandomCache,
    ConcurrentWeightedCache,
};

const THREADS: u32 = 8;
const KEYS_PER_THREAD: u32 = 250;

/// Spawns `THREADS` writers over disjoint key ranges and joins them.
fn run_disjoint_writers(run: impl Fn(u32) + Send + Sync + 'static + Clone) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let run = run.clone();
            thread::spawn(move || {
                for i in 0..KEYS_PER_THREAD {
                    run(t * KEYS_PER_THREAD + i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn fifo_disjoint_writers_lose_no_updates() {
    let cache = ConcurrentFifoCache::with_capacity((THREADS * KEYS_PER_THREAD) as usize);

    let writer = cache.clone();
    run_disjoint_writers(move |key| {
        writer.insert(key, key * 2);
    });

    assert_eq!(cache.len(), (THREADS * KEYS_PER_THREAD) as usize);
    for key in 0..THREADS * KEYS_PER_THREAD {
        assert_eq!(cache.get(&key), Some(key * 2), "lost update for key {key}");
    }
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}

#[test]
fn lru_disjoint_writers_lose_no_updates() {
    let cache = ConcurrentLruCache::with_capacity((THREADS * KEYS_PER_THREAD) as usize);

    let writer = cache.clone();
    run_disjoint_writers(move |key| {
        writer.insert(key, key);
    });

    assert_eq!(cache.len(), (THREADS * KEYS_PER_THREAD) as usize);
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}

#[test]
fn lfu_disjoint_writers_lose_no_updates() {
    let cache = ConcurrentLfuCache::with_capacity((THREADS * KEYS_PER_THREAD) as usize);

    let writer = cache.clone();
    run_disjoint_writers(move |key| {
        writer.insert(key, key);
    });

    assert_eq!(cache.len(), (THREADS * KEYS_PER_THREAD) as usize);
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}

#[test]
fn random_disjoint_writers_lose_no_updates() {
    let cache = ConcurrentRandomCache::with_capacity((THREADS * KEYS_PER_THREAD) as usize);

    let writer = cache.clone();
    run_disjoint_writers(move |key| {
        writer.insert(key, key);
    });

    assert_eq!(cache.len(), (THREADS * KEYS_PER_THREAD) as usize);
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}

#[test]
fn weighted_disjoint_writers_lose_no_updates() {
    let cache = ConcurrentWeightedCache::with_capacity((THREADS * KEYS_PER_THREAD) as usize);

    // Weights mirror the keys, so the disjoint ranges never collide.
    let writer = cache.clone();
    run_disjoint_writers(move |key| {
        writer.insert(key, (key, key));
    });

    assert_eq!(cache.len(), (THREADS * KEYS_PER_THREAD) as usize);
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}

#[test]
fn mixed_readers_and_writers_under_eviction_pressure() {
    // Capacity far below the write volume keeps eviction running the whole
    // time while readers race the writers.
    let cache = ConcurrentLruCache::with_capacity(64);

    let mut handles = Vec::new();
    for t in 0..4u32 {
        let cache = cache.clone();
        handles.push(thread::spawn(move || {
            for i in 0..2_000u32 {
                cache.insert(t * 10_000 + i, i);
                if i % 5 == 0 {
                    cache.remove(&(t * 10_000 + i / 2));
                }
            }
        }));
    }
    for t in 0..4u32 {
        let cache = cache.clone();
        handles.push(thread::spawn(move || {
            for i in 0..2_000u32 {
                cache.get(&(t * 10_000 + i));
                cache.contains(&i);
                assert!(cache.len() <= 64);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 64);
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}

#[test]
fn lfu_hit_counting_survives_contention() {
    let cache = ConcurrentLfuCache::with_capacity(32);
    for i in 0..32u32 {
        cache.insert(i, i);
    }

    let handles: Vec<_> = (0..4u32)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..1_024u32 {
                    cache.get(&(i % 32));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // 4 threads x 1024 hits spread evenly, plus the insert's initial count.
    for i in 0..32u32 {
        let freq = cache.with_read(|inner| inner.frequency(&i));
        assert_eq!(freq, Some(1 + 4 * 1_024 / 32), "key {i} lost hits");
    }
    cache.with_read(|inner| inner.check_invariants()).unwrap();
}
