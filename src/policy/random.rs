//! Random-replacement cache eviction policy.
//!
//! When the cache is full, a uniformly random resident entry is evicted.
//! No per-access bookkeeping is kept, so hits are as cheap as a plain hash
//! lookup and the policy is immune to scan patterns that defeat recency or
//! frequency heuristics.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                    RandomCache<K, V> Layout                    │
//! │                                                                │
//! │  map: FxHashMap<K, (usize, V)>      keys: Vec<K>               │
//! │       key → (dense index, value)                               │
//! │                                      [ k3 | k1 | k9 | k5 ]     │
//! │  victim = keys[rng.gen_range(0..len)]     ▲                    │
//! │  removal swaps the hole with the last ────┘                    │
//! │  element, then pops; one index fixup                           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation  | Time  |
//! |------------|-------|
//! | `insert`   | O(1)  |
//! | `get`      | O(1)  |
//! | `remove`   | O(1)  |
//! | `evict`    | O(1)  |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::random::RandomCache;
//!
//! let mut cache = RandomCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.insert(3, "three"); // evicts key 1 or key 2
//!
//! assert_eq!(cache.len(), 2);
//! assert!(cache.contains(&3));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in
//! [`ConcurrentCache`](crate::concurrent::ConcurrentCache) for shared use.

use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::traits::CoreCache;

/// Random-replacement eviction cache.
///
/// Each instance owns its own [`SmallRng`], seeded from the OS at
/// construction, so separate caches draw independent victim sequences.
pub struct RandomCache<K, V>
where
    K: Eq + Hash + Clone,
{
    map: FxHashMap<K, (usize, V)>,
    /// Dense victim pool; `map` stores each key's index here.
    keys: Vec<K>,
    rng: SmallRng,
    capacity: usize,
}

impl<K, V> RandomCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a random-replacement cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// user-supplied capacities without panicking.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor; rejects `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("RandomCache capacity must be > 0"));
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            keys: Vec::with_capacity(capacity),
            rng: SmallRng::from_entropy(),
            capacity,
        })
    }

    /// Creates a cache whose victim sequence is reproducible from `seed`.
    ///
    /// Intended for tests and simulations; behavior is otherwise identical
    /// to [`new`](Self::new).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        let mut cache = Self::new(capacity);
        cache.rng = SmallRng::seed_from_u64(seed);
        cache
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Inserting a new key at capacity first evicts a uniformly random
    /// resident entry. Updates never trigger eviction.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some((_, existing)) = self.map.get_mut(&key) {
            return Some(std::mem::replace(existing, value));
        }

        if self.map.len() >= self.capacity {
            self.evict_random();
        }

        self.map.insert(key.clone(), (self.keys.len(), value));
        self.keys.push(key);

        debug_assert_eq!(self.map.len(), self.keys.len());
        None
    }

    /// Returns the value for `key`. Never mutates policy state.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (index, value) = self.map.remove(key)?;
        self.remove_at(index);
        debug_assert_eq!(self.map.len(), self.keys.len());
        Some(value)
    }

    /// Returns `true` if `key` is cached.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries. The RNG state is kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.keys.clear();
    }

    /// Evicts a uniformly random entry, returning it.
    pub fn evict_random(&mut self) -> Option<(K, V)> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.keys.len());
        let key = self.keys[index].clone();
        let (_, value) = self.map.remove(&key)?;
        self.remove_at(index);
        Some((key, value))
    }

    /// Closes the hole at `index` by swapping in the last key.
    fn remove_at(&mut self, index: usize) {
        let last = self.keys.len() - 1;
        self.keys.swap(index, last);
        self.keys.pop();
        if index < self.keys.len() {
            if let Some((slot, _)) = self.map.get_mut(&self.keys[index]) {
                *slot = index;
            }
        }
    }

    /// Audits the dense pool against the primary map. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.keys.len() {
            return Err(InvariantError::new(format!(
                "map has {} entries but victim pool has {}",
                self.map.len(),
                self.keys.len()
            )));
        }
        for (index, key) in self.keys.iter().enumerate() {
            match self.map.get(key) {
                Some((slot, _)) if *slot == index => {},
                Some((slot, _)) => {
                    return Err(InvariantError::new(format!(
                        "pool index {index} disagrees with mapped index {slot}"
                    )))
                },
                None => {
                    return Err(InvariantError::new(
                        "victim pool holds a key missing from map",
                    ))
                },
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for RandomCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        RandomCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        RandomCache::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        RandomCache::remove(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        RandomCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        RandomCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        RandomCache::capacity(self)
    }

    fn clear(&mut self) {
        RandomCache::clear(self)
    }
}

impl<K, V> std::fmt::Debug for RandomCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_operations {
        use super::*;

        #[test]
        fn insert_and_get() {
            let mut cache = RandomCache::new(10);
            cache.insert(1, "one");

            assert_eq!(cache.get(&1), Some(&"one"));
            assert_eq!(cache.get(&99), None);
        }

        #[test]
        fn update_returns_previous_value() {
            let mut cache = RandomCache::new(10);
            assert_eq!(cache.insert(1, "a"), None);
            assert_eq!(cache.insert(1, "b"), Some("a"));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&1), Some(&"b"));
        }

        #[test]
        fn update_at_capacity_never_evicts() {
            let mut cache = RandomCache::with_seed(2, 7);
            cache.insert(1, "a");
            cache.insert(2, "b");

            cache.insert(1, "a2");
            assert!(cache.contains(&1));
            assert!(cache.contains(&2));
        }

        #[test]
        fn clear_keeps_capacity() {
            let mut cache = RandomCache::new(5);
            cache.insert(1, "a");
            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 5);
        }
    }

    mod eviction_behavior {
        use super::*;

        #[test]
        fn eviction_keeps_len_at_capacity() {
            let mut cache = RandomCache::with_seed(4, 42);
            for i in 0..100u32 {
                cache.insert(i, i);
                assert!(cache.len() <= 4);
            }
            assert_eq!(cache.len(), 4);
            // The newest insert always survives its own eviction step.
            assert!(cache.contains(&99));
        }

        #[test]
        fn victim_is_always_resident() {
            let mut cache = RandomCache::with_seed(3, 9);
            cache.insert(1, "a");
            cache.insert(2, "b");
            cache.insert(3, "c");

            let (key, _) = cache.evict_random().unwrap();
            assert!((1..=3).contains(&key));
            assert!(!cache.contains(&key));
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn evict_random_on_empty_is_none() {
            let mut cache: RandomCache<u32, u32> = RandomCache::new(3);
            assert_eq!(cache.evict_random(), None);
        }

        #[test]
        fn seeded_instances_replay_the_same_victims() {
            let mut a = RandomCache::with_seed(4, 1234);
            let mut b = RandomCache::with_seed(4, 1234);
            for i in 0..50u32 {
                a.insert(i, i);
                b.insert(i, i);
            }

            let mut left: Vec<u32> = (0..50).filter(|k| a.contains(k)).collect();
            let mut right: Vec<u32> = (0..50).filter(|k| b.contains(k)).collect();
            left.sort_unstable();
            right.sort_unstable();
            assert_eq!(left, right);
        }

        #[test]
        fn every_resident_is_eventually_evictable() {
            // With a uniform victim draw, 200 single-slot-pressure rounds
            // leave each of 4 residents evicted with overwhelming odds.
            let mut cache = RandomCache::with_seed(4, 77);
            for i in 0..4u32 {
                cache.insert(i, i);
            }

            let mut evicted = [false; 4];
            for round in 0..200u32 {
                let filler = 1000 + round;
                cache.insert(filler, filler);
                for (k, seen) in evicted.iter_mut().enumerate() {
                    if !cache.contains(&(k as u32)) {
                        *seen = true;
                    }
                }
                cache.remove(&filler);
                for k in 0..4u32 {
                    if !cache.contains(&k) {
                        cache.insert(k, k);
                    }
                }
            }
            assert!(evicted.iter().all(|seen| *seen));
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            assert!(RandomCache::<u64, u64>::try_new(0).is_err());
        }

        #[test]
        #[should_panic(expected = "capacity")]
        fn new_panics_on_zero_capacity() {
            let _ = RandomCache::<u64, u64>::new(0);
        }

        #[test]
        fn capacity_one_keeps_latest() {
            let mut cache = RandomCache::with_seed(1, 3);
            cache.insert(1, "a");
            cache.insert(2, "b");

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&2), Some(&"b"));
        }

        #[test]
        fn remove_is_idempotent() {
            let mut cache = RandomCache::new(3);
            cache.insert(1, "a");

            assert_eq!(cache.remove(&1), Some("a"));
            assert_eq!(cache.remove(&1), None);
        }

        #[test]
        fn remove_middle_key_fixes_pool_index() {
            let mut cache = RandomCache::with_seed(4, 5);
            cache.insert(1, "a");
            cache.insert(2, "b");
            cache.insert(3, "c");

            cache.remove(&2); // swaps key 3 into the hole
            cache.check_invariants().unwrap();
            assert_eq!(cache.remove(&3), Some("c"));
        }
    }

    mod invariants {
        use super::*;

        #[test]
        fn audit_passes_under_churn() {
            let mut cache = RandomCache::with_seed(8, 2024);
            for i in 0..300u32 {
                cache.insert(i % 20, i);
                if i % 7 == 0 {
                    cache.remove(&(i % 11));
                }
                assert!(cache.len() <= 8);
            }
            cache.check_invariants().unwrap();
        }
    }
}
