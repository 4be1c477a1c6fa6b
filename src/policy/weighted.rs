//! Weighted cache eviction policy.
//!
//! Every entry carries a caller-assigned weight; eviction always removes the
//! entry holding the globally minimum weight. Weights are unique across live
//! entries, so the victim is always a single entry and no tie-break exists.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                 WeightedCache<K, V, W> Layout                  │
//! │                                                                │
//! │  map: FxHashMap<K, (V, W)>      by_weight: BTreeMap<W, K>      │
//! │       key → (payload, weight)                                  │
//! │                                  10 → k1   ← min, next victim  │
//! │  by_weight doubles as the        25 → k4                       │
//! │  uniqueness index and the        40 → k2                       │
//! │  ordered eviction queue                                        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert resolution
//!
//! `insert(key, value, weight)` resolves in priority order:
//!
//! 1. A *different* live key already holds `weight`: that key's payload is
//!    replaced with `value` and the incoming key is discarded. No new entry,
//!    no eviction; uniqueness holds.
//! 2. `key` is live under another weight: its old weight leaves the index
//!    and the entry is re-recorded under `weight`.
//! 3. Brand-new key and weight: evict the minimum-weight entry if full, then
//!    insert.
//!
//! | Operation  | Time      |
//! |------------|-----------|
//! | `insert`   | O(log n)  |
//! | `get`      | O(1)      |
//! | `remove`   | O(log n)  |
//! | `evict`    | O(log n)  |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::weighted::WeightedCache;
//!
//! let mut cache = WeightedCache::new(2);
//! cache.insert("a", 1, 10u32);
//! cache.insert("b", 2, 20);
//! cache.insert("c", 3, 5); // evicts "a", the minimum weight
//!
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.min_weight(), Some(&5));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in
//! [`ConcurrentCache`](crate::concurrent::ConcurrentCache) for shared use.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::traits::CoreCache;

/// Minimum-weight eviction cache with globally unique weights.
pub struct WeightedCache<K, V, W>
where
    K: Eq + Hash + Clone,
    W: Ord + Clone,
{
    map: FxHashMap<K, (V, W)>,
    /// Ordered weight index; also enforces weight uniqueness.
    by_weight: BTreeMap<W, K>,
    capacity: usize,
}

impl<K, V, W> WeightedCache<K, V, W>
where
    K: Eq + Hash + Clone,
    W: Ord + Clone,
{
    /// Creates a weighted cache with the given capacity.
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
            return Err(ConfigError::new("WeightedCache capacity must be > 0"));
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            by_weight: BTreeMap::new(),
            capacity,
        })
    }

    /// Inserts `(value, weight)` under `key`, resolving weight collisions
    /// per the module docs.
    ///
    /// Returns the `(value, weight)` previously held by `key` when `key`
    /// itself is updated. Returns `None` for fresh inserts and for the
    /// collision case, where a different key absorbs the value and the
    /// incoming key never enters the cache.
    pub fn insert(&mut self, key: K, value: V, weight: W) -> Option<(V, W)> {
        if let Some(owner) = self.by_weight.get(&weight) {
            if *owner != key {
                // Uniqueness: the weight's current owner absorbs the value.
                let owner = owner.clone();
                if let Some((payload, _)) = self.map.get_mut(&owner) {
                    *payload = value;
                }
                return None;
            }
            // Same key, same weight: plain value update.
            let previous = self.map.insert(key, (value, weight));
            debug_assert!(previous.is_some());
            return previous;
        }

        if let Some((_, old_weight)) = self.map.get(&key) {
            // Re-weight: the old index entry leaves before the new one lands.
            let old_weight = old_weight.clone();
            self.by_weight.remove(&old_weight);
            self.by_weight.insert(weight.clone(), key.clone());
            return self.map.insert(key, (value, weight));
        }

        if self.map.len() >= self.capacity {
            self.pop_min();
        }

        self.by_weight.insert(weight.clone(), key.clone());
        self.map.insert(key, (value, weight));

        debug_assert_eq!(self.map.len(), self.by_weight.len());
        None
    }

    /// Returns the `(value, weight)` pair for `key`. Never mutates state.
    pub fn get(&self, key: &K) -> Option<&(V, W)> {
        self.map.get(key)
    }

    /// Returns the weight `key` is stored under.
    pub fn weight_of(&self, key: &K) -> Option<&W> {
        self.map.get(key).map(|(_, weight)| weight)
    }

    /// Removes `key`, returning its `(value, weight)` pair.
    pub fn remove(&mut self, key: &K) -> Option<(V, W)> {
        let (value, weight) = self.map.remove(key)?;
        self.by_weight.remove(&weight);
        debug_assert_eq!(self.map.len(), self.by_weight.len());
        Some((value, weight))
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

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.map.clear();
        self.by_weight.clear();
    }

    /// Returns the minimum live weight (the next eviction victim's).
    pub fn min_weight(&self) -> Option<&W> {
        self.by_weight.keys().next()
    }

    /// Peeks at the minimum-weight entry.
    pub fn peek_min(&self) -> Option<(&K, &V, &W)> {
        let (_, key) = self.by_weight.iter().next()?;
        let (value, weight) = self.map.get(key)?;
        Some((key, value, weight))
    }

    /// Removes and returns the minimum-weight entry.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::weighted::WeightedCache;
    ///
    /// let mut cache = WeightedCache::new(3);
    /// cache.insert("a", 1, 30u32);
    /// cache.insert("b", 2, 10);
    ///
    /// assert_eq!(cache.pop_min(), Some(("b", 2, 10)));
    /// assert_eq!(cache.min_weight(), Some(&30));
    /// ```
    pub fn pop_min(&mut self) -> Option<(K, V, W)> {
        let (_, key) = self.by_weight.pop_first()?;
        let (value, weight) = self.map.remove(&key)?;
        Some((key, value, weight))
    }

    /// Audits the weight index against the primary map. O(n log n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.by_weight.len() {
            return Err(InvariantError::new(format!(
                "map has {} entries but weight index has {}",
                self.map.len(),
                self.by_weight.len()
            )));
        }
        for (weight, key) in &self.by_weight {
            match self.map.get(key) {
                Some((_, mapped)) if mapped == weight => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "weight index disagrees with the weight stored in map",
                    ))
                },
                None => {
                    return Err(InvariantError::new(
                        "weight index holds a key missing from map",
                    ))
                },
            }
        }
        Ok(())
    }
}

/// [`CoreCache`] over `(payload, weight)` values.
///
/// `insert` forwards to [`WeightedCache::insert`] with the pair split apart,
/// so the collision resolution in the module docs applies unchanged.
impl<K, V, W> CoreCache<K, (V, W)> for WeightedCache<K, V, W>
where
    K: Eq + Hash + Clone,
    W: Ord + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: (V, W)) -> Option<(V, W)> {
        WeightedCache::insert(self, key, value.0, value.1)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&(V, W)> {
        WeightedCache::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<(V, W)> {
        WeightedCache::remove(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        WeightedCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        WeightedCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        WeightedCache::capacity(self)
    }

    fn clear(&mut self) {
        WeightedCache::clear(self)
    }
}

impl<K, V, W> std::fmt::Debug for WeightedCache<K, V, W>
where
    K: Eq + Hash + Clone,
    W: Ord + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
