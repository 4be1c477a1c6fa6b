//! LRU cache eviction policy.
//!
//! Evicts the entry that has gone longest without being read or written.
//! Every hit (`get`) and every update (`insert` on an existing key) marks the
//! entry most-recently-used.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       LruCache<K, V> Layout                     │
//! │                                                                 │
//! │  map: FxHashMap<K, SlotId>     entries: LinkedArena<(K, V)>     │
//! │       key → order slot                                          │
//! │                                front ─► [LRU] ◄──► ... ◄──►     │
//! │  ┌──────┬──────┐                        [MRU] ◄─ back           │
//! │  │ "k1" │  s0  │──┐                                             │
//! │  │ "k2" │  s1  │  └──► get/insert move the node to the back;    │
//! │  └──────┴──────┘       eviction pops the front                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The recency list is a [`LinkedArena`]: the map stores stable slot ids
//! rather than pointers, so `move_to_back` and mid-list removal are O(1)
//! safe code with no reference-stability hazards.
//!
//! | Operation  | Time  | Order effect                |
//! |------------|-------|-----------------------------|
//! | `insert`   | O(1)  | Entry becomes MRU           |
//! | `get`      | O(1)  | Hit becomes MRU             |
//! | `remove`   | O(1)  | Others keep relative order  |
//! | `contains` | O(1)  | None                        |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//!
//! cache.get(&1);        // key 1 becomes MRU
//! cache.insert(3, "three"); // evicts key 2, the LRU
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&3));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in
//! [`ConcurrentCache`](crate::concurrent::ConcurrentCache) for shared use.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{LinkedArena, SlotId};
use crate::error::{ConfigError, InvariantError};
use crate::traits::CoreCache;

/// Least-recently-used eviction cache.
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    map: FxHashMap<K, SlotId>,
    /// Recency order: LRU at the front, MRU at the back.
    entries: LinkedArena<(K, V)>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with the given capacity.
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
            return Err(ConfigError::new("LruCache capacity must be > 0"));
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: LinkedArena::with_capacity(capacity),
            capacity,
        })
    }

    /// Inserts or updates a key-value pair; the entry becomes MRU either way.
    ///
    /// Inserting a new key at capacity first evicts the LRU entry.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.map.get(&key) {
            self.entries.move_to_back(slot);
            let (_, existing) = self.entries.get_mut(slot)?;
            return Some(std::mem::replace(existing, value));
        }

        if self.map.len() >= self.capacity {
            if let Some((lru_key, _)) = self.entries.pop_front() {
                self.map.remove(&lru_key);
            }
        }

        let slot = self.entries.push_back((key.clone(), value));
        self.map.insert(key, slot);

        debug_assert_eq!(self.map.len(), self.entries.len());
        None
    }

    /// Returns the value for `key`, marking the entry most-recently-used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let &slot = self.map.get(key)?;
        self.entries.move_to_back(slot);
        self.entries.get(slot).map(|(_, value)| value)
    }

    /// Returns the value for `key` without refreshing its recency.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    ///
    /// cache.peek(&1); // does not protect key 1
    /// cache.insert(3, "three");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &slot = self.map.get(key)?;
        self.entries.get(slot).map(|(_, value)| value)
    }

    /// Removes `key`, returning its value; other entries keep their order.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.map.remove(key)?;
        let (_, value) = self.entries.remove(slot)?;
        debug_assert_eq!(self.map.len(), self.entries.len());
        Some(value)
    }

    /// Returns `true` if `key` is cached, without touching recency.
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
        self.entries.clear();
    }

    /// Marks `key` most-recently-used without reading its value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(&slot) => self.entries.move_to_back(slot),
            None => false,
        }
    }

    /// Peeks at the LRU entry (the next eviction victim).
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entries.front().map(|(key, value)| (key, value))
    }

    /// Removes and returns the LRU entry.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// cache.get(&1); // key 2 is now LRU
    ///
    /// assert_eq!(cache.pop_lru(), Some((2, "two")));
    /// ```
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.entries.pop_front()?;
        self.map.remove(&key);
        Some((key, value))
    }

    /// Audits the recency list against the primary map. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "map has {} entries but recency list has {}",
                self.map.len(),
                self.entries.len()
            )));
        }
        for (key, _) in self.entries.iter() {
            let slot = self
                .map
                .get(key)
                .ok_or_else(|| InvariantError::new("recency list holds a key missing from map"))?;
            match self.entries.get(*slot) {
                Some((slot_key, _)) if slot_key == key => {},
                _ => return Err(InvariantError::new("map slot does not resolve to its key")),
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> std::fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
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
            let mut cache = LruCache::new(10);
            cache.insert(1, "one");

            assert_eq!(cache.get(&1), Some(&"one"));
            assert_eq!(cache.get(&99), None);
        }

        #[test]
        fn update_returns_previous_value() {
            let mut cache = LruCache::new(10);
            assert_eq!(cache.insert(1, "a"), None);
            assert_eq!(cache.insert(1, "b"), Some("a"));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn clear_keeps_capacity() {
            let mut cache = LruCache::new(5);
            cache.insert(1, "a");
            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 5);
        }
    }

    mod recency_order {
        use super::*;

        #[test]
        fn get_protects_from_eviction() {
            let mut cache = LruCache::new(2);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.get(&1);
            cache.insert(3, 3); // evicts key 2

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn update_refreshes_recency() {
            let mut cache = LruCache::new(2);
            cache.insert(1, "a");
            cache.insert(2, "b");

            cache.insert(1, "a2"); // key 1 becomes MRU
            cache.insert(3, "c"); // evicts key 2

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn peek_does_not_refresh_recency() {
            let mut cache = LruCache::new(2);
            cache.insert(1, "a");
            cache.insert(2, "b");

            cache.peek(&1);
            cache.insert(3, "c"); // key 1 was still LRU

            assert!(!cache.contains(&1));
        }

        #[test]
        fn touch_refreshes_without_reading() {
            let mut cache = LruCache::new(2);
            cache.insert(1, "a");
            cache.insert(2, "b");

            assert!(cache.touch(&1));
            assert!(!cache.touch(&99));

            cache.insert(3, "c"); // evicts key 2
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn eviction_walks_lru_order() {
            let mut cache = LruCache::new(3);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.insert(3, 3);

            cache.get(&1);
            cache.get(&2);

            // Eviction order is now 3, 1, 2.
            cache.insert(4, 4);
            assert!(!cache.contains(&3));
            cache.insert(5, 5);
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
        }

        #[test]
        fn remove_keeps_relative_order_of_rest() {
            let mut cache = LruCache::new(3);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.insert(3, 3);

            cache.remove(&2);
            cache.insert(4, 4); // below capacity, no eviction
            cache.insert(5, 5); // evicts key 1, still the LRU

            assert!(!cache.contains(&1));
            assert!(cache.contains(&3));
        }

        #[test]
        fn peek_and_pop_lru() {
            let mut cache = LruCache::new(3);
            cache.insert(1, "a");
            cache.insert(2, "b");
            cache.get(&1);

            assert_eq!(cache.peek_lru(), Some((&2, &"b")));
            assert_eq!(cache.pop_lru(), Some((2, "b")));
            assert_eq!(cache.pop_lru(), Some((1, "a")));
            assert_eq!(cache.pop_lru(), None);
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            assert!(LruCache::<u64, u64>::try_new(0).is_err());
        }

        #[test]
        #[should_panic(expected = "capacity")]
        fn new_panics_on_zero_capacity() {
            let _ = LruCache::<u64, u64>::new(0);
        }

        #[test]
        fn capacity_one_keeps_latest() {
            let mut cache = LruCache::new(1);
            cache.insert(1, "a");
            cache.insert(2, "b");

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&2), Some(&"b"));
        }

        #[test]
        fn remove_is_idempotent() {
            let mut cache = LruCache::new(3);
            cache.insert(1, "a");

            assert_eq!(cache.remove(&1), Some("a"));
            assert_eq!(cache.remove(&1), None);
            assert_eq!(cache.len(), 0);
        }

        #[test]
        fn miss_has_no_side_effect() {
            let mut cache = LruCache::new(2);
            cache.insert(1, "a");
            cache.insert(2, "b");

            assert_eq!(cache.get(&99), None);
            cache.insert(3, "c"); // key 1 is still LRU
            assert!(!cache.contains(&1));
        }
    }

    mod invariants {
        use super::*;

        #[test]
        fn audit_passes_under_churn() {
            let mut cache = LruCache::new(8);
            for i in 0..100u32 {
                cache.insert(i % 12, i);
                if i % 3 == 0 {
                    cache.get(&(i % 5));
                }
                if i % 11 == 0 {
                    cache.remove(&(i % 7));
                }
                assert!(cache.len() <= 8);
            }
            cache.check_invariants().unwrap();
        }
    }
}
