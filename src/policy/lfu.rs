//! LFU cache eviction policy.
//!
//! Evicts the entry with the fewest recorded accesses. Every `get` hit and
//! every `insert` on an existing key counts as one access; ties inside a
//! frequency class fall to the key that reached that frequency first.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      LfuCache<K, V> Layout                     │
//! │                                                                │
//! │  map: FxHashMap<K, V>          freq: FrequencyBuckets<K>       │
//! │       key → value                                              │
//! │                                 freq=1: [k4] ◄──► [k7]  ← min  │
//! │  values live here;              freq=2: [k1]                   │
//! │  all ordering state             freq=5: [k2] ◄──► [k3]         │
//! │  lives in the buckets           evict = head of min bucket     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation  | Time  | Frequency effect          |
//! |------------|-------|---------------------------|
//! | `insert`   | O(1)  | New key starts at 1;      |
//! |            |       | existing key counts a hit |
//! | `get`      | O(1)  | Hit counts                |
//! | `remove`   | O(1)  | Counter discarded         |
//! | `contains` | O(1)  | None                      |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//!
//! cache.get(&1);
//! cache.get(&1);        // key 1 at frequency 3, key 2 at 1
//! cache.insert(3, "three"); // evicts key 2
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in
//! [`ConcurrentCache`](crate::concurrent::ConcurrentCache) for shared use.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError};
use crate::traits::CoreCache;

/// Least-frequently-used eviction cache.
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    map: FxHashMap<K, V>,
    freq: FrequencyBuckets<K>,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache with the given capacity.
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
            return Err(ConfigError::new("LfuCache capacity must be > 0"));
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            freq: FrequencyBuckets::with_capacity(capacity),
            capacity,
        })
    }

    /// Inserts or updates a key-value pair.
    ///
    /// A new key starts at frequency 1, evicting the least-frequent entry if
    /// the cache is full. Updating an existing key replaces the value and
    /// counts as one access on it.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(existing) = self.map.get_mut(&key) {
            let previous = std::mem::replace(existing, value);
            self.freq.touch(&key);
            return Some(previous);
        }

        if self.map.len() >= self.capacity {
            if let Some((victim, _)) = self.freq.pop_min() {
                self.map.remove(&victim);
            }
        }

        self.freq.insert(key.clone());
        self.map.insert(key, value);

        debug_assert_eq!(self.map.len(), self.freq.len());
        None
    }

    /// Returns the value for `key`, counting the access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.map.get(key)?;
        self.freq.touch(key);
        Some(value)
    }

    /// Returns the value for `key` without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Removes `key`, returning its value and discarding its counter.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.map.remove(key)?;
        self.freq.remove(key);
        debug_assert_eq!(self.map.len(), self.freq.len());
        Some(value)
    }

    /// Returns `true` if `key` is cached, without counting an access.
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

    /// Removes all entries and counters.
    pub fn clear(&mut self) {
        self.map.clear();
        self.freq.clear();
    }

    /// Returns the access count recorded for `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.insert("a", 1);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.frequency(&"a"), Some(2));
    /// assert_eq!(cache.frequency(&"ghost"), None);
    /// ```
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.frequency(key)
    }

    /// Peeks at the next eviction victim and its frequency.
    pub fn peek_lfu(&self) -> Option<(&K, &V, u64)> {
        let (key, freq) = self.freq.peek_min()?;
        let value = self.map.get(key)?;
        Some((key, value, freq))
    }

    /// Removes and returns the least-frequent entry.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        let (key, _) = self.freq.pop_min()?;
        let value = self.map.remove(&key)?;
        Some((key, value))
    }

    /// Audits the frequency index against the primary map. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.freq.len() {
            return Err(InvariantError::new(format!(
                "map has {} entries but frequency index has {}",
                self.map.len(),
                self.freq.len()
            )));
        }
        let min = self.freq.min_freq().unwrap_or(0);
        for (key, freq) in self.freq.iter() {
            if !self.map.contains_key(key) {
                return Err(InvariantError::new(
                    "frequency index holds a key missing from map",
                ));
            }
            if freq < min {
                return Err(InvariantError::new(format!(
                    "tracked frequency {freq} is below the reported minimum {min}"
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }
}

impl<K, V> std::fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
