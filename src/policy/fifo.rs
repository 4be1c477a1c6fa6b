//! FIFO cache eviction policy.
//!
//! Evicts strictly in insertion order: the oldest-inserted key goes first,
//! no matter how often it is read. Updating an existing key's value never
//! changes its position in the order.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      FifoCache<K, V> Layout                     │
//! │                                                                 │
//! │  map: FxHashMap<K, (SlotId, V)>   order: LinkedArena<K>         │
//! │       key → (order slot, value)                                 │
//! │                                   front ─► [k1] ◄──► [k2] ◄──►  │
//! │  ┌──────┬────────────┐                     [k3] ◄─ back         │
//! │  │ "k1" │ (s0, v1)   │───┐                                      │
//! │  │ "k2" │ (s1, v2)   │   └──► oldest = front, evicted first     │
//! │  │ "k3" │ (s2, v3)   │        newest = back                     │
//! │  └──────┴────────────┘                                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation  | Time  | Order effect                         |
//! |------------|-------|--------------------------------------|
//! | `insert`   | O(1)  | New key appends; update leaves order |
//! | `get`      | O(1)  | None                                 |
//! | `remove`   | O(1)  | Detaches the entry's order node      |
//! | `contains` | O(1)  | None                                 |
//!
//! The order list lives in a [`LinkedArena`], so `remove` detaches a
//! mid-list node in O(1) and the remaining insertion order stays exact —
//! no holes, no rank scans.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//!
//! let mut cache = FifoCache::new(3);
//! cache.insert(1, "a");
//! cache.insert(2, "b");
//! cache.insert(3, "c");
//!
//! // Reads do not protect a key from FIFO eviction
//! cache.get(&1);
//! cache.insert(4, "d"); // evicts key 1 regardless
//!
//! assert!(!cache.contains(&1));
//! assert!(cache.contains(&4));
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

/// First-in, first-out eviction cache.
pub struct FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// key → (position in `order`, value)
    map: FxHashMap<K, (SlotId, V)>,
    /// Insertion order, oldest at the front.
    order: LinkedArena<K>,
    capacity: usize,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a FIFO cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// user-supplied capacities without panicking.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let cache: FifoCache<u64, String> = FifoCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor; rejects `capacity == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// assert!(FifoCache::<u64, u64>::try_new(0).is_err());
    /// assert!(FifoCache::<u64, u64>::try_new(1).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("FifoCache capacity must be > 0"));
        }
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: LinkedArena::with_capacity(capacity),
            capacity,
        })
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Updating an existing key replaces the value but keeps the key's
    /// position in the insertion order. Inserting a new key at capacity
    /// first evicts the oldest entry.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some((_, existing)) = self.map.get_mut(&key) {
            return Some(std::mem::replace(existing, value));
        }

        if self.map.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.map.remove(&oldest);
            }
        }

        let slot = self.order.push_back(key.clone());
        self.map.insert(key, (slot, value));

        debug_assert_eq!(self.map.len(), self.order.len());
        None
    }

    /// Returns the value for `key` without touching the eviction order.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning its value. Missing keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (slot, value) = self.map.remove(key)?;
        self.order.remove(slot);
        debug_assert_eq!(self.map.len(), self.order.len());
        Some(value)
    }

    /// Returns `true` if `key` is cached. Never counts as an access.
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
        self.order.clear();
    }

    /// Peeks at the oldest entry (the next eviction victim).
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(3);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// assert_eq!(cache.peek_oldest(), Some((&1, &"first")));
    /// assert_eq!(cache.len(), 2); // peek does not remove
    /// ```
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        let key = self.order.front()?;
        let (_, value) = self.map.get(key)?;
        Some((key, value))
    }

    /// Removes and returns the oldest entry.
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let (_, value) = self.map.remove(&key)?;
        Some((key, value))
    }

    /// Audits the order list against the primary map.
    ///
    /// Checks that both structures hold exactly the same keys, each exactly
    /// once, and that every map entry points at its own order node. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "map has {} entries but order list has {}",
                self.map.len(),
                self.order.len()
            )));
        }
        for key in self.order.iter() {
            let (slot, _) = self
                .map
                .get(key)
                .ok_or_else(|| InvariantError::new("order list holds a key missing from map"))?;
            if self.order.get(*slot) != Some(key) {
                return Err(InvariantError::new("map slot does not resolve to its key"));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        FifoCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        FifoCache::get(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        FifoCache::remove(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        FifoCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        FifoCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        FifoCache::capacity(self)
    }

    fn clear(&mut self) {
        FifoCache::clear(self)
    }
}

impl<K, V> std::fmt::Debug for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
