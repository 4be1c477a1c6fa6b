//! # Cache Capability Contract
//!
//! This module defines the single trait every eviction policy implements,
//! so callers can swap policies without touching call sites.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │            CoreCache<K, V>              │
//!                  │                                         │
//!                  │  insert(&mut, K, V) → Option<V>         │
//!                  │  get(&mut, &K) → Option<&V>             │
//!                  │  remove(&mut, &K) → Option<V>           │
//!                  │  contains(&, &K) → bool                 │
//!                  │  len(&) → usize                         │
//!                  │  is_empty(&) → bool                     │
//!                  │  capacity(&) → usize                    │
//!                  │  clear(&mut)                            │
//!                  └──────────────────┬──────────────────────┘
//!                                     │ implemented by
//!        ┌──────────┬──────────┬──────┴───┬─────────────┬──────────────┐
//!        ▼          ▼          ▼          ▼             ▼              ▼
//!   FifoCache   LruCache   LfuCache  RandomCache  WeightedCache  PolicyCache
//! ```
//!
//! ## Contract Notes
//!
//! | Operation  | Side effects on eviction order                           |
//! |------------|----------------------------------------------------------|
//! | `insert`   | Policy-specific; may evict one entry when at capacity    |
//! | `get`      | Policy-specific (LRU moves to MRU, LFU bumps frequency)  |
//! | `remove`   | Removes only the target entry; idempotent on misses      |
//! | `contains` | None — never counts as an access                         |
//! | `len`      | None                                                     |
//! | `clear`    | Resets to the empty state; capacity is unchanged         |
//!
//! Absent keys are reported as `None` everywhere. No operation signals a
//! lookup miss with a panic; panics are reserved for programmer errors such
//! as constructing a cache with zero capacity via the infallible `new`.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::traits::CoreCache;
//! use evictkit::policy::lru::LruCache;
//!
//! // Function accepting any cache policy
//! fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.clone());
//!     }
//! }
//!
//! let mut cache = LruCache::new(100);
//! warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! - Policy implementations are **NOT thread-safe**; operations take `&mut self`.
//! - Wrap any policy in [`ConcurrentCache`](crate::concurrent::ConcurrentCache)
//!   for shared access; the wrapper owns the instance and never leaks it.

/// Core cache operations shared by every eviction policy.
///
/// Implementations maintain `len() <= capacity()` after every operation by
/// evicting one entry (chosen by the policy) when a new key arrives at
/// capacity.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// Inserting a new key at capacity first evicts one entry according to
    /// the policy; updating an existing key never evicts.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update internal state (recency, frequency) depending on the
    /// policy. Use [`contains`](Self::contains) to probe existence without
    /// affecting eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes an entry by key, returning its value if it existed.
    ///
    /// Removing a missing key is a no-op that returns `None`; it never
    /// corrupts the policy's internal indices.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.remove(&1), Some("value"));
    /// assert_eq!(cache.remove(&1), None); // idempotent
    /// ```
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Checks whether a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed capacity chosen at construction.
    fn capacity(&self) -> usize;

    /// Removes all entries, keeping the capacity.
    fn clear(&mut self);
}
