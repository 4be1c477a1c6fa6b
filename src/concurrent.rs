//! Thread-safe cache decorator.
//!
//! [`ConcurrentCache`] wraps any [`CoreCache`] policy behind one
//! [`parking_lot::RwLock`] and hands out cheap clones sharing the same
//! instance. It adds mutual exclusion and nothing else: the wrapped policy's
//! eviction semantics pass through unchanged.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │              ConcurrentCache<K, V, C> Layout                 │
//! │                                                              │
//! │   thread A ──┐                                               │
//! │   thread B ──┼──► Arc ──► RwLock ──► C: CoreCache<K, V>      │
//! │   thread C ──┘                                               │
//! │                                                              │
//! │   write lock: insert, get, remove, clear                     │
//! │   read lock:  contains, len, is_empty, capacity              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock policy
//!
//! `get` takes the *write* lock. Recency and frequency policies update
//! internal order on every hit, so a hit is a mutation; sharing the lock
//! between concurrent readers would race on that bookkeeping. Operations
//! that genuinely never mutate (`contains`, `len`, `is_empty`, `capacity`)
//! share the read lock.
//!
//! Every operation acquires the lock for exactly the duration of one call
//! on the wrapped policy, so any two concurrent operations observe a total
//! order. The lock is coarse: one policy instance, one lock, no sharding.
//!
//! ## Example Usage
//!
//! ```
//! use std::thread;
//!
//! use evictkit::concurrent::ConcurrentLruCache;
//!
//! let cache = ConcurrentLruCache::with_capacity(128);
//!
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || {
//!             for i in 0..16u32 {
//!                 cache.insert(t * 100 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 64);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ConfigError;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::random::RandomCache;
use crate::policy::weighted::WeightedCache;
use crate::traits::CoreCache;

/// Shared, lock-guarded wrapper around a cache policy.
///
/// Cloning is cheap and every clone addresses the same underlying cache.
/// Raw policies are not thread-safe on their own; this wrapper is the one
/// mutation path once a policy is shared.
pub struct ConcurrentCache<K, V, C>
where
    C: CoreCache<K, V>,
{
    inner: Arc<RwLock<C>>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> ConcurrentCache<K, V, C>
where
    C: CoreCache<K, V>,
{
    /// Wraps `policy`, taking exclusive ownership of it.
    pub fn new(policy: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(policy)),
            _marker: PhantomData,
        }
    }

    /// Inserts a key-value pair under the write lock.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Looks up `key` under the write lock, cloning the value out.
    ///
    /// The write lock (not read) keeps hit bookkeeping such as recency or
    /// frequency updates race-free; see the module docs.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Removes `key` under the write lock.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    /// Returns `true` if `key` is cached. Shared lock.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Current number of entries. Shared lock.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache is empty. Shared lock.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Fixed capacity of the wrapped policy. Shared lock.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Removes all entries under the write lock.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Runs `f` against the wrapped policy under the read lock.
    ///
    /// Gives audits and bulk reads access to policy-specific methods the
    /// decorator does not forward.
    pub fn with_read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` against the wrapped policy under the write lock.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K, V, C> Clone for ConcurrentCache<K, V, C>
where
    C: CoreCache<K, V>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<K, V, C> std::fmt::Debug for ConcurrentCache<K, V, C>
where
    C: CoreCache<K, V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

/// Thread-safe FIFO cache.
pub type ConcurrentFifoCache<K, V> = ConcurrentCache<K, V, FifoCache<K, V>>;

/// Thread-safe LRU cache.
pub type ConcurrentLruCache<K, V> = ConcurrentCache<K, V, LruCache<K, V>>;

/// Thread-safe LFU cache.
pub type ConcurrentLfuCache<K, V> = ConcurrentCache<K, V, LfuCache<K, V>>;

/// Thread-safe random-replacement cache.
pub type ConcurrentRandomCache<K, V> = ConcurrentCache<K, V, RandomCache<K, V>>;

/// Thread-safe weighted cache; values are `(payload, weight)` pairs.
pub type ConcurrentWeightedCache<K, V, W> = ConcurrentCache<K, (V, W), WeightedCache<K, V, W>>;

macro_rules! capacity_ctors {
    ($policy:ident) => {
        /// Builds the wrapped policy with the given capacity.
        ///
        /// # Panics
        ///
        /// Panics if `capacity` is zero; see
        /// [`try_with_capacity`](Self::try_with_capacity).
        pub fn with_capacity(capacity: usize) -> Self {
            Self::new($policy::new(capacity))
        }

        /// Fallible counterpart of [`with_capacity`](Self::with_capacity).
        pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
            Ok(Self::new($policy::try_new(capacity)?))
        }
    };
}

impl<K, V> ConcurrentFifoCache<K, V>
where
    K: Eq + std::hash::Hash + Clone,
{
    capacity_ctors!(FifoCache);
}

impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + std::hash::Hash + Clone,
{
    capacity_ctors!(LruCache);
}

impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + std::hash::Hash + Clone,
{
    capacity_ctors!(LfuCache);
}

impl<K, V> ConcurrentRandomCache<K, V>
where
    K: Eq + std::hash::Hash + Clone,
{
    capacity_ctors!(RandomCache);
}

impl<K, V, W> ConcurrentWeightedCache<K, V, W>
where
    K: Eq + std::hash::Hash + Clone,
    W: Ord + Clone,
{
    capacity_ctors!(WeightedCache);
}
