//! Runtime policy selection.
//!
//! [`CacheBuilder`] constructs a cache whose eviction policy is chosen at
//! runtime, for callers that read the policy from configuration rather than
//! naming a concrete type. The result is a [`PolicyCache`] enum that
//! dispatches the [`CoreCache`] contract to the selected policy.
//!
//! [`WeightedCache`](crate::policy::weighted::WeightedCache) is not
//! selectable here: its values are `(payload, weight)` pairs, a different
//! shape from the other four policies, so it keeps its concrete type.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(128)
//!     .policy(CachePolicy::Lru)
//!     .build();
//!
//! cache.insert("a", 1);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::random::RandomCache;
use crate::traits::CoreCache;

/// Eviction policies selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Evict in insertion order.
    Fifo,
    /// Evict the least-recently-used entry.
    #[default]
    Lru,
    /// Evict the least-frequently-used entry.
    Lfu,
    /// Evict a uniformly random entry.
    Random,
}

/// Builder for a [`PolicyCache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
    policy: CachePolicy,
}

impl CacheBuilder {
    /// Starts a builder for a cache of `capacity` entries, defaulting to
    /// [`CachePolicy::Lru`].
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: CachePolicy::default(),
        }
    }

    /// Selects the eviction policy.
    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. Use [`try_build`](Self::try_build)
    /// for configuration-driven capacities.
    pub fn build<K, V>(self) -> PolicyCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds the cache, rejecting invalid configuration.
    pub fn try_build<K, V>(self) -> Result<PolicyCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        Ok(match self.policy {
            CachePolicy::Fifo => PolicyCache::Fifo(FifoCache::try_new(self.capacity)?),
            CachePolicy::Lru => PolicyCache::Lru(LruCache::try_new(self.capacity)?),
            CachePolicy::Lfu => PolicyCache::Lfu(LfuCache::try_new(self.capacity)?),
            CachePolicy::Random => PolicyCache::Random(RandomCache::try_new(self.capacity)?),
        })
    }
}

/// A cache whose policy was chosen at runtime.
///
/// Dispatches every [`CoreCache`] operation to the selected policy.
#[derive(Debug)]
pub enum PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    Fifo(FifoCache<K, V>),
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Random(RandomCache<K, V>),
}

macro_rules! dispatch {
    ($self:ident, $cache:ident => $body:expr) => {
        match $self {
            PolicyCache::Fifo($cache) => $body,
            PolicyCache::Lru($cache) => $body,
            PolicyCache::Lfu($cache) => $body,
            PolicyCache::Random($cache) => $body,
        }
    };
}

impl<K, V> PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Which policy this cache runs.
    pub fn policy(&self) -> CachePolicy {
        match self {
            PolicyCache::Fifo(_) => CachePolicy::Fifo,
            PolicyCache::Lru(_) => CachePolicy::Lru,
            PolicyCache::Lfu(_) => CachePolicy::Lfu,
            PolicyCache::Random(_) => CachePolicy::Random,
        }
    }
}

impl<K, V> CoreCache<K, V> for PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        dispatch!(self, cache => cache.insert(key, value))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(self, cache => CoreCache::get(cache, key))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        dispatch!(self, cache => cache.remove(key))
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(self, cache => cache.contains(key))
    }

    fn len(&self) -> usize {
        dispatch!(self, cache => cache.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(self, cache => cache.capacity())
    }

    fn clear(&mut self) {
        dispatch!(self, cache => cache.clear())
    }
}
