//! evictkit: in-memory key-value caches with interchangeable eviction
//! policies.
//!
//! Every policy is a fixed-capacity map implementing the
//! [`CoreCache`](traits::CoreCache) contract; they differ only in which
//! entry is evicted when a new key arrives at capacity.
//!
//! | Policy                                          | Victim                     |
//! |-------------------------------------------------|----------------------------|
//! | [`FifoCache`](policy::fifo::FifoCache)          | Oldest insertion           |
//! | [`LruCache`](policy::lru::LruCache)             | Least recently accessed    |
//! | [`LfuCache`](policy::lfu::LfuCache)             | Least frequently accessed  |
//! | [`RandomCache`](policy::random::RandomCache)    | Uniformly random entry     |
//! | [`WeightedCache`](policy::weighted::WeightedCache) | Minimum caller-assigned weight |
//!
//! Raw policies are single-threaded;
//! [`ConcurrentCache`](concurrent::ConcurrentCache) makes any of them safe
//! to share across threads behind one reader-writer lock. When the policy
//! is a runtime decision, [`CacheBuilder`](builder::CacheBuilder) selects
//! one behind a uniform enum.
//!
//! # Quick start
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//!
//! cache.get(&"a");          // "a" is now most recently used
//! cache.insert("c", 3);     // evicts "b"
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod concurrent;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
