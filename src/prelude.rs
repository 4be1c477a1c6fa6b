//! Convenience re-exports for the common surface.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LruCache::new(64);
//! cache.insert("key", 1);
//! assert_eq!(cache.get(&"key"), Some(&1));
//! ```

pub use crate::builder::{CacheBuilder, CachePolicy, PolicyCache};
pub use crate::concurrent::{
    ConcurrentCache, ConcurrentFifoCache, ConcurrentLfuCache, ConcurrentLruCache,
    ConcurrentRandomCache, ConcurrentWeightedCache,
};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::{FifoCache, LfuCache, LruCache, RandomCache, WeightedCache};
pub use crate::traits::CoreCache;
