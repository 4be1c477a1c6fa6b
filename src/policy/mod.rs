pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod random;
pub mod weighted;

pub use fifo::FifoCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use random::RandomCache;
pub use weighted::WeightedCache;
