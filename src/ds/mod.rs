pub mod frequency_buckets;
pub mod linked_arena;
pub mod slot_arena;

pub use frequency_buckets::FrequencyBuckets;
pub use linked_arena::LinkedArena;
pub use slot_arena::{SlotArena, SlotId};
