//! Frequency-ordered key index for LFU eviction.
//!
//! Tracks an access-frequency counter per key and groups keys into buckets by
//! frequency, each bucket holding its keys in arrival order. A min-frequency
//! watermark makes the eviction candidate reachable in O(1).
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  index: FxHashMap<K, SlotId>      entries: SlotArena<Entry>   │
//! │                                                               │
//! │  buckets: FxHashMap<u64, Bucket>                              │
//! │                                                               │
//! │   freq=1:  head ─► [k4] ◄──► [k7] ◄─ tail    ← min_freq = 1   │
//! │   freq=2:  head ─► [k1] ◄─ tail                               │
//! │   freq=5:  head ─► [k2] ◄──► [k3] ◄─ tail                     │
//! │                                                               │
//! │   evict = head of the min_freq bucket                         │
//! │           (lowest frequency, oldest arrival wins ties)        │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Watermark discipline
//!
//! - `insert` always starts a key at frequency 1 and resets the watermark to
//!   1; a fresh key can never exceed the current minimum.
//! - `touch` moves a key to the `freq+1` bucket tail. If that empties the
//!   minimum bucket, the watermark advances to `freq+1`, which is guaranteed
//!   non-empty because the promoted key just landed there.
//! - `remove` may leave the watermark stale (pointing at a dropped bucket).
//!   Recomputing eagerly is wasted work: the next `insert` resets it to 1,
//!   and the read paths (`min_freq`, `peek_min`, `pop_min`) fall back to
//!   scanning the live bucket frequencies when the watermark misses. That
//!   scan is bounded by the number of distinct frequencies, and eviction only
//!   ever runs when the structure is at capacity, where the watermark is
//!   always live.
//!
//! | Operation  | Time              |
//! |------------|-------------------|
//! | `insert`   | O(1)              |
//! | `touch`    | O(1)              |
//! | `remove`   | O(1)              |
//! | `pop_min`  | O(1) amortized    |
//! | `frequency`| O(1)              |

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

/// Per-key frequency counters with bucketed ordering and a min watermark.
///
/// # Example
///
/// ```
/// use evictkit::ds::FrequencyBuckets;
///
/// let mut freq = FrequencyBuckets::new();
/// freq.insert("a");
/// freq.insert("b");
/// freq.touch(&"a");
///
/// assert_eq!(freq.frequency(&"a"), Some(2));
/// assert_eq!(freq.frequency(&"b"), Some(1));
///
/// // "b" sits alone at the minimum frequency
/// assert_eq!(freq.pop_min(), Some(("b", 1)));
/// ```
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    /// Smallest frequency with a live bucket; 0 when empty, possibly stale
    /// after `remove` (see module docs).
    min_freq: u64,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates a tracker with pre-allocated entry storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Returns the smallest frequency with live keys.
    pub fn min_freq(&self) -> Option<u64> {
        self.live_min()
    }

    /// Starts tracking `key` at frequency 1.
    ///
    /// Returns `false` (leaving state untouched) if the key is already
    /// tracked. Always resets the watermark to 1.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);
        self.push_tail(1, id);
        self.min_freq = 1;
        true
    }

    /// Promotes `key` to the next frequency, returning the new count.
    ///
    /// The key moves to the tail of the `freq+1` bucket, so within any
    /// bucket, keys stay ordered by when they arrived at that frequency.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.entries.get(id)?.freq;
        let next_freq = freq.saturating_add(1);
        if next_freq == freq {
            // Counter saturated; keep the entry where it is.
            return Some(freq);
        }

        let emptied = self.unlink(freq, id);
        if emptied && self.min_freq == freq {
            // The promoted key lands in freq+1, so that bucket is non-empty.
            self.min_freq = next_freq;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.push_tail(next_freq, id);
        Some(next_freq)
    }

    /// Stops tracking `key`, returning its final frequency.
    ///
    /// May leave the watermark stale; see the module docs for why that is
    /// safe.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let freq = self.entries.get(id)?.freq;
        self.unlink(freq, id);
        self.entries.remove(id);
        Some(freq)
    }

    /// Returns the eviction candidate: oldest key in the minimum bucket.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let min = self.live_min()?;
        let head = self.buckets.get(&min)?.head?;
        let entry = self.entries.get(head)?;
        Some((&entry.key, entry.freq))
    }

    /// Removes and returns the eviction candidate.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let min = self.live_min()?;
        let head = self.buckets.get(&min)?.head?;
        self.unlink(min, head);
        let entry = self.entries.remove(head)?;
        self.index.remove(&entry.key);
        self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
        Some((entry.key, entry.freq))
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Iterates tracked keys with their frequencies, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(_, entry)| (&entry.key, entry.freq))
    }

    /// Resolves the watermark against live buckets.
    fn live_min(&self) -> Option<u64> {
        if self.buckets.contains_key(&self.min_freq) {
            return Some(self.min_freq);
        }
        self.buckets.keys().copied().min()
    }

    /// Appends entry `id` to the tail of the `freq` bucket.
    fn push_tail(&mut self, freq: u64, id: SlotId) {
        let bucket = self.buckets.entry(freq).or_default();
        let old_tail = bucket.tail;
        bucket.tail = Some(id);
        if bucket.head.is_none() {
            bucket.head = Some(id);
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = old_tail;
            entry.next = None;
        }
        if let Some(tail_id) = old_tail {
            if let Some(entry) = self.entries.get_mut(tail_id) {
                entry.next = Some(id);
            }
        }
    }

    /// Unlinks entry `id` from the `freq` bucket, dropping the bucket if it
    /// empties. Returns `true` when the bucket was dropped.
    fn unlink(&mut self, freq: u64, id: SlotId) -> bool {
        let (prev, next) = match self.entries.get(id) {
            Some(entry) => (entry.prev, entry.next),
            None => return false,
        };

        match prev {
            Some(prev_id) => {
                if let Some(entry) = self.entries.get_mut(prev_id) {
                    entry.next = next;
                }
            },
            None => {
                if let Some(bucket) = self.buckets.get_mut(&freq) {
                    bucket.head = next;
                }
            },
        }
        match next {
            Some(next_id) => {
                if let Some(entry) = self.entries.get_mut(next_id) {
                    entry.prev = prev;
                }
            },
            None => {
                if let Some(bucket) = self.buckets.get_mut(&freq) {
                    bucket.tail = prev;
                }
            },
        }

        let emptied = self
            .buckets
            .get(&freq)
            .map(|bucket| bucket.head.is_none())
            .unwrap_or(false);
        if emptied {
            self.buckets.remove(&freq);
        }
        emptied
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for FrequencyBuckets<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyBuckets")
            .field("len", &self.index.len())
            .field("min_freq", &self.min_freq)
            .finish_non_exhaustive()
    }
}
