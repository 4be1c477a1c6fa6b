//! Slab-style backing store with stable slot ids.
//!
//! `SlotArena` hands out a [`SlotId`] for every inserted value; the id stays
//! valid until that exact value is removed, no matter how many other slots
//! are inserted or freed in between. Freed slots are recycled through a free
//! list, so long-lived caches reach a steady state with zero allocation per
//! operation.
//!
//! This is the index-stability primitive the policy order lists are built on:
//! a key→`SlotId` map never dangles the way an iterator into a mutating
//! container would.

/// Stable identifier for a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw index of the slot.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of `T` values addressed by [`SlotId`], with slot reuse.
///
/// # Example
///
/// ```
/// use evictkit::ds::SlotArena;
///
/// let mut arena = SlotArena::new();
/// let id = arena.insert("payload");
/// assert_eq!(arena.get(id), Some(&"payload"));
///
/// assert_eq!(arena.remove(id), Some("payload"));
/// assert_eq!(arena.get(id), None);
/// ```
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` slots before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores a value, reusing a freed slot when one is available.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            },
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Frees a slot, returning its value. Returns `None` if the slot is
    /// already free or the id is out of range.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the value in `id`, if the slot is live.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the value in `id`, if the slot is live.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `id` refers to a live slot.
    pub fn contains(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|slot| slot.is_some())
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value and forgets all slot ids.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates live slots in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
