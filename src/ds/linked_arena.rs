//! Index-addressed doubly linked list.
//!
//! `LinkedArena` keeps list nodes inside a [`SlotArena`] and threads them
//! with `SlotId` links instead of pointers or container iterators. A node's
//! id stays valid across every other mutation, so a key→id map can be kept
//! alongside the list without any reference-stability concerns, and every
//! list operation stays safe code.
//!
//! ```text
//!   head ──► [ node ] ◄──► [ node ] ◄──► [ node ] ◄── tail
//!              ▲                            ▲
//!              │ SlotId                     │ SlotId
//!         map["a"]                     map["c"]
//! ```
//!
//! Ordering convention is left to the caller: FIFO pushes at the tail and
//! evicts the front; LRU additionally moves entries to the tail on access.
//!
//! | Operation      | Time  |
//! |----------------|-------|
//! | `push_back`    | O(1)  |
//! | `pop_front`    | O(1)  |
//! | `remove`       | O(1)  |
//! | `move_to_back` | O(1)  |
//! | `get`/`get_mut`| O(1)  |

use crate::ds::slot_arena::{SlotArena, SlotId};

struct Node<T> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    value: T,
}

/// Doubly linked list over a slot arena, addressed by stable [`SlotId`]s.
///
/// # Example
///
/// ```
/// use evictkit::ds::LinkedArena;
///
/// let mut list = LinkedArena::new();
/// let a = list.push_back("a");
/// let _b = list.push_back("b");
/// list.push_back("c");
///
/// // Mid-list removal by id, O(1)
/// assert_eq!(list.remove(a), Some("a"));
/// assert_eq!(list.pop_front(), Some("b"));
/// assert_eq!(list.front(), Some(&"c"));
/// ```
pub struct LinkedArena<T> {
    nodes: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> LinkedArena<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with pre-allocated node storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Appends a value at the tail and returns its stable id.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.nodes.insert(Node {
            prev: self.tail,
            next: None,
            value,
        });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.nodes.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the front value (the oldest under FIFO pushes).
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(head)
    }

    /// Returns a reference to the front value without removing it.
    pub fn front(&self) -> Option<&T> {
        self.nodes.get(self.head?).map(|node| &node.value)
    }

    /// Returns the id of the front node.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns a reference to the back value.
    pub fn back(&self) -> Option<&T> {
        self.nodes.get(self.tail?).map(|node| &node.value)
    }

    /// Detaches and frees the node `id`, returning its value.
    ///
    /// Neighbors are relinked in the same step; every other id stays valid.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.nodes.remove(id).map(|node| node.value)
    }

    /// Moves the node `id` to the tail, keeping its value and id.
    ///
    /// Returns `false` if `id` is not a live node.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return self.nodes.contains(id);
        }
        if self.detach(id).is_none() {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = self.tail;
            node.next = None;
        }
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.nodes.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        true
    }

    /// Returns a reference to the value stored in `id`.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored in `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.value)
    }

    /// Number of nodes in the list.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values front-to-back. Used by invariant audits; O(n).
    pub fn iter(&self) -> LinkedArenaIter<'_, T> {
        LinkedArenaIter {
            list: self,
            cursor: self.head,
        }
    }

    /// Unlinks `id` from its neighbors without freeing the slot.
    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.nodes.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.nodes.get_mut(prev_id) {
                    node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.nodes.get_mut(next_id) {
                    node.prev = prev;
                }
            },
            None => self.tail = prev,
        }
        Some(())
    }
}

impl<T> Default for LinkedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LinkedArena<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`LinkedArena`].
pub struct LinkedArenaIter<'a, T> {
    list: &'a LinkedArena<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for LinkedArenaIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.cursor?;
        let node = self.list.nodes.get(id)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}
