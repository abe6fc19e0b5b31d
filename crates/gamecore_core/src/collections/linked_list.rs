//! # Doubly Linked List
//!
//! Ordered list of identifiable objects with O(1) add, remove and
//! neighbour swaps given an object's identity key.
//!
//! Nodes live in an arena and link to each other by slot index. An
//! [`IdentityIndex`] maps each object key to its slot, so an object can
//! only be live on a list once. Removing an object frees its slot but keeps
//! the key mapping, and adding the same object again reuses that slot.
//!
//! ```text
//!  index: "a" -> 0, "b" -> 2, "c" -> 1
//!
//!  first                           last
//!    │                               │
//!    ▼                               ▼
//!  [0:a] <──> [2:b] <──> [1:c]
//! ```

use std::cmp::Ordering;

use super::index::IdentityIndex;
use crate::error::{CollectionError, CollectionResult};
use crate::identity::Identifiable;

/// A list element. A node without an item is free.
#[derive(Debug, Clone)]
struct Node<T> {
    /// The tracked object, `None` once the node is freed.
    item: Option<T>,
    /// Slot of the previous node.
    prev: Option<usize>,
    /// Slot of the next node.
    next: Option<usize>,
}

impl<T> Node<T> {
    #[inline]
    const fn new(item: T) -> Self {
        Self {
            item: Some(item),
            prev: None,
            next: None,
        }
    }

    /// Frees the node, handing back its object.
    #[inline]
    fn release(&mut self) -> Option<T> {
        self.prev = None;
        self.next = None;
        self.item.take()
    }
}

/// Doubly linked list keyed by object identity.
///
/// # Thread Safety
///
/// The list is NOT thread-safe. Keep it on one thread or wrap it in a mutex.
///
/// # Example
///
/// ```rust
/// use gamecore_core::DoublyLinkedList;
///
/// let mut list = DoublyLinkedList::new();
/// list.add(String::from("a")).unwrap();
/// list.add(String::from("b")).unwrap();
/// list.move_up("b").unwrap();
///
/// let order: Vec<&str> = list.iter().map(String::as_str).collect();
/// assert_eq!(order, ["b", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct DoublyLinkedList<T> {
    /// Node arena. Free nodes stay in place for reuse by the same key.
    nodes: Vec<Node<T>>,
    /// Object key to node slot.
    index: IdentityIndex<usize>,
    /// Head of the list.
    first: Option<usize>,
    /// Tail of the list.
    last: Option<usize>,
    /// Number of live nodes.
    count: usize,
}

impl<T: Identifiable> DoublyLinkedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: IdentityIndex::with_capacity(capacity),
            first: None,
            last: None,
            count: 0,
        }
    }

    /// Appends an object at the tail of the list.
    ///
    /// If the object was on this list before and has been removed, its old
    /// node slot is reused.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateInsertion`] if the object is
    /// already live on the list, or [`CollectionError::InvalidKey`] if its
    /// key is empty.
    pub fn add(&mut self, item: T) -> CollectionResult<()> {
        let slot = match self.index.get(item.unique_id()).copied() {
            Some(slot) => {
                let node = &mut self.nodes[slot];
                if node.item.is_some() {
                    return Err(CollectionError::DuplicateInsertion {
                        key: item.unique_id().to_owned(),
                    });
                }
                node.item = Some(item);
                slot
            }
            None => {
                let slot = self.nodes.len();
                self.index.put(item.unique_id(), slot)?;
                self.nodes.push(Node::new(item));
                slot
            }
        };

        self.link_last(slot);
        self.count += 1;
        Ok(())
    }

    /// Removes the object with `key` from the list and returns it.
    ///
    /// Returns `None` if no live object has that key.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let slot = self.live_slot(key)?;
        self.unlink(slot);
        self.count -= 1;
        self.nodes[slot].release()
    }

    /// Removes and returns the object at the head of the list.
    pub fn pop_front(&mut self) -> Option<T> {
        let slot = self.first?;
        self.unlink(slot);
        self.count -= 1;
        self.nodes[slot].release()
    }

    /// Returns true if an object with `key` is live on the list.
    #[inline]
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.live_slot(key).is_some()
    }

    /// Returns the live object with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.live_slot(key)
            .and_then(|slot| self.nodes[slot].item.as_ref())
    }

    /// Returns the live object with `key` mutably.
    ///
    /// The object's key must not be changed through this reference.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let slot = self.live_slot(key)?;
        self.nodes[slot].item.as_mut()
    }

    /// Returns the object at the head of the list.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.first.and_then(|slot| self.nodes[slot].item.as_ref())
    }

    /// Returns the object at the tail of the list.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.last.and_then(|slot| self.nodes[slot].item.as_ref())
    }

    /// Swaps the object with its previous neighbour.
    ///
    /// Does nothing if the object is already first.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no live object has `key`.
    pub fn move_up(&mut self, key: &str) -> CollectionResult<()> {
        let slot = self.require_slot(key)?;
        if self.nodes[slot].prev.is_some() {
            self.swap_with_prev(slot);
        }
        Ok(())
    }

    /// Swaps the object with its next neighbour.
    ///
    /// Does nothing if the object is already last.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no live object has `key`.
    pub fn move_down(&mut self, key: &str) -> CollectionResult<()> {
        let slot = self.require_slot(key)?;
        if let Some(next) = self.nodes[slot].next {
            self.swap_with_prev(next);
        }
        Ok(())
    }

    /// Reorders the list with `compare`.
    ///
    /// Sorting is not stable and costs O(n log n) plus an O(n) relink;
    /// keep it off the per-frame path.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut live: Vec<(usize, &T)> = Vec::with_capacity(self.count);
        let mut cursor = self.first;
        while let Some(slot) = cursor {
            let node = &self.nodes[slot];
            if let Some(item) = node.item.as_ref() {
                live.push((slot, item));
            }
            cursor = node.next;
        }
        live.sort_unstable_by(|a, b| compare(a.1, b.1));
        let order: Vec<usize> = live.into_iter().map(|(slot, _)| slot).collect();

        self.first = None;
        self.last = None;
        for slot in order {
            self.link_last(slot);
        }
    }

    /// Removes every object, returning them in list order.
    ///
    /// Keys stay indexed, so re-adding any of them reuses its old slot.
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.count);
        let mut cursor = self.first;
        while let Some(slot) = cursor {
            let node = &mut self.nodes[slot];
            cursor = node.next;
            items.extend(node.release());
        }
        self.first = None;
        self.last = None;
        self.count = 0;
        items
    }

    /// Removes every object.
    pub fn clear(&mut self) {
        drop(self.drain());
    }

    /// Number of live objects. O(1).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the list holds no live objects.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of node slots ever allocated, live or free.
    #[inline]
    #[must_use]
    pub fn node_slots(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates from first to last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.first,
            remaining: self.count,
        }
    }

    /// Iterates over the identity keys from first to last.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(Identifiable::unique_id)
    }

    /// Logs the current order at debug level.
    pub fn dump(&self, label: &str) {
        let order: Vec<&str> = self.keys().collect();
        tracing::debug!(
            label,
            count = self.count,
            first = self.first().map(Identifiable::unique_id),
            last = self.last().map(Identifiable::unique_id),
            "list order: [{}]",
            order.join(", ")
        );
    }

    /// Slot of the live node for `key`.
    #[inline]
    fn live_slot(&self, key: &str) -> Option<usize> {
        self.index
            .get(key)
            .copied()
            .filter(|&slot| self.nodes[slot].item.is_some())
    }

    /// Slot of the live node for `key`, or `NotFound`.
    fn require_slot(&self, key: &str) -> CollectionResult<usize> {
        self.live_slot(key).ok_or_else(|| CollectionError::NotFound {
            key: key.to_owned(),
        })
    }
}

impl<T> DoublyLinkedList<T> {
    /// Links a detached node at the tail.
    fn link_last(&mut self, slot: usize) {
        self.nodes[slot].prev = self.last;
        self.nodes[slot].next = None;
        match self.last {
            Some(last) => self.nodes[last].next = Some(slot),
            None => self.first = Some(slot),
        }
        self.last = Some(slot);
    }

    /// Detaches a node and ties up its neighbours.
    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.last = prev,
        }
        self.nodes[slot].prev = None;
        self.nodes[slot].next = None;
    }

    /// Swaps node `c` with its previous neighbour `b`.
    ///
    /// ```text
    /// a <-> b <-> c <-> d
    /// a <-> c <-> b <-> d
    /// ```
    fn swap_with_prev(&mut self, c: usize) {
        let Some(b) = self.nodes[c].prev else {
            return;
        };
        let a = self.nodes[b].prev;
        let d = self.nodes[c].next;

        match a {
            Some(a) => self.nodes[a].next = Some(c),
            None => self.first = Some(c),
        }
        self.nodes[c].prev = a;
        self.nodes[c].next = Some(b);
        self.nodes[b].prev = Some(c);
        self.nodes[b].next = d;
        match d {
            Some(d) => self.nodes[d].prev = Some(b),
            None => self.last = Some(b),
        }
    }
}

impl<T: Identifiable> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`DoublyLinkedList`], first to last.
pub struct Iter<'a, T> {
    /// The list's node arena.
    nodes: &'a [Node<T>],
    /// Next node to yield.
    cursor: Option<usize>,
    /// Live nodes not yet yielded.
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.cursor?];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.item.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Identifiable> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
