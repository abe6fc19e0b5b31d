//! # Hash List
//!
//! A map of linked lists keyed by a string, e.g. entities grouped by layer.

use super::index::IdentityIndex;
use super::linked_list::DoublyLinkedList;
use crate::error::{CollectionError, CollectionResult};
use crate::identity::Identifiable;

/// Linked lists grouped under string keys.
///
/// Lists are created on the first `add` for a key and are never dropped.
#[derive(Debug, Clone)]
pub struct HashList<T> {
    /// List key to list.
    lists: IdentityIndex<DoublyLinkedList<T>>,
}

impl<T: Identifiable> HashList<T> {
    /// Creates an empty hash list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: IdentityIndex::new(),
        }
    }

    /// Appends `item` to the list under `list_key`, creating the list if needed.
    ///
    /// # Errors
    ///
    /// Propagates [`DoublyLinkedList::add`] errors, and returns
    /// [`CollectionError::InvalidKey`] for an empty `list_key`.
    pub fn add(&mut self, list_key: &str, item: T) -> CollectionResult<()> {
        if let Some(list) = self.lists.get_mut(list_key) {
            return list.add(item);
        }
        let mut list = DoublyLinkedList::new();
        list.add(item)?;
        self.lists.put(list_key, list)?;
        Ok(())
    }

    /// Removes the object with `item_key` from the list under `list_key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnknownList`] if no list exists for `list_key`.
    pub fn remove(&mut self, list_key: &str, item_key: &str) -> CollectionResult<Option<T>> {
        let list = self
            .lists
            .get_mut(list_key)
            .ok_or_else(|| CollectionError::UnknownList {
                key: list_key.to_owned(),
            })?;
        Ok(list.remove(item_key))
    }

    /// Returns the list under `list_key`.
    #[must_use]
    pub fn get(&self, list_key: &str) -> Option<&DoublyLinkedList<T>> {
        self.lists.get(list_key)
    }

    /// Returns the list under `list_key` mutably.
    pub fn get_mut(&mut self, list_key: &str) -> Option<&mut DoublyLinkedList<T>> {
        self.lists.get_mut(list_key)
    }

    /// Number of lists.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if no list has been created yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl<T: Identifiable> Default for HashList<T> {
    fn default() -> Self {
        Self::new()
    }
}
