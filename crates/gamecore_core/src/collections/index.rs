//! # Identity Index
//!
//! A hash table from identity key to value. Backs the linked list's node
//! lookup and the pool registry's type directory.

use std::collections::hash_map::{self, HashMap};

use crate::error::{CollectionError, CollectionResult};

/// Map from a non-empty identity key to a value.
///
/// Iteration order is unspecified.
///
/// # Example
///
/// ```rust
/// use gamecore_core::IdentityIndex;
///
/// let mut index = IdentityIndex::new();
/// assert_eq!(index.put("Fighter:0", 10).unwrap(), None);
/// assert_eq!(index.put("Fighter:0", 11).unwrap(), Some(10));
/// assert_eq!(index.get("Fighter:0"), Some(&11));
/// ```
#[derive(Clone, Debug)]
pub struct IdentityIndex<V> {
    /// Key to value storage.
    entries: HashMap<String, V>,
}

impl<V> IdentityIndex<V> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates an empty index with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Maps `key` to `value`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidKey`] if `key` is empty.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> CollectionResult<Option<V>> {
        let key = key.into();
        check_key(&key)?;
        Ok(self.entries.insert(key, value))
    }

    /// Returns the value mapped to `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns the value mapped to `key` mutably.
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Removes the mapping for `key`, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidKey`] if `key` is empty.
    pub fn remove(&mut self, key: &str) -> CollectionResult<Option<V>> {
        check_key(key)?;
        Ok(self.entries.remove(key))
    }

    /// Returns true if `key` has a mapping.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of mappings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no mappings.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every mapping.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Iterates over the values mutably.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    /// Iterates over `(key, value)` entries.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Copies every entry of `other` into this index, overwriting on conflict.
    pub fn put_all(&mut self, other: &Self)
    where
        V: Clone,
    {
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Returns true if any key maps to `value`.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries.values().any(|v| v == value)
    }
}

impl<V> Default for IdentityIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the entries of an [`IdentityIndex`].
pub struct Iter<'a, V> {
    /// Underlying map iterator.
    inner: hash_map::Iter<'a, String, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> IntoIterator for &'a IdentityIndex<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rejects keys that cannot identify anything.
#[inline]
fn check_key(key: &str) -> CollectionResult<()> {
    if key.is_empty() {
        Err(CollectionError::InvalidKey)
    } else {
        Ok(())
    }
}
