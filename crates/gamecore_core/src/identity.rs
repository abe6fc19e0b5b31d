//! # Object Identity
//!
//! Every object tracked by a collection exposes a stable string key.
//! The key is the object's identity: two values with the same key are
//! treated as the same object.
//!
//! Keys are usually generated with [`UniqueId::for_type`], which yields
//! `"<type>:<n>"` with a process-wide counter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter feeding [`UniqueId`].
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(0);

/// An object that can identify itself with a stable, unique string key.
///
/// The key must not change while the object sits in a collection.
pub trait Identifiable {
    /// Returns the identity key of this object.
    fn unique_id(&self) -> &str;
}

impl Identifiable for String {
    #[inline]
    fn unique_id(&self) -> &str {
        self
    }
}

impl Identifiable for &'static str {
    #[inline]
    fn unique_id(&self) -> &str {
        self
    }
}

/// A generated identity key of the form `"<type>:<object id>"`.
///
/// # Example
///
/// ```rust
/// use gamecore_core::UniqueId;
///
/// let a = UniqueId::for_type("Fighter");
/// let b = UniqueId::for_type("Fighter");
/// assert_ne!(a, b);
/// assert_eq!(a.type_name(), "Fighter");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueId {
    /// The full key.
    key: String,
    /// Numeric part of the key.
    object_id: u64,
}

impl UniqueId {
    /// Generates a fresh key for an object of the named type.
    #[must_use]
    pub fn for_type(type_name: &str) -> Self {
        let object_id = NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            key: format!("{type_name}:{object_id}"),
            object_id,
        }
    }

    /// Returns the key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Returns the numeric object id.
    #[inline]
    #[must_use]
    pub const fn object_id(&self) -> u64 {
        self.object_id
    }

    /// Returns the type-name prefix of the key.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.key
            .rsplit_once(':')
            .map_or(self.key.as_str(), |(name, _)| name)
    }
}

impl Identifiable for UniqueId {
    #[inline]
    fn unique_id(&self) -> &str {
        &self.key
    }
}

impl AsRef<str> for UniqueId {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
