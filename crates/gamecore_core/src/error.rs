//! # Collection Error Types
//!
//! All contract violations the collections can report.

use thiserror::Error;

/// Errors raised by the identity-keyed collections.
///
/// Every variant is a programming error on the caller's side. None of them
/// is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An object was added to a list while it is already live on that list.
    #[error("object {key} is already on the list")]
    DuplicateInsertion {
        /// Identity key of the object.
        key: String,
    },

    /// An operation targeted an object that is not live on the list.
    #[error("object {key} is not on the list")]
    NotFound {
        /// Identity key of the object.
        key: String,
    },

    /// An empty key was handed to an identity index.
    #[error("identity keys must not be empty")]
    InvalidKey,

    /// A hash list has no list registered under the key.
    #[error("no list registered for key {key}")]
    UnknownList {
        /// The list key that was looked up.
        key: String,
    },
}

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;
