//! # Pool Error Types
//!
//! All errors that can occur while acquiring or releasing pooled instances.

use gamecore_core::CollectionError;
use thiserror::Error;

/// Errors that can occur in the pool system.
///
/// These are contract violations. Running out of free instances is not an
/// error: the pool expands instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Released an instance whose type has no pool in the registry.
    #[error("no pool exists for type {type_name}; was the instance built without acquire?")]
    NoPoolForType {
        /// The pooled type's name.
        type_name: String,
    },

    /// Released an instance that is not currently checked out.
    #[error("instance {key} of type {type_name} is not in use")]
    NotInUse {
        /// The pooled type's name.
        type_name: String,
        /// Identity key of the instance.
        key: String,
    },

    /// Two Rust types registered under the same type name.
    #[error("pool for type {type_name} holds a different Rust type")]
    TypeMismatch {
        /// The clashing type name.
        type_name: String,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A free or used list rejected an operation.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
