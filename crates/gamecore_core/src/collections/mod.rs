//! # Collections
//!
//! Containers keyed by object identity.
//!
//! - [`IdentityIndex`]: identity key to value
//! - [`DoublyLinkedList`]: ordered, O(1) add/remove/move by key
//! - [`HashList`]: linked lists grouped under string keys
//! - [`Queue`]: FIFO

pub mod hash_list;
pub mod index;
pub mod linked_list;
pub mod queue;

pub use hash_list::HashList;
pub use index::IdentityIndex;
pub use linked_list::DoublyLinkedList;
pub use queue::Queue;
