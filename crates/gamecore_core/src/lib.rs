//! # Gamecore Core
//!
//! Identity-keyed collections used by the object pools and by game code:
//! - Every tracked object names itself with a stable string key
//! - Lists find nodes by key, so add/remove/move are O(1)
//! - Node slots are recycled per key, not reallocated
//!
//! ## Example
//!
//! ```rust
//! use gamecore_core::{DoublyLinkedList, Identifiable, UniqueId};
//!
//! struct Ship {
//!     id: UniqueId,
//! }
//!
//! impl Identifiable for Ship {
//!     fn unique_id(&self) -> &str {
//!         self.id.as_str()
//!     }
//! }
//!
//! let mut ships = DoublyLinkedList::new();
//! let ship = Ship { id: UniqueId::for_type("Ship") };
//! let key = ship.id.to_string();
//! ships.add(ship).unwrap();
//! assert!(ships.has(&key));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collections;
pub mod error;
pub mod identity;

pub use collections::{DoublyLinkedList, HashList, IdentityIndex, Queue};
pub use error::{CollectionError, CollectionResult};
pub use identity::{Identifiable, UniqueId};
