//! # Sharing Pools Across Threads
//!
//! Pools and lists are single-owner structures built for the game loop's
//! thread. When spawning happens on more than one thread, the whole
//! registry goes behind one lock:
//!
//! ```text
//! Thread 1 (Logic):   acquire ──┐
//!                               ├──► Mutex<PoolRegistry>
//! Thread 2 (Effects): release ──┘
//! ```
//!
//! The lock is held for a single free/used transition and nothing else.

mod shared;

pub use shared::SharedRegistry;
