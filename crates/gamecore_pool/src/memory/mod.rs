//! # Memory Management
//!
//! Per-type pools of reusable instances.
//!
//! ## Design Philosophy
//!
//! Instances are constructed once and recycled. During gameplay:
//! - Acquire takes a free instance, constructing more only on exhaustion
//! - Release puts it back, checked against the pool's loan records
//! - Nothing is ever destroyed while the pool lives

mod pool;
mod stats;

pub use pool::{Checkout, ObjectPool};
pub use stats::{AcquireTrace, PoolStats};
