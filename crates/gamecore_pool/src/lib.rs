//! # Gamecore Pools
//!
//! Object pooling for games that cannot afford to construct and drop
//! objects every frame.
//!
//! ## Design Principles
//!
//! 1. **Exhaustion expands** - an empty pool constructs more, it never fails
//! 2. **Checked custody** - `Free -> acquire -> Used -> release -> Free`;
//!    releasing twice is an error
//! 3. **Explicit context** - the registry is a value you pass around, not a global
//! 4. **External configuration** - initial sizes and modes live in TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use gamecore_pool::{PoolConfig, PoolRegistry};
//!
//! let mut pools = PoolRegistry::new(PoolConfig::load("data/pools.toml")?);
//!
//! let mut bullet = pools.acquire::<Bullet>()?;
//! bullet.x = 10.0;
//! // ...
//! pools.release(bullet)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;
pub mod poolable;
pub mod registry;
pub mod sync;

pub use config::{PoolConfig, PoolMode, PoolOverride};
pub use error::{PoolError, PoolResult};
pub use memory::{AcquireTrace, Checkout, ObjectPool, PoolStats};
pub use poolable::Poolable;
pub use registry::PoolRegistry;
pub use sync::SharedRegistry;
