//! # Poolable Contract
//!
//! What a type must provide to live in an [`ObjectPool`](crate::ObjectPool).

use gamecore_core::Identifiable;

/// A type whose instances are recycled through a pool.
///
/// Pooled instances are built with [`Default`] when a pool expands and are
/// never re-constructed after that. A pooled type usually offers a `create`
/// function that acquires an instance and then resets its fields.
///
/// # Example
///
/// ```rust
/// use gamecore_core::{Identifiable, UniqueId};
/// use gamecore_pool::{PoolRegistry, PoolResult, Poolable};
///
/// struct Point {
///     id: UniqueId,
///     x: f32,
///     y: f32,
/// }
///
/// impl Default for Point {
///     fn default() -> Self {
///         Self { id: UniqueId::for_type(Self::TYPE_NAME), x: 0.0, y: 0.0 }
///     }
/// }
///
/// impl Identifiable for Point {
///     fn unique_id(&self) -> &str {
///         self.id.as_str()
///     }
/// }
///
/// impl Poolable for Point {
///     const TYPE_NAME: &'static str = "Point";
/// }
///
/// impl Point {
///     fn create(pools: &mut PoolRegistry, x: f32, y: f32) -> PoolResult<Self> {
///         let mut point = pools.acquire::<Self>()?;
///         point.x = x;
///         point.y = y;
///         Ok(point)
///     }
/// }
///
/// let mut pools = PoolRegistry::default();
/// let p = Point::create(&mut pools, 100.0, 100.0).unwrap();
/// pools.release(p).unwrap();
/// ```
pub trait Poolable: Identifiable + Default + Send + 'static {
    /// Globally unique name of the type; the registry key of its pool.
    const TYPE_NAME: &'static str;

    /// Initial pool size for this type, when the configuration has no
    /// override for it.
    const INITIAL_POOL_SIZE: Option<usize> = None;

    /// Called on the instance as it leaves the pool.
    fn on_acquire(&mut self) {}

    /// Called on the instance as it goes back into the pool.
    fn on_release(&mut self) {}
}
