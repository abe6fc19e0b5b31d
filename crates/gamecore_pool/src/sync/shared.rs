//! Mutex-guarded registry handle.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::PoolMode;
use crate::error::PoolResult;
use crate::memory::PoolStats;
use crate::poolable::Poolable;
use crate::registry::PoolRegistry;

/// Cloneable, thread-safe handle to a [`PoolRegistry`].
///
/// Every call takes the lock for the duration of one registry operation.
///
/// # Example
///
/// ```rust,ignore
/// let pools = SharedRegistry::new(PoolRegistry::default());
///
/// let worker = pools.clone();
/// std::thread::spawn(move || {
///     let spark = worker.acquire::<Spark>()?;
///     worker.release(spark)
/// });
/// ```
#[derive(Clone, Default)]
pub struct SharedRegistry {
    /// The guarded registry.
    inner: Arc<Mutex<PoolRegistry>>,
}

impl SharedRegistry {
    /// Wraps a registry for shared use.
    #[must_use]
    pub fn new(registry: PoolRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// See [`PoolRegistry::acquire`].
    ///
    /// # Errors
    ///
    /// Same as [`PoolRegistry::acquire`].
    #[track_caller]
    pub fn acquire<T: Poolable>(&self) -> PoolResult<T> {
        self.inner.lock().acquire::<T>()
    }

    /// See [`PoolRegistry::acquire_with_mode`].
    ///
    /// # Errors
    ///
    /// Same as [`PoolRegistry::acquire_with_mode`].
    #[track_caller]
    pub fn acquire_with_mode<T: Poolable>(&self, mode: PoolMode) -> PoolResult<T> {
        self.inner.lock().acquire_with_mode::<T>(mode)
    }

    /// See [`PoolRegistry::release`].
    ///
    /// # Errors
    ///
    /// Same as [`PoolRegistry::release`].
    pub fn release<T: Poolable>(&self, item: T) -> PoolResult<()> {
        self.inner.lock().release(item)
    }

    /// See [`PoolRegistry::stats`].
    #[must_use]
    pub fn stats(&self) -> Vec<PoolStats> {
        self.inner.lock().stats()
    }

    /// Runs `f` with the registry locked.
    ///
    /// Keep `f` short; every other thread waits on it.
    pub fn with<R>(&self, f: impl FnOnce(&mut PoolRegistry) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
