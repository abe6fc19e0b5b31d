//! # Pool Registry
//!
//! One [`ObjectPool`] per pooled type, created on first acquire and routed
//! by [`Poolable::TYPE_NAME`].
//!
//! The registry is an ordinary value: create it at startup and hand it to
//! the systems that spawn pooled objects. Pools are never removed.

use std::any::Any;
use std::fmt::Write as _;

use gamecore_core::IdentityIndex;

use crate::config::{PoolConfig, PoolMode};
use crate::error::{PoolError, PoolResult};
use crate::memory::{ObjectPool, PoolStats};
use crate::poolable::Poolable;

/// Type-erased view of an `ObjectPool<T>`.
trait ErasedPool: Send {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn stats(&self) -> PoolStats;
    fn total_created(&self) -> usize;
    fn dump(&self, label: &str);
}

impl<T: Poolable> ErasedPool for ObjectPool<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn stats(&self) -> PoolStats {
        ObjectPool::stats(self)
    }

    fn total_created(&self) -> usize {
        ObjectPool::total_created(self)
    }

    fn dump(&self, label: &str) {
        ObjectPool::dump(self, label);
    }
}

/// Directory of pools keyed by pooled type name.
///
/// # Example
///
/// ```rust,ignore
/// let mut pools = PoolRegistry::new(PoolConfig::load("data/pools.toml")?);
///
/// let bullet = pools.acquire::<Bullet>()?;
/// // ... fly, hit something
/// pools.release(bullet)?;
/// ```
#[derive(Default)]
pub struct PoolRegistry {
    /// Pools by type name.
    pools: IdentityIndex<Box<dyn ErasedPool>>,
    /// Sizes and modes for pools created on demand.
    config: PoolConfig,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            pools: IdentityIndex::new(),
            config,
        }
    }

    /// The configuration used for new pools.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Acquires an instance of `T`, creating its pool if this is the first
    /// request for the type.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::TypeMismatch`] if another Rust type already owns
    /// the pool for `T::TYPE_NAME`, and propagates [`ObjectPool::acquire`]
    /// errors.
    #[track_caller]
    pub fn acquire<T: Poolable>(&mut self) -> PoolResult<T> {
        self.acquire_in(None)
    }

    /// Like [`acquire`](Self::acquire), asking for `mode` if the pool has to
    /// be created. A configured override for the type still wins.
    ///
    /// # Errors
    ///
    /// Same as [`acquire`](Self::acquire).
    #[track_caller]
    pub fn acquire_with_mode<T: Poolable>(&mut self, mode: PoolMode) -> PoolResult<T> {
        self.acquire_in(Some(mode))
    }

    /// Creates the pool for `T` with an explicit size and mode, or returns
    /// the existing one unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::TypeMismatch`] on a type-name clash, and
    /// propagates [`ObjectPool::new`] errors.
    pub fn register<T: Poolable>(
        &mut self,
        initial: usize,
        mode: PoolMode,
    ) -> PoolResult<&mut ObjectPool<T>> {
        if !self.pools.contains_key(T::TYPE_NAME) {
            self.insert_pool::<T>(initial, mode)?;
        }
        self.typed_mut::<T>()
    }

    /// Returns an instance to its type's pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NoPoolForType`] if no instance of `T` was ever
    /// acquired through this registry, and propagates
    /// [`ObjectPool::release`] errors.
    pub fn release<T: Poolable>(&mut self, item: T) -> PoolResult<()> {
        if !self.pools.contains_key(T::TYPE_NAME) {
            tracing::warn!(
                type_name = T::TYPE_NAME,
                "releasing an instance but no pool exists for its type"
            );
            return Err(PoolError::NoPoolForType {
                type_name: T::TYPE_NAME.to_owned(),
            });
        }
        self.typed_mut::<T>()?.release(item)
    }

    /// The pool for `T`, if one exists and holds `T`.
    #[must_use]
    pub fn pool<T: Poolable>(&self) -> Option<&ObjectPool<T>> {
        self.pools
            .get(T::TYPE_NAME)
            .and_then(|pool| pool.as_any().downcast_ref())
    }

    /// The pool for `T` mutably, if one exists and holds `T`.
    pub fn pool_mut<T: Poolable>(&mut self) -> Option<&mut ObjectPool<T>> {
        self.pools
            .get_mut(T::TYPE_NAME)
            .and_then(|pool| pool.as_any_mut().downcast_mut())
    }

    /// Returns true if a pool exists for `T`.
    #[must_use]
    pub fn contains<T: Poolable>(&self) -> bool {
        self.pools.contains_key(T::TYPE_NAME)
    }

    /// Number of pools.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns true if no pool has been created yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Instances constructed across every pool.
    #[must_use]
    pub fn total_pooled(&self) -> usize {
        self.pools.values().map(|pool| pool.total_created()).sum()
    }

    /// Snapshots of every pool, ordered by type name.
    #[must_use]
    pub fn stats(&self) -> Vec<PoolStats> {
        let mut stats: Vec<PoolStats> = self.pools.values().map(|pool| pool.stats()).collect();
        stats.sort_unstable_by(|a, b| a.type_name.cmp(&b.type_name));
        stats
    }

    /// One line per pool, ordered by type name.
    #[must_use]
    pub fn report(&self) -> String {
        let mut report = String::new();
        for stats in self.stats() {
            // Writing to a String cannot fail.
            let _ = writeln!(report, "{stats}");
        }
        report
    }

    /// Logs every pool's lists at debug level.
    pub fn dump(&self, label: &str) {
        for pool in self.pools.values() {
            pool.dump(label);
        }
    }

    #[track_caller]
    fn acquire_in<T: Poolable>(&mut self, requested: Option<PoolMode>) -> PoolResult<T> {
        if !self.pools.contains_key(T::TYPE_NAME) {
            let initial = self
                .config
                .initial_size_for(T::TYPE_NAME, T::INITIAL_POOL_SIZE);
            let mode = self.config.mode_for(T::TYPE_NAME, requested);
            self.insert_pool::<T>(initial, mode)?;
        }
        self.typed_mut::<T>()?.acquire()
    }

    fn insert_pool<T: Poolable>(&mut self, initial: usize, mode: PoolMode) -> PoolResult<()> {
        tracing::debug!(
            type_name = T::TYPE_NAME,
            initial,
            ?mode,
            "constructing a new pool"
        );
        let pool = ObjectPool::<T>::new(initial, mode)?;
        self.pools.put(T::TYPE_NAME, Box::new(pool))?;
        Ok(())
    }

    fn typed_mut<T: Poolable>(&mut self) -> PoolResult<&mut ObjectPool<T>> {
        self.pool_mut::<T>().ok_or_else(|| {
            tracing::warn!(
                type_name = T::TYPE_NAME,
                "pool for this type name holds a different Rust type"
            );
            PoolError::TypeMismatch {
                type_name: T::TYPE_NAME.to_owned(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolOverride;
    use gamecore_core::{Identifiable, UniqueId};

    macro_rules! pooled {
        ($name:ident, $type_name:literal) => {
            struct $name {
                id: UniqueId,
            }

            impl Default for $name {
                fn default() -> Self {
                    Self {
                        id: UniqueId::for_type($type_name),
                    }
                }
            }

            impl Identifiable for $name {
                fn unique_id(&self) -> &str {
                    self.id.as_str()
                }
            }
        };
    }

    pooled!(Bullet, "Bullet");
    impl Poolable for Bullet {
        const TYPE_NAME: &'static str = "Bullet";
    }

    pooled!(Spark, "Spark");
    impl Poolable for Spark {
        const TYPE_NAME: &'static str = "Spark";
        const INITIAL_POOL_SIZE: Option<usize> = Some(8);
    }

    // Claims the same type name as Bullet.
    pooled!(FakeBullet, "Bullet");
    impl Poolable for FakeBullet {
        const TYPE_NAME: &'static str = "Bullet";
    }

    #[test]
    fn test_pool_created_lazily() {
        let mut pools = PoolRegistry::default();
        assert!(!pools.contains::<Bullet>());

        let bullet = pools.acquire::<Bullet>().unwrap();
        assert!(pools.contains::<Bullet>());
        assert_eq!(pools.len(), 1);

        let pool = pools.pool::<Bullet>().unwrap();
        assert_eq!(pool.mode(), PoolMode::Simple);
        assert_eq!(pool.total_created(), 1);

        pools.release(bullet).unwrap();
        assert_eq!(pools.pool::<Bullet>().unwrap().free_count(), 1);
    }

    #[test]
    fn test_release_without_pool() {
        let mut pools = PoolRegistry::default();
        assert_eq!(
            pools.release(Bullet::default()),
            Err(PoolError::NoPoolForType {
                type_name: "Bullet".to_owned()
            })
        );
    }

    #[test]
    fn test_initial_size_resolution() {
        let config = PoolConfig {
            initial_size: 3,
            ..PoolConfig::default()
        };
        let mut pools = PoolRegistry::new(config);

        let bullet = pools.acquire::<Bullet>().unwrap();
        let spark = pools.acquire::<Spark>().unwrap();
        assert_eq!(pools.pool::<Bullet>().unwrap().total_created(), 3);
        assert_eq!(pools.pool::<Spark>().unwrap().total_created(), 8);
        assert_eq!(pools.total_pooled(), 11);

        pools.release(bullet).unwrap();
        pools.release(spark).unwrap();
    }

    #[test]
    fn test_config_override_wins() {
        let config = PoolConfig::default().with_override(
            "Spark",
            PoolOverride {
                initial_size: Some(2),
                mode: Some(PoolMode::Simple),
            },
        );
        let mut pools = PoolRegistry::new(config);

        let spark = pools.acquire_with_mode::<Spark>(PoolMode::Dual).unwrap();
        let pool = pools.pool::<Spark>().unwrap();
        assert_eq!(pool.total_created(), 2);
        assert_eq!(pool.mode(), PoolMode::Simple);
        pools.release(spark).unwrap();
    }

    #[test]
    fn test_mode_only_applies_on_creation() {
        let mut pools = PoolRegistry::default();
        let a = pools.acquire_with_mode::<Bullet>(PoolMode::Dual).unwrap();
        let b = pools.acquire_with_mode::<Bullet>(PoolMode::Simple).unwrap();
        assert_eq!(pools.pool::<Bullet>().unwrap().mode(), PoolMode::Dual);
        assert_eq!(pools.pool::<Bullet>().unwrap().used_count(), 2);
        pools.release(a).unwrap();
        pools.release(b).unwrap();
    }

    #[test]
    fn test_register_explicit() {
        let mut pools = PoolRegistry::default();
        let pool = pools.register::<Bullet>(10, PoolMode::Dual).unwrap();
        assert_eq!(pool.free_count(), 10);

        // Second registration leaves the pool as it was.
        let pool = pools.register::<Bullet>(99, PoolMode::Simple).unwrap();
        assert_eq!(pool.free_count(), 10);
        assert_eq!(pool.mode(), PoolMode::Dual);
    }

    #[test]
    fn test_type_name_clash() {
        let mut pools = PoolRegistry::default();
        let bullet = pools.acquire::<Bullet>().unwrap();

        assert!(matches!(
            pools.acquire::<FakeBullet>(),
            Err(PoolError::TypeMismatch { .. })
        ));
        assert!(matches!(
            pools.release(FakeBullet::default()),
            Err(PoolError::TypeMismatch { .. })
        ));
        assert!(pools.pool::<FakeBullet>().is_none());

        pools.release(bullet).unwrap();
    }

    #[test]
    fn test_report() {
        let mut pools = PoolRegistry::default();
        let spark = pools.acquire_with_mode::<Spark>(PoolMode::Dual).unwrap();
        let bullet = pools.acquire::<Bullet>().unwrap();

        assert_eq!(
            pools.report(),
            "Bullet stats: 0 free.\nSpark (free: 7 used: 1)\n"
        );
        pools.dump("report");

        pools.release(spark).unwrap();
        pools.release(bullet).unwrap();
    }
}
