//! # Object Pool
//!
//! Reusable instances of one pooled type, split into free and checked-out.
//!
//! Instances change hands by value: [`ObjectPool::acquire`] moves an
//! instance out to the caller and [`ObjectPool::release`] moves it back.
//! While an instance is out, the pool keeps only its identity key, which is
//! how a second release of the same instance is caught.
//!
//! ## Modes
//!
//! | Mode   | Free instances       | Checked out                      |
//! |--------|----------------------|----------------------------------|
//! | Simple | `Vec`, LIFO          | key set                          |
//! | Dual   | linked list, FIFO    | linked list of [`Checkout`]s     |

use std::panic::Location;

use gamecore_core::{CollectionError, DoublyLinkedList, Identifiable, IdentityIndex};

use super::stats::{AcquireTrace, PoolStats};
use crate::config::PoolMode;
use crate::error::{PoolError, PoolResult};
use crate::poolable::Poolable;

/// Record of one instance currently checked out of a dual-mode pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkout {
    /// Identity key of the instance.
    key: String,
    /// Where the instance was acquired.
    acquired_at: &'static Location<'static>,
}

impl Checkout {
    /// Identity key of the checked-out instance.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Source location of the `acquire` call.
    #[inline]
    #[must_use]
    pub const fn acquired_at(&self) -> &'static Location<'static> {
        self.acquired_at
    }
}

impl Identifiable for Checkout {
    #[inline]
    fn unique_id(&self) -> &str {
        &self.key
    }
}

/// Where a pool keeps its instances.
enum Residency<T> {
    Simple {
        /// Free instances, popped from the back.
        free: Vec<T>,
        /// Keys of instances currently checked out.
        on_loan: IdentityIndex<()>,
        /// Last growth step; compounds on every exhaustion.
        expansion: usize,
    },
    Dual {
        /// Free instances, taken from the front.
        free: DoublyLinkedList<T>,
        /// Instances currently checked out.
        used: DoublyLinkedList<Checkout>,
    },
}

/// A pool of reusable instances of `T`.
///
/// Running out of free instances never fails: the pool constructs more with
/// `T::default()` and carries on.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread or go through a
/// [`SharedRegistry`](crate::SharedRegistry).
///
/// # Example
///
/// ```rust
/// use gamecore_core::{Identifiable, UniqueId};
/// use gamecore_pool::{ObjectPool, PoolMode, Poolable};
///
/// struct Particle {
///     id: UniqueId,
///     life: f32,
/// }
///
/// impl Default for Particle {
///     fn default() -> Self {
///         Self { id: UniqueId::for_type(Self::TYPE_NAME), life: 0.0 }
///     }
/// }
///
/// impl Identifiable for Particle {
///     fn unique_id(&self) -> &str {
///         self.id.as_str()
///     }
/// }
///
/// impl Poolable for Particle {
///     const TYPE_NAME: &'static str = "Particle";
/// }
///
/// let mut pool: ObjectPool<Particle> = ObjectPool::new(16, PoolMode::Dual).unwrap();
///
/// let mut particle = pool.acquire().unwrap();
/// particle.life = 1.0;
/// assert_eq!(pool.used_count(), 1);
///
/// pool.release(particle).unwrap();
/// assert_eq!(pool.free_count(), 16);
/// ```
pub struct ObjectPool<T: Poolable> {
    /// Free and checked-out bookkeeping.
    residency: Residency<T>,
    /// Instances ever constructed by this pool.
    total_created: usize,
    /// Automatic expansions so far.
    expansions: u64,
    /// Whether acquisitions are being traced.
    tracing: bool,
    /// Acquisition counts keyed by call site.
    traces: IdentityIndex<u64>,
}

impl<T: Poolable> ObjectPool<T> {
    /// Creates a pool holding `initial` free instances.
    ///
    /// # Errors
    ///
    /// In dual mode, fails if `T::default()` produces an empty or repeated
    /// identity key.
    pub fn new(initial: usize, mode: PoolMode) -> PoolResult<Self> {
        let residency = match mode {
            PoolMode::Simple => Residency::Simple {
                free: Vec::with_capacity(initial),
                on_loan: IdentityIndex::new(),
                expansion: 1,
            },
            PoolMode::Dual => Residency::Dual {
                free: DoublyLinkedList::with_capacity(initial),
                used: DoublyLinkedList::with_capacity(initial),
            },
        };

        let mut pool = Self {
            residency,
            total_created: 0,
            expansions: 0,
            tracing: false,
            traces: IdentityIndex::new(),
        };
        pool.expand(initial)?;
        Ok(pool)
    }

    /// Name of the pooled type.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    /// The pool's mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> PoolMode {
        match self.residency {
            Residency::Simple { .. } => PoolMode::Simple,
            Residency::Dual { .. } => PoolMode::Dual,
        }
    }

    /// Hands out a free instance, expanding the pool first if none is left.
    ///
    /// The instance is not reset; the caller is expected to initialise it.
    ///
    /// # Errors
    ///
    /// Fails if the instance's identity key is empty or already checked
    /// out. The instance stays on the free side in that case.
    #[track_caller]
    pub fn acquire(&mut self) -> PoolResult<T> {
        let caller = Location::caller();

        let mut item = loop {
            if let Some(item) = self.take_free() {
                break item;
            }
            self.grow()?;
        };

        if let Err(err) = self.check_out(&item, caller) {
            tracing::warn!(
                type_name = T::TYPE_NAME,
                key = item.unique_id(),
                %err,
                "could not check out instance"
            );
            self.put_free(item)?;
            return Err(err);
        }

        if self.tracing {
            self.record_trace(caller)?;
        }

        item.on_acquire();
        Ok(item)
    }

    /// Takes an instance back into the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NotInUse`] if the instance is not checked out of
    /// this pool, which covers releasing the same instance twice.
    pub fn release(&mut self, mut item: T) -> PoolResult<()> {
        let was_on_loan = match &mut self.residency {
            Residency::Simple { on_loan, .. } => on_loan.remove(item.unique_id())?.is_some(),
            Residency::Dual { used, .. } => used.remove(item.unique_id()).is_some(),
        };

        if !was_on_loan {
            tracing::warn!(
                type_name = T::TYPE_NAME,
                key = item.unique_id(),
                "released an instance that is not in use"
            );
            return Err(PoolError::NotInUse {
                type_name: T::TYPE_NAME.to_owned(),
                key: item.unique_id().to_owned(),
            });
        }

        item.on_release();
        self.put_free(item)
    }

    /// Constructs `how_many` new instances and adds them to the free side.
    ///
    /// # Errors
    ///
    /// In dual mode, fails if `T::default()` produces an empty or repeated
    /// identity key.
    pub fn expand(&mut self, how_many: usize) -> PoolResult<()> {
        match &mut self.residency {
            Residency::Simple { free, .. } => {
                free.extend(std::iter::repeat_with(T::default).take(how_many));
                self.total_created += how_many;
            }
            Residency::Dual { free, .. } => {
                for _ in 0..how_many {
                    free.add(T::default())?;
                    self.total_created += 1;
                }
            }
        }
        Ok(())
    }

    /// Total instances tracked: free plus used in dual mode, free only in
    /// simple mode.
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.residency {
            Residency::Simple { free, .. } => free.len(),
            Residency::Dual { free, used } => free.len() + used.len(),
        }
    }

    /// Instances available without expanding.
    #[must_use]
    pub fn free_count(&self) -> usize {
        match &self.residency {
            Residency::Simple { free, .. } => free.len(),
            Residency::Dual { free, .. } => free.len(),
        }
    }

    /// Instances currently checked out.
    #[must_use]
    pub fn used_count(&self) -> usize {
        match &self.residency {
            Residency::Simple { on_loan, .. } => on_loan.len(),
            Residency::Dual { used, .. } => used.len(),
        }
    }

    /// Instances ever constructed by this pool.
    #[inline]
    #[must_use]
    pub const fn total_created(&self) -> usize {
        self.total_created
    }

    /// Number of automatic expansions so far.
    #[inline]
    #[must_use]
    pub const fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Checked-out instances in acquisition order. Dual mode only; a simple
    /// pool yields nothing.
    pub fn used(&self) -> impl Iterator<Item = &Checkout> {
        let used = match &self.residency {
            Residency::Simple { .. } => None,
            Residency::Dual { used, .. } => Some(used.iter()),
        };
        used.into_iter().flatten()
    }

    /// Starts counting acquisitions per call site, discarding older counts.
    pub fn start_tracing(&mut self) {
        if self.tracing {
            return;
        }
        self.tracing = true;
        self.traces.clear();
    }

    /// Stops counting acquisitions.
    pub fn stop_tracing(&mut self) {
        self.tracing = false;
    }

    /// Returns true while acquisitions are being traced.
    #[inline]
    #[must_use]
    pub const fn is_tracing(&self) -> bool {
        self.tracing
    }

    /// Snapshot of the pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let mut traces: Vec<AcquireTrace> = if self.tracing {
            self.traces
                .iter()
                .map(|(site, count)| AcquireTrace {
                    site: site.to_owned(),
                    count: *count,
                })
                .collect()
        } else {
            Vec::new()
        };
        traces.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.site.cmp(&b.site)));

        PoolStats {
            type_name: T::TYPE_NAME.to_owned(),
            mode: self.mode(),
            free: self.free_count(),
            used: self.used_count(),
            total_created: self.total_created,
            expansions: self.expansions,
            traces,
        }
    }

    /// Logs the free and used lists at debug level.
    pub fn dump(&self, label: &str) {
        tracing::debug!(
            type_name = T::TYPE_NAME,
            label,
            free = self.free_count(),
            used = self.used_count(),
            "pool dump"
        );
        if let Residency::Dual { free, used } = &self.residency {
            free.dump("free");
            used.dump("used");
        }
    }

    /// Pops the next free instance.
    fn take_free(&mut self) -> Option<T> {
        match &mut self.residency {
            Residency::Simple { free, .. } => free.pop(),
            Residency::Dual { free, .. } => free.pop_front(),
        }
    }

    /// Records `item` as on loan.
    fn check_out(&mut self, item: &T, caller: &'static Location<'static>) -> PoolResult<()> {
        let key = item.unique_id();
        match &mut self.residency {
            Residency::Simple { on_loan, .. } => {
                if on_loan.contains_key(key) {
                    return Err(CollectionError::DuplicateInsertion {
                        key: key.to_owned(),
                    }
                    .into());
                }
                on_loan.put(key, ())?;
            }
            Residency::Dual { used, .. } => used.add(Checkout {
                key: key.to_owned(),
                acquired_at: caller,
            })?,
        }
        Ok(())
    }

    /// Puts an instance on the free side.
    fn put_free(&mut self, item: T) -> PoolResult<()> {
        match &mut self.residency {
            Residency::Simple { free, .. } => free.push(item),
            Residency::Dual { free, .. } => free.add(item)?,
        }
        Ok(())
    }

    /// Expands after exhaustion.
    ///
    /// Simple: `expansion = round(expansion * 1.2) + 1`, compounding.
    /// Dual: `round(size / 5) + 1`.
    fn grow(&mut self) -> PoolResult<()> {
        let how_many = match &mut self.residency {
            Residency::Simple { expansion, .. } => {
                *expansion = (*expansion * 12 + 5) / 10 + 1;
                *expansion
            }
            Residency::Dual { free, used } => (2 * (free.len() + used.len()) + 5) / 10 + 1,
        };

        self.expansions += 1;
        tracing::debug!(
            type_name = T::TYPE_NAME,
            how_many,
            total = self.total_created + how_many,
            "expanding pool"
        );
        self.expand(how_many)
    }

    /// Counts one acquisition from `caller`.
    fn record_trace(&mut self, caller: &'static Location<'static>) -> PoolResult<()> {
        let site = caller.to_string();
        match self.traces.get_mut(&site) {
            Some(count) => *count += 1,
            None => {
                self.traces.put(site, 1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamecore_core::UniqueId;

    #[derive(Debug)]
    struct Bullet {
        id: UniqueId,
        damage: u32,
        live: bool,
    }

    impl Default for Bullet {
        fn default() -> Self {
            Self {
                id: UniqueId::for_type(Self::TYPE_NAME),
                damage: 0,
                live: false,
            }
        }
    }

    impl Identifiable for Bullet {
        fn unique_id(&self) -> &str {
            self.id.as_str()
        }
    }

    impl Poolable for Bullet {
        const TYPE_NAME: &'static str = "Bullet";

        fn on_acquire(&mut self) {
            self.live = true;
        }

        fn on_release(&mut self) {
            self.live = false;
        }
    }

    /// Every instance shares one key, which a pool must refuse to lend twice.
    #[derive(Default)]
    struct Twin;

    impl Identifiable for Twin {
        fn unique_id(&self) -> &str {
            "same"
        }
    }

    impl Poolable for Twin {
        const TYPE_NAME: &'static str = "Twin";
    }

    /// Has no usable identity key.
    #[derive(Default)]
    struct Blank;

    impl Identifiable for Blank {
        fn unique_id(&self) -> &str {
            ""
        }
    }

    impl Poolable for Blank {
        const TYPE_NAME: &'static str = "Blank";
    }

    #[test]
    fn test_new_prefills() {
        for mode in [PoolMode::Simple, PoolMode::Dual] {
            let pool: ObjectPool<Bullet> = ObjectPool::new(5, mode).unwrap();
            assert_eq!(pool.free_count(), 5);
            assert_eq!(pool.used_count(), 0);
            assert_eq!(pool.total_created(), 5);
            assert_eq!(pool.expansions(), 0);
            assert_eq!(pool.mode(), mode);
        }
    }

    #[test]
    fn test_acquire_release_roundtrip() {
        for mode in [PoolMode::Simple, PoolMode::Dual] {
            let mut pool: ObjectPool<Bullet> = ObjectPool::new(3, mode).unwrap();

            let mut bullet = pool.acquire().unwrap();
            assert!(bullet.live);
            bullet.damage = 9;
            assert_eq!(bullet.damage, 9);
            assert_eq!(pool.free_count(), 2);
            assert_eq!(pool.used_count(), 1);

            pool.release(bullet).unwrap();
            assert_eq!(pool.free_count(), 3);
            assert_eq!(pool.used_count(), 0);
            assert_eq!(pool.size(), 3);
        }
    }

    #[test]
    fn test_simple_expansion_compounds() {
        let mut pool: ObjectPool<Bullet> = ObjectPool::new(0, PoolMode::Simple).unwrap();
        let mut held = Vec::new();
        let mut steps = Vec::new();

        for _ in 0..5 {
            let before = pool.total_created();
            held.push(pool.acquire().unwrap());
            // Drain whatever the expansion produced so the next acquire expands again.
            while pool.free_count() > 0 {
                held.push(pool.acquire().unwrap());
            }
            steps.push(pool.total_created() - before);
        }

        assert_eq!(steps, [2, 3, 5, 7, 9]);
        assert_eq!(pool.expansions(), 5);
        assert_eq!(held.len(), 26);
    }

    #[test]
    fn test_dual_expansion_by_fifth() {
        let mut pool: ObjectPool<Bullet> = ObjectPool::new(10, PoolMode::Dual).unwrap();
        let held: Vec<Bullet> = (0..10).map(|_| pool.acquire().unwrap()).collect();
        assert_eq!(pool.expansions(), 0);

        // size 10 -> round(2) + 1 = 3 new instances
        let extra = pool.acquire().unwrap();
        assert_eq!(pool.expansions(), 1);
        assert_eq!(pool.total_created(), 13);
        assert_eq!(pool.size(), 13);
        assert_eq!(pool.free_count(), 2);

        drop(held);
        drop(extra);
    }

    #[test]
    fn test_one_expansion_past_capacity() {
        for mode in [PoolMode::Simple, PoolMode::Dual] {
            let n = 10;
            let mut pool: ObjectPool<Bullet> = ObjectPool::new(n, mode).unwrap();
            let held: Vec<Bullet> = (0..=n).map(|_| pool.acquire().unwrap()).collect();

            assert_eq!(held.len(), n + 1);
            assert_eq!(pool.expansions(), 1);
            assert!(pool.free_count() > 0);
        }
    }

    #[test]
    fn test_double_release_rejected() {
        for mode in [PoolMode::Simple, PoolMode::Dual] {
            let mut pool: ObjectPool<Bullet> = ObjectPool::new(1, mode).unwrap();
            let bullet = pool.acquire().unwrap();
            let key = bullet.unique_id().to_owned();
            // Same identity, second value: what a stale reference looks like.
            let twin = Bullet {
                id: bullet.id.clone(),
                ..Bullet::default()
            };

            pool.release(bullet).unwrap();
            assert_eq!(
                pool.release(twin),
                Err(PoolError::NotInUse {
                    type_name: "Bullet".to_owned(),
                    key,
                })
            );
            assert_eq!(pool.free_count(), 1);

            let stranger = Bullet::default();
            assert!(matches!(
                pool.release(stranger),
                Err(PoolError::NotInUse { .. })
            ));
        }
    }

    #[test]
    fn test_dual_rejects_repeated_keys() {
        let err = ObjectPool::<Twin>::new(2, PoolMode::Dual).err();
        assert!(matches!(
            err,
            Some(PoolError::Collection(
                CollectionError::DuplicateInsertion { .. }
            ))
        ));
    }

    #[test]
    fn test_simple_duplicate_key_stays_free() {
        let mut pool: ObjectPool<Twin> = ObjectPool::new(2, PoolMode::Simple).unwrap();
        let first = pool.acquire().unwrap();

        assert_eq!(
            pool.acquire().err(),
            Some(PoolError::Collection(CollectionError::DuplicateInsertion {
                key: "same".to_owned()
            }))
        );
        assert_eq!(pool.used_count(), 1);
        assert_eq!(pool.free_count(), 1);
        assert_eq!(pool.total_created(), 2);

        pool.release(first).unwrap();
        assert_eq!(pool.used_count(), 0);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_dual_duplicate_key_stays_free() {
        let mut pool: ObjectPool<Twin> = ObjectPool::new(1, PoolMode::Dual).unwrap();
        let _first = pool.acquire().unwrap();

        // Expansion builds a second "same"; lending it would alias the first.
        assert!(matches!(
            pool.acquire(),
            Err(PoolError::Collection(CollectionError::DuplicateInsertion { .. }))
        ));
        assert_eq!(pool.expansions(), 1);
        assert_eq!(pool.used_count(), 1);
        assert_eq!(pool.free_count(), 1);
        assert_eq!(pool.total_created(), 2);
    }

    #[test]
    fn test_empty_key_stays_free() {
        let mut pool: ObjectPool<Blank> = ObjectPool::new(3, PoolMode::Simple).unwrap();

        assert_eq!(
            pool.acquire().err(),
            Some(PoolError::Collection(CollectionError::InvalidKey))
        );
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.used_count(), 0);
        assert_eq!(pool.total_created(), 3);
    }

    #[test]
    fn test_used_lists_checkouts_in_order() {
        let mut pool: ObjectPool<Bullet> = ObjectPool::new(3, PoolMode::Dual).unwrap();
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();

        let keys: Vec<&str> = pool.used().map(Checkout::key).collect();
        assert_eq!(keys, [a.unique_id(), b.unique_id()]);
        assert!(pool
            .used()
            .all(|c| c.acquired_at().file().ends_with("pool.rs")));

        let simple: ObjectPool<Bullet> = ObjectPool::new(1, PoolMode::Simple).unwrap();
        assert_eq!(simple.used().count(), 0);
    }

    #[test]
    fn test_tracing_counts_call_sites() {
        let mut pool: ObjectPool<Bullet> = ObjectPool::new(4, PoolMode::Simple).unwrap();
        let untraced = pool.acquire().unwrap();

        pool.start_tracing();
        assert!(pool.is_tracing());
        let mut held = vec![untraced];
        for _ in 0..3 {
            held.push(pool.acquire().unwrap());
        }

        let stats = pool.stats();
        assert_eq!(stats.traces.len(), 1);
        assert_eq!(stats.traces[0].count, 3);
        assert!(stats.traces[0].site.contains("pool.rs"));

        pool.stop_tracing();
        assert!(pool.stats().traces.is_empty());

        pool.start_tracing();
        assert!(pool.stats().traces.is_empty());
    }

    #[test]
    fn test_stats_snapshot() {
        let mut pool: ObjectPool<Bullet> = ObjectPool::new(2, PoolMode::Dual).unwrap();
        let held = pool.acquire().unwrap();
        let stats = pool.stats();

        assert_eq!(stats.type_name, "Bullet");
        assert_eq!(stats.free, 1);
        assert_eq!(stats.used, 1);
        assert_eq!(stats.to_string(), "Bullet (free: 1 used: 1)");
        pool.dump("after acquire");

        pool.release(held).unwrap();
    }
}
