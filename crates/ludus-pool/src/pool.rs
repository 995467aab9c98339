//! A stack-style object pool with lifecycle hooks.

use std::any::type_name;

/// Default pool capacity.
pub const DEFAULT_CAPACITY: usize = 16;

/// Smallest capacity a pool will accept.
pub const MIN_CAPACITY: usize = 4;

/// Lifecycle hooks for pooled instances.
///
/// `on_create` is the only required hook; the others default to no-ops.
/// `on_acquire` runs when a dormant instance leaves the pool (never for a
/// freshly created one), `on_return` when an instance comes back, and
/// `on_dispose` when the pool lets a held instance go for good.
pub trait Creator<T> {
    /// Build a brand-new instance.
    fn on_create(&mut self) -> T;

    /// Prepare a dormant instance for reuse.
    fn on_acquire(&mut self, _item: &mut T) {}

    /// Scrub an instance as it returns to the pool.
    fn on_return(&mut self, _item: &mut T) {}

    /// Last sight of an instance the pool is dropping.
    fn on_dispose(&mut self, _item: &mut T) {}
}

enum Maker<T> {
    Factory(Box<dyn FnMut() -> T>),
    Creator(Box<dyn Creator<T>>),
}

/// A stack of dormant instances with a logical capacity.
///
/// The capacity starts at a minimum of [`MIN_CAPACITY`] and doubles
/// whenever a [`release`](ObjectPool::release) overflows it. Instances
/// inside the pool have always been through `on_return` since they were
/// last handed out.
pub struct ObjectPool<T> {
    slots: Vec<T>,
    size: usize,
    initial_size: usize,
    maker: Option<Maker<T>>,
    disposed: bool,
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> ObjectPool<T> {
    /// Create an empty pool with the given capacity (clamped to
    /// [`MIN_CAPACITY`]) and no factory or creator.
    pub fn new(capacity: usize) -> Self {
        let size = capacity.max(MIN_CAPACITY);
        Self {
            slots: Vec::with_capacity(size),
            size,
            initial_size: size,
            maker: None,
            disposed: false,
        }
    }

    /// Create a pool that builds fresh instances with `factory`.
    pub fn with_factory(capacity: usize, factory: impl FnMut() -> T + 'static) -> Self {
        let mut pool = Self::new(capacity);
        pool.set_factory(factory);
        pool
    }

    /// Create a pool driven by the full [`Creator`] lifecycle.
    pub fn with_creator(capacity: usize, creator: impl Creator<T> + 'static) -> Self {
        let mut pool = Self::new(capacity);
        pool.set_creator(creator);
        pool
    }

    /// Register a factory, replacing any creator.
    pub fn set_factory(&mut self, factory: impl FnMut() -> T + 'static) {
        self.maker = Some(Maker::Factory(Box::new(factory)));
    }

    /// Register a creator, replacing any factory.
    pub fn set_creator(&mut self, creator: impl Creator<T> + 'static) {
        self.maker = Some(Maker::Creator(Box::new(creator)));
    }

    /// Number of dormant instances currently held.
    #[inline]
    pub fn available(&self) -> usize {
        self.slots.len()
    }

    /// Current logical capacity.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the pool holds no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the pool holds as many instances as its capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.size
    }

    /// Whether [`dispose`](ObjectPool::dispose) has been called.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Return an instance to the pool, doubling the capacity first when
    /// the pool is full.
    pub fn release(&mut self, mut item: T) {
        if self.disposed {
            log::warn!("release on a disposed pool of {}; dropping", type_name::<T>());
            return;
        }
        if let Some(Maker::Creator(creator)) = &mut self.maker {
            creator.on_return(&mut item);
        }
        if self.slots.len() == self.size {
            self.size *= 2;
            self.slots.reserve_exact(self.size - self.slots.len());
        }
        self.slots.push(item);
    }

    /// Drop every held instance (through `on_dispose` when a creator is
    /// registered). With `shrink`, the capacity also falls back to its
    /// initial value.
    pub fn clear(&mut self, shrink: bool) {
        if let Some(Maker::Creator(creator)) = &mut self.maker {
            for mut item in self.slots.drain(..) {
                creator.on_dispose(&mut item);
            }
        } else {
            self.slots.clear();
        }
        if shrink {
            self.size = self.initial_size;
            self.slots.shrink_to(self.size);
        }
    }

    /// Clear the pool and mark it unusable.
    ///
    /// Emits the removal record for this pool's type exactly once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clear(false);
        self.disposed = true;
        log::debug!("pool of {} disposed", type_name::<T>());
    }
}

impl<T: Default> ObjectPool<T> {
    /// Take an instance out of the pool, or build a fresh one when the
    /// pool is empty.
    ///
    /// Dormant instances pass through `on_acquire`; fresh ones do not.
    /// With neither factory nor creator registered, fresh instances are
    /// default-constructed.
    pub fn acquire(&mut self) -> T {
        if let Some(mut item) = self.slots.pop() {
            if let Some(Maker::Creator(creator)) = &mut self.maker {
                creator.on_acquire(&mut item);
            }
            item
        } else {
            self.create_instance()
        }
    }

    /// Fill the pool up to its current capacity.
    pub fn prewarm(&mut self) {
        self.prewarm_to(self.size);
    }

    /// Create and release instances until `n` are available, growing the
    /// capacity to `n` first when needed.
    pub fn prewarm_to(&mut self, n: usize) {
        if n > self.size {
            self.size = n;
            self.slots.reserve_exact(self.size - self.slots.len());
        }
        while self.slots.len() < n {
            let item = self.create_instance();
            self.release(item);
        }
    }

    fn create_instance(&mut self) -> T {
        match &mut self.maker {
            Some(Maker::Factory(factory)) => factory(),
            Some(Maker::Creator(creator)) => creator.on_create(),
            None => T::default(),
        }
    }
}
