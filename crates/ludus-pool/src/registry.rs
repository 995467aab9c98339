//! A type-keyed registry of object pools.
//!
//! [`PoolRegistry`] maps each concrete type to one [`ObjectPool`]. The
//! intended use is one registry per process, constructed at the
//! application's entry point and passed by reference to whoever needs a
//! pool; the registry itself holds no hidden global state.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::pool::ObjectPool;

/// Object-safe view of an [`ObjectPool`] for type-erased storage.
trait AnyPool {
    fn clear(&mut self, shrink: bool);
    fn dispose(&mut self);
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyPool for ObjectPool<T> {
    fn clear(&mut self, shrink: bool) {
        ObjectPool::clear(self, shrink);
    }

    fn dispose(&mut self) {
        ObjectPool::dispose(self);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One pool per type, created on first use.
#[derive(Default)]
pub struct PoolRegistry {
    pools: HashMap<TypeId, Box<dyn AnyPool>>,
}

impl PoolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool registered for `T`, creating a default-configured one on
    /// first use.
    pub fn get<T: 'static>(&mut self) -> &mut ObjectPool<T> {
        self.get_or_insert_with(ObjectPool::default)
    }

    /// The pool registered for `T`, creating it with `make` on first use.
    ///
    /// Idempotent: an existing pool wins and `make` is never called, so
    /// repeated calls always hand back the same pool.
    pub fn get_or_insert_with<T: 'static>(
        &mut self,
        make: impl FnOnce() -> ObjectPool<T>,
    ) -> &mut ObjectPool<T> {
        self.pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(make()))
            .as_any_mut()
            .downcast_mut::<ObjectPool<T>>()
            .expect("registry entry keyed by its own TypeId")
    }

    /// Whether a pool for `T` is registered.
    pub fn has<T: 'static>(&self) -> bool {
        self.pools.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered pools.
    pub fn num_pools(&self) -> usize {
        self.pools.len()
    }

    /// Clear every registered pool, optionally shrinking each back to its
    /// initial capacity. The pools stay registered.
    pub fn clear_all(&mut self, shrink: bool) {
        for pool in self.pools.values_mut() {
            pool.clear(shrink);
        }
    }

    /// Dispose every pool and unregister them all.
    pub fn dispose_all(&mut self) {
        for pool in self.pools.values_mut() {
            pool.dispose();
        }
        log::debug!("pool registry disposed {} pools", self.pools.len());
        self.pools.clear();
    }
}
