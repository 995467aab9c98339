//! Object pooling for grid-based games.
//!
//! [`ObjectPool`] keeps dormant instances on a stack so hot loops can
//! recycle allocations instead of churning the allocator. A pool can be
//! driven by a plain factory closure or by a [`Creator`], a set of
//! lifecycle hooks invoked as instances move in and out of the pool.
//! [`PoolRegistry`] maps each type to one process-wide pool.

pub mod pool;
pub mod registry;

pub use pool::{Creator, ObjectPool};
pub use registry::PoolRegistry;
