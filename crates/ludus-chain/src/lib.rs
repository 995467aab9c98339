//! Chain-of-responsibility dispatch for grid-based games.
//!
//! [`ChainDispatcher`] walks an ordered list of handlers in one of four
//! modes ([`DispatchMode`]); the unordered mode keeps a small
//! [`LruCache`] of recently matched handlers as a fast path. The cache is
//! exported on its own because it is useful wherever a bounded
//! most-recently-used set is needed.

pub mod chain;
pub mod lru;

pub use chain::{ChainDispatcher, DispatchMode, Handler};
pub use lru::LruCache;
