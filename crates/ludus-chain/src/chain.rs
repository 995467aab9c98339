//! Ordered dispatch of handlers over a shared context.

use crate::lru::LruCache;

/// A link in a [`ChainDispatcher`].
///
/// `C` is the context type flowing through the chain; the same context
/// reaches `can_process` and `process` untouched and in order.
pub trait Handler<C> {
    /// Whether this handler wants the context.
    fn can_process(&mut self, ctx: &C) -> bool;

    /// Handle the context.
    fn process(&mut self, ctx: &mut C);
}

/// How a [`ChainDispatcher`] walks its handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchMode {
    /// First willing handler in insertion order runs, then the scan stops.
    #[default]
    First,
    /// Like [`First`](DispatchMode::First), but recently matched handlers
    /// are probed first through an LRU cache; insertion order only breaks
    /// cache misses.
    FirstNoOrder,
    /// Every willing handler runs.
    All,
    /// Willing handlers run in order until one declines, which aborts the
    /// rest of the scan.
    StopIfFail,
}

/// An ordered chain of handlers dispatched over a context.
///
/// Dispatch returns whether the chain handled the context under the
/// active mode's rules; an empty chain never handles anything.
pub struct ChainDispatcher<C> {
    handlers: Vec<Box<dyn Handler<C>>>,
    mode: DispatchMode,
    /// Recently matched handler indices, only consulted in
    /// [`DispatchMode::FirstNoOrder`]. Indices stay valid because the
    /// chain is append-only.
    cache: LruCache<usize>,
}

impl<C> Default for ChainDispatcher<C> {
    fn default() -> Self {
        Self::new(DispatchMode::default())
    }
}

impl<C> ChainDispatcher<C> {
    /// Create an empty dispatcher with the given mode.
    pub fn new(mode: DispatchMode) -> Self {
        Self {
            handlers: Vec::new(),
            mode,
            cache: LruCache::default(),
        }
    }

    /// Append a handler to the end of the chain.
    pub fn push(&mut self, handler: impl Handler<C> + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of handlers in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain has no handlers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The active dispatch mode.
    #[inline]
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Drop every handler (and the fast-path cache with them).
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.cache.clear();
    }

    /// Walk the chain under the active mode.
    pub fn dispatch(&mut self, ctx: &mut C) -> bool {
        if self.handlers.is_empty() {
            return false;
        }
        match self.mode {
            DispatchMode::First => self.dispatch_first(ctx).is_some(),
            DispatchMode::FirstNoOrder => {
                let Self {
                    handlers, cache, ..
                } = self;
                let hit = cache.find(|&idx| {
                    let handler = &mut handlers[idx];
                    if handler.can_process(ctx) {
                        handler.process(ctx);
                        true
                    } else {
                        false
                    }
                });
                if hit {
                    return true;
                }
                match self.dispatch_first(ctx) {
                    Some(idx) => {
                        self.cache.add(idx);
                        true
                    }
                    None => false,
                }
            }
            DispatchMode::All => {
                let mut any = false;
                for handler in &mut self.handlers {
                    if handler.can_process(ctx) {
                        handler.process(ctx);
                        any = true;
                    }
                }
                any
            }
            DispatchMode::StopIfFail => {
                for handler in &mut self.handlers {
                    if !handler.can_process(ctx) {
                        return false;
                    }
                    handler.process(ctx);
                }
                true
            }
        }
    }

    /// Run the first willing handler, returning its index.
    fn dispatch_first(&mut self, ctx: &mut C) -> Option<usize> {
        for (idx, handler) in self.handlers.iter_mut().enumerate() {
            if handler.can_process(ctx) {
                handler.process(ctx);
                return Some(idx);
            }
        }
        None
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn dispatch_mode_round_trip() {
        for mode in [
            DispatchMode::First,
            DispatchMode::FirstNoOrder,
            DispatchMode::All,
            DispatchMode::StopIfFail,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            let back: DispatchMode = serde_json::from_str(&json).unwrap();
            assert_eq!(mode, back);
        }
    }
}
