//! Pathfinding building blocks for grid-based games.
//!
//! This crate provides the search core of the *ludus* toolkit:
//!
//! - **A\*** shortest-path search over a walkability grid
//!   ([`Pathfinder::find_path`]), 8-way with 10/14 step costs and a
//!   no-corner-cutting rule for diagonals
//! - an **indexed min-heap** open set ([`IndexedMinHeap`]) whose entries
//!   know their own position, enabling O(log n) decrease-key
//! - distance helpers ([`manhattan`], [`chebyshev`], [`diagonal_shortcut`])
//!
//! [`Pathfinder`] owns and reuses its internal caches so that repeated
//! searches incur no allocations after warm-up.

mod distance;
mod heap;
mod pathfinder;

pub use distance::{CARDINAL_COST, DIAGONAL_COST, chebyshev, diagonal_shortcut, manhattan};
pub use heap::{IndexedMinHeap, PriorityStore};
pub use pathfinder::{PathResult, Pathfinder};
