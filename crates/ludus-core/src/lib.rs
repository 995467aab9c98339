//! **ludus-core** — foundational types for the ludus game toolkit.
//!
//! This crate provides the types shared across the *ludus* ecosystem:
//! the [`Point`] geometry primitive and the walkability [`Grid`] consumed
//! by the pathfinding crate.

pub mod geom;
pub mod grid;

pub use geom::Point;
pub use grid::Grid;
