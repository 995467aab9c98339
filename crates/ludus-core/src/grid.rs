//! Walkability map for grid-based games.
//!
//! [`Grid`] is a dense row-major bitmap of walkable/blocked cells with
//! dimensions fixed at construction. Every cell starts walkable; state
//! changes only through [`set_walkable`](Grid::set_walkable), [`import`](Grid::import)
//! and [`fill`](Grid::fill).

use crate::Point;

/// A fixed-size walkable/blocked bitmap, laid out row-major
/// (`index = x + y * cols`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cols: i32,
    rows: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell walkable.
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![true; (cols * rows) as usize],
        }
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has zero cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows
    }

    /// Whether the cell at `p` is walkable.
    ///
    /// `p` must be inside the grid; callers outside the pathfinder are
    /// expected to pre-validate with [`contains`](Grid::contains).
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.cells[self.index(p)]
    }

    /// Set the walkability of the cell at `p`.
    ///
    /// `p` must be inside the grid; callers outside the pathfinder are
    /// expected to pre-validate with [`contains`](Grid::contains).
    #[inline]
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        let idx = self.index(p);
        self.cells[idx] = walkable;
    }

    /// Replace the whole map from a flat row-major pattern: cell `i`
    /// becomes walkable iff `pattern[i] > 0`.
    ///
    /// A pattern whose length is not exactly `cols * rows` is ignored and
    /// the prior state is preserved.
    pub fn import(&mut self, pattern: &[i32]) {
        if pattern.len() != self.cells.len() {
            return;
        }
        for (cell, &value) in self.cells.iter_mut().zip(pattern) {
            *cell = value > 0;
        }
    }

    /// Set every cell to the given walkability.
    pub fn fill(&mut self, walkable: bool) {
        self.cells.fill(walkable);
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.cols + p.x) as usize
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(3, 2);
        g.set_walkable(Point::new(2, 1), false);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cols(), 3);
        assert_eq!(back.rows(), 2);
        assert!(!back.is_walkable(Point::new(2, 1)));
        assert!(back.is_walkable(Point::new(0, 0)));
    }
}
