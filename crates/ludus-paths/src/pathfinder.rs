//! A* pathfinding over a walkability grid.
//!
//! [`Pathfinder`] performs 8-way A* with 10/14 step costs and the
//! diagonal-shortcut heuristic. Diagonal steps never cut corners: a
//! diagonal move is admitted only when both adjoining cardinal cells are
//! in range and walkable. When the target cannot be reached, the search
//! degrades to a best-effort path ending on the reachable cell whose
//! heuristic distance to the target is smallest.

use ludus_core::{Grid, Point};

use crate::distance::{CARDINAL_COST, DIAGONAL_COST, diagonal_shortcut};
use crate::heap::{IndexedMinHeap, PriorityStore};

/// Sentinel for "no cell" in parent links and the closest-cell tracker.
const NONE: u32 = u32::MAX;

/// Outcome of a [`Pathfinder::find_path`] query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Whether the target itself was reached.
    pub found: bool,
    /// Flat `[x0, y0, x1, y1, …]` coordinate pairs in start-to-end order.
    ///
    /// On a miss this leads to the reachable cell closest to the target
    /// and may be empty when not even a first step existed. `None` only
    /// for degenerate queries (start == target, or out-of-range input).
    pub path: Option<Vec<i32>>,
}

impl PathResult {
    fn not_found() -> Self {
        Self {
            found: false,
            path: None,
        }
    }
}

/// Per-cell bookkeeping for one search frontier entry.
#[derive(Clone)]
struct Cell {
    x: i32,
    y: i32,
    g: i32,
    h: i32,
    /// Number of edges from the start along the current best parent chain.
    order: u32,
    parent: u32,
    /// Current position in the open set, maintained by the heap.
    slot: usize,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            g: 0,
            h: 0,
            order: 0,
            parent: NONE,
            slot: 0,
        }
    }
}

/// Dense cell records addressed by flat id (`x + y * cols`).
///
/// The open set orders ids by `g + h` read through [`PriorityStore`].
struct CellArena {
    cells: Vec<Cell>,
}

impl PriorityStore for CellArena {
    fn priority(&self, id: u32) -> i32 {
        let cell = &self.cells[id as usize];
        cell.g + cell.h
    }

    fn set_slot(&mut self, id: u32, slot: usize) {
        self.cells[id as usize].slot = slot;
    }
}

/// A* search over a borrowed [`Grid`].
///
/// Owns all scratch state (open set, membership bitmaps, cell arena), so
/// a single instance is not reentrant; the grid may be shared between
/// pathfinders as long as nobody mutates walkability mid-search.
pub struct Pathfinder<'g> {
    grid: &'g Grid,
    cols: i32,
    rows: i32,
    open: IndexedMinHeap,
    arena: CellArena,
    in_open: Vec<bool>,
    in_closed: Vec<bool>,
    closest: u32,
}

impl<'g> Pathfinder<'g> {
    /// Create a pathfinder bound to the given grid.
    pub fn new(grid: &'g Grid) -> Self {
        let len = grid.len();
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            grid,
            open: IndexedMinHeap::new(),
            arena: CellArena {
                cells: vec![Cell::default(); len],
            },
            in_open: vec![false; len],
            in_closed: vec![false; len],
            closest: NONE,
        }
    }

    /// Search for a path from `from` to `to`.
    ///
    /// Returns `found == true` with the full path when the target is
    /// reached. When the open set runs dry first, returns `found == false`
    /// with the best-effort path to the closest reached cell (possibly
    /// empty). `from == to` or an out-of-range endpoint yields
    /// `found == false` with no path at all.
    pub fn find_path(&mut self, from: Point, to: Point) -> PathResult {
        if from == to || !self.grid.contains(from) || !self.grid.contains(to) {
            return PathResult::not_found();
        }

        self.open.clear();
        self.in_open.fill(false);
        self.in_closed.fill(false);
        self.closest = NONE;

        let start = self.id(from);
        let target = self.id(to);
        {
            let cell = &mut self.arena.cells[start as usize];
            cell.x = from.x;
            cell.y = from.y;
            cell.g = 0;
            cell.h = 0;
            cell.order = 0;
            cell.parent = NONE;
        }
        // The start is expanded directly; its successors seed the open set.
        self.expand(start, to);

        while let Some(current) = self.open.pop(&mut self.arena) {
            if current == target {
                return PathResult {
                    found: true,
                    path: Some(self.reconstruct(current)),
                };
            }
            self.expand(current, to);
        }

        let path = if self.closest == NONE {
            Vec::new()
        } else {
            self.reconstruct(self.closest)
        };
        PathResult {
            found: false,
            path: Some(path),
        }
    }

    #[inline]
    fn id(&self, p: Point) -> u32 {
        (p.y * self.cols + p.x) as u32
    }

    /// Process every admissible neighbour of `current`, then close it.
    fn expand(&mut self, current: u32, to: Point) {
        let (cx, cy) = {
            let cell = &self.arena.cells[current as usize];
            (cell.x, cell.y)
        };

        let up = cy > 0 && self.grid.is_walkable(Point::new(cx, cy - 1));
        let down = cy + 1 < self.rows && self.grid.is_walkable(Point::new(cx, cy + 1));
        let left = cx > 0 && self.grid.is_walkable(Point::new(cx - 1, cy));
        let right = cx + 1 < self.cols && self.grid.is_walkable(Point::new(cx + 1, cy));

        if up {
            self.visit(current, Point::new(cx, cy - 1), false, to);
        }
        if down {
            self.visit(current, Point::new(cx, cy + 1), false, to);
        }
        if left {
            self.visit(current, Point::new(cx - 1, cy), false, to);
        }
        if right {
            self.visit(current, Point::new(cx + 1, cy), false, to);
        }

        // A diagonal is admissible only when both adjoining cardinal
        // cells are walkable (no corner cutting).
        if up && left {
            let d = Point::new(cx - 1, cy - 1);
            if self.grid.is_walkable(d) {
                self.visit(current, d, true, to);
            }
        }
        if up && right {
            let d = Point::new(cx + 1, cy - 1);
            if self.grid.is_walkable(d) {
                self.visit(current, d, true, to);
            }
        }
        if down && left {
            let d = Point::new(cx - 1, cy + 1);
            if self.grid.is_walkable(d) {
                self.visit(current, d, true, to);
            }
        }
        if down && right {
            let d = Point::new(cx + 1, cy + 1);
            if self.grid.is_walkable(d) {
                self.visit(current, d, true, to);
            }
        }

        self.in_closed[current as usize] = true;
        self.in_open[current as usize] = false;
    }

    /// Relax one neighbour of `current`: insert it on first touch, or
    /// re-parent it when the new route is cheaper.
    fn visit(&mut self, current: u32, p: Point, diagonal: bool, to: Point) {
        let id = self.id(p);
        if self.in_closed[id as usize] {
            return;
        }

        let step = if diagonal { DIAGONAL_COST } else { CARDINAL_COST };
        let (current_g, current_order) = {
            let cell = &self.arena.cells[current as usize];
            (cell.g, cell.order)
        };

        if self.in_open[id as usize] {
            let tentative = current_g + step;
            let cell = &mut self.arena.cells[id as usize];
            if tentative < cell.g {
                cell.g = tentative;
                cell.parent = current;
                cell.order = current_order + 1;
                let slot = cell.slot;
                self.open.update(&mut self.arena, slot);
            }
            return;
        }

        let h = diagonal_shortcut(p, to);
        {
            let cell = &mut self.arena.cells[id as usize];
            cell.x = p.x;
            cell.y = p.y;
            cell.g = current_g + step;
            cell.h = h;
            cell.order = current_order + 1;
            cell.parent = current;
        }
        if self.closest == NONE || h < self.arena.cells[self.closest as usize].h {
            self.closest = id;
        }
        self.in_open[id as usize] = true;
        self.open.insert(&mut self.arena, id);
    }

    /// Walk parent links back from `end`, emitting flat coordinate pairs
    /// in start-to-end order. The walk takes exactly `order` steps, so
    /// the output holds `2 * (order + 1)` integers.
    fn reconstruct(&self, end: u32) -> Vec<i32> {
        let steps = self.arena.cells[end as usize].order as usize;
        let mut out = vec![0i32; (steps + 1) * 2];
        let mut id = end;
        for i in (0..=steps).rev() {
            let cell = &self.arena.cells[id as usize];
            out[2 * i] = cell.x;
            out[2 * i + 1] = cell.y;
            id = cell.parent;
        }
        out
    }
}
