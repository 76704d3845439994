//! Grid primitives: cells, shapes, the cost matrix and the 8-connected
//! neighborhood shared by relaxation and reconstruction.

mod cost;
mod io;

pub use cost::CostMatrix;

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is one king move away (diagonals included).
    pub fn is_neighbor_of(&self, other: Cell) -> bool {
        *self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }

    /// Chebyshev distance: the minimum number of king moves between two cells.
    pub fn chebyshev(&self, other: Cell) -> usize {
        self.row
            .abs_diff(other.row)
            .max(self.col.abs_diff(other.col))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row,col"` (whitespace around either number is ignored).
impl std::str::FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'row,col', got '{}'", s))?;
        let row = row
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid row '{}': {}", row.trim(), e))?;
        let col = col
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid column '{}': {}", col.trim(), e))?;
        Ok(Self { row, col })
    }
}

/// Dimensions of a grid, with row-major flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major flat index. Caller guarantees `contains(cell)`.
    #[inline]
    pub const fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Inverse of [`GridShape::index`].
    #[inline]
    pub const fn cell(&self, index: usize) -> Cell {
        Cell {
            row: index / self.cols,
            col: index % self.cols,
        }
    }
}

/// In-bounds 8-connected neighbors of `cell`, excluding `cell` itself.
///
/// Order is row-major over the 3x3 block: rows `row-1..=row+1`, then columns
/// `col-1..=col+1`. Corners yield 3 neighbors, non-corner edge cells 5,
/// interior cells 8. `shape` must be non-empty and contain `cell`.
pub fn neighbors(shape: GridShape, cell: Cell) -> impl Iterator<Item = Cell> {
    let r0 = cell.row.saturating_sub(1);
    let r1 = (cell.row + 1).min(shape.rows - 1);
    let c0 = cell.col.saturating_sub(1);
    let c1 = (cell.col + 1).min(shape.cols - 1);
    (r0..=r1)
        .flat_map(move |row| (c0..=c1).map(move |col| Cell { row, col }))
        .filter(move |&n| n != cell)
}
