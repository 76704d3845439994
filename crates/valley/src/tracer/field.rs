//! Per-invocation search state: tentative distances and finalized flags.
//!
//! Both are flat arrays indexed by `row * cols + col` and are owned by a
//! single tracer invocation. Cell-keyed accessors expect in-bounds cells;
//! debug builds assert it, since an out-of-range column would otherwise alias
//! a cell on the next row.

use nalgebra::DMatrix;

use crate::grid::{Cell, GridShape};

/// Best known accumulated cost from the initial cell to every cell.
///
/// Values only ever decrease. Each improvement also records the cell that
/// produced it, so the relaxed shortest-path tree can be walked back.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    shape: GridShape,
    unreached: f64,
    dist: Vec<f64>,
    pred: Vec<Option<usize>>,
}

impl DistanceField {
    /// Field with every cell at the `unreached` sentinel.
    pub fn new(shape: GridShape, unreached: f64) -> Self {
        Self {
            shape,
            unreached,
            dist: vec![unreached; shape.len()],
            pred: vec![None; shape.len()],
        }
    }

    /// Set the starting distance of the initial cell (its own cost).
    pub fn seed(&mut self, cell: Cell, cost: f64) {
        debug_assert!(self.shape.contains(cell), "{} outside field", cell);
        let idx = self.shape.index(cell);
        self.dist[idx] = cost;
        self.pred[idx] = None;
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Sentinel value held by cells that were never reached.
    #[inline]
    pub fn unreached_value(&self) -> f64 {
        self.unreached
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> f64 {
        debug_assert!(self.shape.contains(cell), "{} outside field", cell);
        self.dist[self.shape.index(cell)]
    }

    #[inline]
    pub(crate) fn get_index(&self, index: usize) -> f64 {
        self.dist[index]
    }

    /// True when the cell holds a distance below the sentinel.
    #[inline]
    pub fn is_reached(&self, cell: Cell) -> bool {
        self.get(cell) < self.unreached
    }

    /// Lower the distance of `cell` to `candidate` if that is an improvement.
    pub(crate) fn relax(&mut self, cell: Cell, candidate: f64, from: Cell) -> bool {
        debug_assert!(self.shape.contains(cell), "{} outside field", cell);
        let idx = self.shape.index(cell);
        if candidate < self.dist[idx] {
            self.dist[idx] = candidate;
            self.pred[idx] = Some(self.shape.index(from));
            true
        } else {
            false
        }
    }

    /// Cell whose relaxation last improved `cell`.
    pub fn predecessor(&self, cell: Cell) -> Option<Cell> {
        debug_assert!(self.shape.contains(cell), "{} outside field", cell);
        self.pred[self.shape.index(cell)].map(|i| self.shape.cell(i))
    }

    /// Row-major distances.
    pub fn as_slice(&self) -> &[f64] {
        &self.dist
    }

    /// Distances as a `rows x cols` matrix.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.shape.rows, self.shape.cols, &self.dist)
    }

    /// Nested rows with unreached cells as `None` (JSON has no infinity).
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        self.dist
            .chunks(self.shape.cols)
            .map(|row| {
                row.iter()
                    .map(|&d| (d < self.unreached).then_some(d))
                    .collect()
            })
            .collect()
    }
}

/// Finalized flag per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedSet {
    shape: GridShape,
    flags: Vec<bool>,
    count: usize,
}

impl VisitedSet {
    /// All cells unvisited except `initial`.
    pub fn new(shape: GridShape, initial: Cell) -> Self {
        let mut flags = vec![false; shape.len()];
        flags[shape.index(initial)] = true;
        Self {
            shape,
            flags,
            count: 1,
        }
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn is_visited(&self, cell: Cell) -> bool {
        debug_assert!(self.shape.contains(cell), "{} outside visited set", cell);
        self.flags[self.shape.index(cell)]
    }

    #[inline]
    pub(crate) fn is_visited_index(&self, index: usize) -> bool {
        self.flags[index]
    }

    pub fn mark(&mut self, cell: Cell) {
        debug_assert!(self.shape.contains(cell), "{} outside visited set", cell);
        let idx = self.shape.index(cell);
        if !self.flags[idx] {
            self.flags[idx] = true;
            self.count += 1;
        }
    }

    /// Number of finalized cells.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relax_only_improves() {
        let shape = GridShape::new(2, 2);
        let mut field = DistanceField::new(shape, 1000.0);
        field.seed(Cell::new(0, 0), 1.0);
        assert!(field.relax(Cell::new(1, 1), 3.0, Cell::new(0, 0)));
        assert!(!field.relax(Cell::new(1, 1), 3.0, Cell::new(0, 1)));
        assert!(field.relax(Cell::new(1, 1), 2.5, Cell::new(1, 0)));
        assert_eq!(field.get(Cell::new(1, 1)), 2.5);
        assert_eq!(field.predecessor(Cell::new(1, 1)), Some(Cell::new(1, 0)));
        assert_eq!(field.predecessor(Cell::new(0, 0)), None);
        assert!(!field.is_reached(Cell::new(0, 1)));
        assert!(!field.relax(Cell::new(0, 1), 1000.0, Cell::new(0, 0)));
    }

    #[test]
    fn rows_hide_unreached() {
        let mut field = DistanceField::new(GridShape::new(2, 2), f64::INFINITY);
        field.seed(Cell::new(1, 0), 0.5);
        assert_eq!(
            field.to_rows(),
            vec![vec![None, None], vec![Some(0.5), None]]
        );
        assert_eq!(field.to_matrix()[(1, 0)], 0.5);
    }

    #[test]
    fn visited_counts_once() {
        let mut v = VisitedSet::new(GridShape::new(2, 3), Cell::new(0, 1));
        assert!(v.is_visited(Cell::new(0, 1)));
        assert_eq!(v.count(), 1);
        v.mark(Cell::new(1, 2));
        v.mark(Cell::new(1, 2));
        assert_eq!(v.count(), 2);
        assert!(!v.is_visited(Cell::new(1, 1)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside field")]
    fn wide_column_does_not_alias_next_row() {
        let field = DistanceField::new(GridShape::new(3, 3), f64::INFINITY);
        let _ = field.get(Cell::new(0, 5));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside visited set")]
    fn visited_rejects_out_of_range_cell() {
        let v = VisitedSet::new(GridShape::new(3, 3), Cell::new(0, 0));
        let _ = v.is_visited(Cell::new(0, 4));
    }
}
