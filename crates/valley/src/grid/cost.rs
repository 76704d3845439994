use nalgebra::DMatrix;

use super::{Cell, GridShape};
use crate::error::TraceError;

/// Immutable rectangular grid of non-negative, finite cell costs.
///
/// Cost is attached to cells: entering a cell adds its cost to the path.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: DMatrix<f64>,
}

impl CostMatrix {
    /// Wrap an existing matrix after validating shape and values.
    ///
    /// `-0.0` is stored as `0.0` so that distance ordering never depends on
    /// the sign of zero.
    pub fn new(mut data: DMatrix<f64>) -> Result<Self, TraceError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(TraceError::DegenerateInput(format!(
                "cost matrix is {}x{}",
                data.nrows(),
                data.ncols()
            )));
        }
        for row in 0..data.nrows() {
            for col in 0..data.ncols() {
                let value = data[(row, col)];
                if !value.is_finite() || value < 0.0 {
                    return Err(TraceError::InvalidCost {
                        cell: Cell::new(row, col),
                        value,
                    });
                }
            }
        }
        data.apply(|v| *v += 0.0);
        Ok(Self { data })
    }

    /// Build from row-major values.
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Self, TraceError> {
        if values.len() != rows * cols {
            return Err(TraceError::DegenerateInput(format!(
                "{} values do not fill a {}x{} matrix",
                values.len(),
                rows,
                cols
            )));
        }
        Self::new(DMatrix::from_row_slice(rows, cols, values))
    }

    /// Build from nested rows; all rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, TraceError> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != n_cols) {
            return Err(TraceError::DegenerateInput(format!(
                "row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                n_cols
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::from_row_slice(rows.len(), n_cols, &flat)
    }

    /// Matrix filled with a single cost.
    pub fn uniform(rows: usize, cols: usize, cost: f64) -> Result<Self, TraceError> {
        Self::new(DMatrix::from_element(rows, cols, cost))
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.data.nrows(), self.data.ncols())
    }

    /// Cost of `cell`. Panics if `cell` is out of bounds.
    #[inline]
    pub fn cost(&self, cell: Cell) -> f64 {
        self.data[(cell.row, cell.col)]
    }

    /// Cost of `cell`, or `None` when out of bounds.
    pub fn get(&self, cell: Cell) -> Option<f64> {
        self.data.get((cell.row, cell.col)).copied()
    }

    /// Sum of cell costs along `path` (node-weighted path cost).
    pub fn path_cost(&self, path: &[Cell]) -> f64 {
        path.iter().map(|&c| self.cost(c)).sum()
    }

    /// Reject cells outside the matrix.
    pub fn check_bounds(&self, cell: Cell) -> Result<(), TraceError> {
        if self.shape().contains(cell) {
            Ok(())
        } else {
            Err(TraceError::OutOfBounds {
                cell,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// Crop to the first `n` rows (all rows when `n >= rows`).
    pub fn top_rows(&self, n: usize) -> Result<Self, TraceError> {
        let n = n.min(self.rows());
        Self::new(self.data.rows(0, n).clone_owned())
    }

    /// Underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }
}
