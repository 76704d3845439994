//! Choosing the initial and target cells of a frame.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::grid::{Cell, CostMatrix};

/// Rule that picks an endpoint cell for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EndpointPolicy {
    /// A fixed cell.
    Fixed { row: usize, col: usize },
    /// Lowest-cost cell of one column.
    ///
    /// Negative `col` counts from the right edge (`-1` is the last column).
    /// The last `row_margin` rows are excluded from the search.
    EdgeMinimum { col: isize, row_margin: usize },
}

impl EndpointPolicy {
    pub fn resolve(&self, costs: &CostMatrix) -> Result<Cell, TraceError> {
        match *self {
            Self::Fixed { row, col } => {
                let cell = Cell::new(row, col);
                costs.check_bounds(cell)?;
                Ok(cell)
            }
            Self::EdgeMinimum { col, row_margin } => {
                let n_cols = costs.cols() as isize;
                let resolved = if col < 0 { n_cols + col } else { col };
                if resolved < 0 || resolved >= n_cols {
                    return Err(TraceError::InvalidConfig(format!(
                        "column {} is outside a matrix with {} columns",
                        col, n_cols
                    )));
                }
                let end = costs.rows().saturating_sub(row_margin);
                edge_minimum(costs, resolved as usize, 0..end)
            }
        }
    }
}

/// Cell of column `col` within `rows` holding the smallest cost.
///
/// The first minimum in row order wins.
pub fn edge_minimum(costs: &CostMatrix, col: usize, rows: Range<usize>) -> Result<Cell, TraceError> {
    let rows = rows.start..rows.end.min(costs.rows());
    if rows.is_empty() {
        return Err(TraceError::DegenerateInput(format!(
            "empty row range {:?} for edge search",
            rows
        )));
    }
    costs.check_bounds(Cell::new(rows.start, col))?;

    let mut best = Cell::new(rows.start, col);
    let mut best_cost = costs.cost(best);
    for row in rows.skip(1) {
        let c = Cell::new(row, col);
        let v = costs.cost(c);
        if v < best_cost {
            best = c;
            best_cost = v;
        }
    }
    Ok(best)
}
