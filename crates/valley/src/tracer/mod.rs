//! Grid shortest-path engine.
//!
//! A trace runs in two strictly sequential stages over one cost matrix:
//!
//! 1. **Relaxation** ([`Tracer::run`]) finalizes cells in order of tentative
//!    distance, relaxing the unvisited 8-neighbors of each, until the target
//!    is selected.
//! 2. **Reconstruction** ([`Tracer::backtrack`]) walks back from the target to
//!    the initial cell over the finalized distances.
//!
//! Costs are node-weighted: a path costs the sum of the cells it enters,
//! including the initial cell.

mod config;
mod field;
mod reconstruct;
mod relax;


pub use config::{Reconstruction, Selection, TraceConfig};
pub use field::{DistanceField, VisitedSet};

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::grid::{Cell, CostMatrix};

/// Counters from one relaxation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Cells relaxed (including the initial cell).
    pub iterations: usize,
    /// Cells finalized when the run ended.
    pub visited: usize,
}

/// Shortest-path tracer bound to one cost matrix.
#[derive(Debug, Clone)]
pub struct Tracer<'a> {
    costs: &'a CostMatrix,
    config: TraceConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(costs: &'a CostMatrix, config: TraceConfig) -> Self {
        Self { costs, config }
    }

    pub fn costs(&self) -> &CostMatrix {
        self.costs
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Fresh search state for a trace starting at `initial`.
    pub fn init_state(&self, initial: Cell) -> Result<(DistanceField, VisitedSet), TraceError> {
        self.costs.check_bounds(initial)?;
        let shape = self.costs.shape();
        let mut field = DistanceField::new(shape, self.config.unreached());
        field.seed(initial, self.costs.cost(initial));
        Ok((field, VisitedSet::new(shape, initial)))
    }

    /// Trace the minimum-cost path from `initial` to `target`.
    ///
    /// The returned path runs initial -> target.
    pub fn trace(&self, initial: Cell, target: Cell) -> Result<Trace, TraceError> {
        self.config.validate()?;
        self.check_endpoints(initial, target)?;

        let (mut field, mut visited) = self.init_state(initial)?;
        let stats = self.run(initial, target, &mut field, &mut visited)?;
        let mut path = self.reconstruct(&field, initial, target)?;
        path.reverse();
        let cost = self.costs.path_cost(&path);

        tracing::debug!(
            "traced {} -> {}: {} cells, cost {:.4}, {} iterations",
            initial,
            target,
            path.len(),
            cost,
            stats.iterations
        );

        Ok(Trace {
            initial,
            target,
            path,
            cost,
            distances: field,
            stats,
        })
    }

    fn check_endpoints(&self, initial: Cell, target: Cell) -> Result<(), TraceError> {
        self.costs.check_bounds(initial)?;
        self.costs.check_bounds(target)?;
        if initial == target {
            return Err(TraceError::DegenerateInput(format!(
                "initial and target are the same cell {}",
                initial
            )));
        }
        Ok(())
    }
}

/// Result of a completed trace.
#[derive(Debug, Clone)]
pub struct Trace {
    pub initial: Cell,
    pub target: Cell,
    /// Cells from initial to target.
    pub path: Vec<Cell>,
    /// Sum of cell costs along `path`.
    pub cost: f64,
    /// Final tentative distances, kept for diagnostics and plotting.
    pub distances: DistanceField,
    pub stats: RunStats,
}

impl Trace {
    /// Row coordinate of each path cell.
    pub fn path_rows(&self) -> Vec<usize> {
        self.path.iter().map(|c| c.row).collect()
    }

    /// Column coordinate of each path cell.
    pub fn path_cols(&self) -> Vec<usize> {
        self.path.iter().map(|c| c.col).collect()
    }

    /// Serializable summary; the distance field is included on request.
    pub fn to_report(&self, include_distances: bool) -> TraceReport {
        let shape = self.distances.shape();
        TraceReport {
            rows: shape.rows,
            cols: shape.cols,
            initial: self.initial,
            target: self.target,
            path: self.path.clone(),
            cost: self.cost,
            iterations: self.stats.iterations,
            visited: self.stats.visited,
            distances: include_distances.then(|| self.distances.to_rows()),
        }
    }
}

/// JSON form of a [`Trace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    pub rows: usize,
    pub cols: usize,
    pub initial: Cell,
    pub target: Cell,
    pub path: Vec<Cell>,
    pub cost: f64,
    pub iterations: usize,
    pub visited: usize,
    /// Tentative distances, `null` for cells never reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}
