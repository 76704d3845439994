//! Backward path recovery over a finalized distance field.

use super::field::DistanceField;
use super::{Reconstruction, Tracer};
use crate::error::TraceError;
use crate::grid::{neighbors, Cell};

impl Tracer<'_> {
    /// Recover the path with the configured [`Reconstruction`] strategy.
    ///
    /// Returns cells in target -> initial order, both endpoints included.
    pub fn reconstruct(
        &self,
        field: &DistanceField,
        initial: Cell,
        target: Cell,
    ) -> Result<Vec<Cell>, TraceError> {
        match self.config.reconstruction {
            Reconstruction::Greedy => self.backtrack(field, initial, target),
            Reconstruction::Predecessor => self.backtrack_predecessors(field, initial, target),
        }
    }

    /// Greedy descent: from the target, step to the neighbor with the smallest
    /// tentative distance until the initial cell is reached.
    ///
    /// Zero-cost plateaus can make the descent cycle, so the walk is capped
    /// (`max_backtrack_steps`, default `rows * cols`) and fails with
    /// [`TraceError::ReconstructionFailed`] past the cap.
    pub fn backtrack(
        &self,
        field: &DistanceField,
        initial: Cell,
        target: Cell,
    ) -> Result<Vec<Cell>, TraceError> {
        let shape = field.shape();
        self.check_field_endpoints(field, initial, target)?;
        let cap = self.step_cap(field);

        let mut path = vec![target];
        let mut current = target;
        let mut steps = 0usize;
        while current != initial {
            if steps >= cap {
                tracing::warn!("greedy backtrack exceeded {} steps at {}", cap, current);
                return Err(TraceError::ReconstructionFailed { steps });
            }
            let mut best = None;
            let mut best_dist = field.unreached_value();
            for n in neighbors(shape, current) {
                let d = field.get(n);
                if d < best_dist {
                    best = Some(n);
                    best_dist = d;
                }
            }
            let Some(next) = best else {
                return Err(TraceError::ReconstructionFailed { steps });
            };
            current = next;
            path.push(next);
            steps += 1;
        }
        Ok(path)
    }

    /// Walk the predecessor links recorded during relaxation.
    pub fn backtrack_predecessors(
        &self,
        field: &DistanceField,
        initial: Cell,
        target: Cell,
    ) -> Result<Vec<Cell>, TraceError> {
        self.check_field_endpoints(field, initial, target)?;
        let cap = self.step_cap(field);

        let mut path = vec![target];
        let mut current = target;
        let mut steps = 0usize;
        while current != initial {
            if steps >= cap {
                return Err(TraceError::ReconstructionFailed { steps });
            }
            let Some(prev) = field.predecessor(current) else {
                return Err(TraceError::ReconstructionFailed { steps });
            };
            current = prev;
            path.push(prev);
            steps += 1;
        }
        Ok(path)
    }

    /// `max_backtrack_steps`, never above `rows * cols`: a longer walk has
    /// revisited a cell and will cycle.
    fn step_cap(&self, field: &DistanceField) -> usize {
        let len = field.shape().len();
        self.config
            .max_backtrack_steps
            .map_or(len, |steps| steps.min(len))
    }

    fn check_field_endpoints(
        &self,
        field: &DistanceField,
        initial: Cell,
        target: Cell,
    ) -> Result<(), TraceError> {
        let shape = field.shape();
        for cell in [initial, target] {
            if !shape.contains(cell) {
                return Err(TraceError::OutOfBounds {
                    cell,
                    rows: shape.rows,
                    cols: shape.cols,
                });
            }
        }
        Ok(())
    }
}
