//! Forward relaxation: finalize cells in order of tentative distance until the
//! target is reached.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::field::{DistanceField, VisitedSet};
use super::{RunStats, Selection, Tracer};
use crate::error::TraceError;
use crate::grid::{neighbors, Cell};

impl Tracer<'_> {
    /// Relax outward from `initial` until `target` is selected.
    ///
    /// `field` must already hold the initial cell's own cost and `visited`
    /// must have the initial cell marked. Only `field` and `visited` are
    /// mutated.
    pub fn run(
        &self,
        initial: Cell,
        target: Cell,
        field: &mut DistanceField,
        visited: &mut VisitedSet,
    ) -> Result<RunStats, TraceError> {
        self.run_with(initial, target, field, visited, |_, _| {})
    }

    /// Like [`Tracer::run`], calling `on_finalize(cell, field)` after each
    /// cell is relaxed and marked visited.
    pub fn run_with<F>(
        &self,
        initial: Cell,
        target: Cell,
        field: &mut DistanceField,
        visited: &mut VisitedSet,
        mut on_finalize: F,
    ) -> Result<RunStats, TraceError>
    where
        F: FnMut(Cell, &DistanceField),
    {
        self.check_endpoints(initial, target)?;
        let shape = self.costs.shape();
        if field.shape() != shape || visited.shape() != shape {
            return Err(TraceError::DegenerateInput(format!(
                "search state is {}x{}, cost matrix is {}x{}",
                field.shape().rows,
                field.shape().cols,
                shape.rows,
                shape.cols
            )));
        }
        if !visited.is_visited(initial) || field.get(initial) != self.costs.cost(initial) {
            return Err(TraceError::DegenerateInput(format!(
                "search state is not seeded at initial cell {}",
                initial
            )));
        }

        let mut selector = Selector::new(self.config.selection, field, visited);
        let mut current = initial;
        let mut iterations = 0usize;

        while current != target {
            let base = field.get(current);
            for n in neighbors(shape, current) {
                if visited.is_visited(n) {
                    continue;
                }
                let candidate = base + self.costs.cost(n);
                if field.relax(n, candidate, current) {
                    selector.push(shape.index(n), candidate);
                }
            }
            visited.mark(current);
            iterations += 1;
            on_finalize(current, &*field);

            let Some(next) = selector.next(field, visited) else {
                tracing::debug!(
                    "no selectable cell left after {} iterations; target {} unreachable",
                    iterations,
                    target
                );
                return Err(TraceError::Unreachable {
                    visited: visited.count(),
                });
            };
            current = shape.cell(next);
            tracing::trace!("selected {} at distance {}", current, field.get(current));
        }

        Ok(RunStats {
            iterations,
            visited: visited.count(),
        })
    }
}

/// Next-cell selection, by linear scan or by lazy-deletion heap.
enum Selector {
    LinearScan,
    Heap(BinaryHeap<Reverse<HeapEntry>>),
}

impl Selector {
    fn new(selection: Selection, field: &DistanceField, visited: &VisitedSet) -> Self {
        match selection {
            Selection::LinearScan => Self::LinearScan,
            Selection::BinaryHeap => {
                let heap = (0..field.shape().len())
                    .filter(|&i| {
                        !visited.is_visited_index(i)
                            && field.get_index(i) < field.unreached_value()
                    })
                    .map(|i| {
                        Reverse(HeapEntry {
                            dist: field.get_index(i),
                            index: i,
                        })
                    })
                    .collect();
                Self::Heap(heap)
            }
        }
    }

    fn push(&mut self, index: usize, dist: f64) {
        if let Self::Heap(heap) = self {
            heap.push(Reverse(HeapEntry { dist, index }));
        }
    }

    /// Unvisited cell with the smallest distance below the sentinel; the
    /// lowest row-major index wins ties.
    fn next(&mut self, field: &DistanceField, visited: &VisitedSet) -> Option<usize> {
        match self {
            Self::LinearScan => {
                let mut best = None;
                let mut best_dist = field.unreached_value();
                for i in 0..field.shape().len() {
                    if visited.is_visited_index(i) {
                        continue;
                    }
                    let d = field.get_index(i);
                    if d < best_dist {
                        best = Some(i);
                        best_dist = d;
                    }
                }
                best
            }
            Self::Heap(heap) => {
                while let Some(Reverse(entry)) = heap.pop() {
                    let stale = visited.is_visited_index(entry.index)
                        || field.get_index(entry.index) != entry.dist;
                    if !stale {
                        return Some(entry.index);
                    }
                }
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist: f64,
    index: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.index.cmp(&other.index))
    }
}
