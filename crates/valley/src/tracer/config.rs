use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// How relaxation picks the next cell to finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Scan every unvisited cell in row-major order; first minimum wins.
    #[default]
    LinearScan,
    /// Lazy-deletion min-heap keyed by `(distance, row-major index)`.
    ///
    /// Resolves ties exactly like [`Selection::LinearScan`], so fields and
    /// paths are identical; only the selection cost changes.
    BinaryHeap,
}

/// How the path is recovered once the target is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconstruction {
    /// Walk from the target to the neighbor with the smallest tentative
    /// distance until the initial cell is reached.
    #[default]
    Greedy,
    /// Follow the predecessor recorded for each cell during relaxation.
    Predecessor,
}

/// Tracer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Next-cell selection strategy.
    pub selection: Selection,
    /// Path recovery strategy.
    pub reconstruction: Reconstruction,
    /// Tentative distance of cells not reached yet.
    ///
    /// `None` means unbounded. A finite value must exceed every achievable
    /// accumulated cost; cells whose best candidate does not beat it are
    /// treated as unreachable.
    pub unvisited_distance: Option<f64>,
    /// Cap on backward steps. Defaults to `rows * cols`; larger values are
    /// clamped to it.
    pub max_backtrack_steps: Option<usize>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            selection: Selection::LinearScan,
            reconstruction: Reconstruction::Greedy,
            unvisited_distance: None,
            max_backtrack_steps: None,
        }
    }
}

impl TraceConfig {
    /// Sentinel distance for unreached cells.
    pub fn unreached(&self) -> f64 {
        self.unvisited_distance.unwrap_or(f64::INFINITY)
    }

    pub fn validate(&self) -> Result<(), TraceError> {
        if let Some(d) = self.unvisited_distance {
            if !d.is_finite() || d <= 0.0 {
                return Err(TraceError::InvalidConfig(format!(
                    "unvisited_distance must be finite and > 0, got {}",
                    d
                )));
            }
        }
        if self.max_backtrack_steps == Some(0) {
            return Err(TraceError::InvalidConfig(
                "max_backtrack_steps must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
