//! Error types for tracing and for cost-matrix loading.

use crate::grid::Cell;

// ── Trace errors ───────────────────────────────────────────────────────────

/// Errors raised while validating inputs or tracing a single frame.
///
/// Every variant is recoverable at the frame level: a batch driver records it
/// and moves on to the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceError {
    /// A referenced cell lies outside the matrix.
    OutOfBounds {
        /// Offending cell.
        cell: Cell,
        /// Matrix row count.
        rows: usize,
        /// Matrix column count.
        cols: usize,
    },
    /// Inputs that admit no meaningful trace (empty matrix, initial == target).
    DegenerateInput(String),
    /// A cost that is negative or not finite.
    InvalidCost {
        /// Cell holding the value.
        cell: Cell,
        /// The rejected value.
        value: f64,
    },
    /// Relaxation ran out of selectable cells before reaching the target.
    Unreachable {
        /// Number of cells finalized before giving up.
        visited: usize,
    },
    /// Backward walk exceeded its step cap or hit a dead end.
    ReconstructionFailed {
        /// Steps taken before the walk was abandoned.
        steps: usize,
    },
    /// Configuration values that cannot be used.
    InvalidConfig(String),
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { cell, rows, cols } => {
                write!(f, "cell {} is outside the {}x{} matrix", cell, rows, cols)
            }
            Self::DegenerateInput(reason) => write!(f, "degenerate input: {}", reason),
            Self::InvalidCost { cell, value } => {
                write!(f, "invalid cost {} at {}: costs must be finite and >= 0", value, cell)
            }
            Self::Unreachable { visited } => {
                write!(f, "target unreachable after finalizing {} cells", visited)
            }
            Self::ReconstructionFailed { steps } => {
                write!(f, "path reconstruction failed after {} steps", steps)
            }
            Self::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for TraceError {}

// ── Load errors ────────────────────────────────────────────────────────────

/// Errors raised by the cost-matrix adapters.
#[derive(Debug)]
pub enum LoadError {
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// A token that is not a number.
    Parse {
        /// 1-based line number in the source text.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A row whose length differs from the first row.
    Ragged {
        /// 1-based line number in the source text.
        line: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count found on this line.
        got: usize,
    },
    /// Source contained no numeric rows.
    Empty,
    /// Parsed values failed matrix validation.
    Matrix(TraceError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {}", e),
            Self::Parse { line, token } => {
                write!(f, "line {}: cannot parse '{}' as a number", line, token)
            }
            Self::Ragged {
                line,
                expected,
                got,
            } => write!(
                f,
                "line {}: expected {} columns, got {}",
                line, expected, got
            ),
            Self::Empty => write!(f, "no numeric rows found"),
            Self::Matrix(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TraceError> for LoadError {
    fn from(e: TraceError) -> Self {
        Self::Matrix(e)
    }
}
