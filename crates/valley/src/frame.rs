//! Per-frame tracing: crop, pick endpoints, trace.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::endpoints::EndpointPolicy;
use crate::error::TraceError;
use crate::grid::CostMatrix;
use crate::tracer::{Trace, TraceConfig, Tracer};

const DEFAULT_TOP_ROWS: usize = 30;
const DEFAULT_START_ROW_MARGIN: usize = 10;
const DEFAULT_TARGET_ROW: usize = 19;

/// How one frame's cost matrix is turned into a trace.
///
/// Defaults follow the burner-frame setup: trace through the top 30 rows,
/// start at the cheapest right-edge cell above the last 10 rows, end at
/// `(19, 0)` on the left edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Keep only the first `top_rows` rows before tracing (`None` keeps all).
    pub top_rows: Option<usize>,
    /// Initial cell rule.
    pub start: EndpointPolicy,
    /// Target cell rule.
    pub target: EndpointPolicy,
    /// Tracer settings.
    pub trace: TraceConfig,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            top_rows: Some(DEFAULT_TOP_ROWS),
            start: EndpointPolicy::EdgeMinimum {
                col: -1,
                row_margin: DEFAULT_START_ROW_MARGIN,
            },
            target: EndpointPolicy::Fixed {
                row: DEFAULT_TARGET_ROW,
                col: 0,
            },
            trace: TraceConfig::default(),
        }
    }
}

impl FrameConfig {
    /// Load a frame configuration from a JSON file; missing fields take
    /// their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.trace.validate()?;
        Ok(config)
    }
}

/// Trace one frame according to `config`.
pub fn trace_frame(costs: &CostMatrix, config: &FrameConfig) -> Result<Trace, TraceError> {
    let cropped;
    let costs = match config.top_rows {
        Some(n) if n < costs.rows() => {
            cropped = costs.top_rows(n)?;
            &cropped
        }
        _ => costs,
    };
    let initial = config.start.resolve(costs)?;
    let target = config.target.resolve(costs)?;
    Tracer::new(costs, config.trace.clone()).trace(initial, target)
}
