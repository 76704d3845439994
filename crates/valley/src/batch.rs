//! Batch driver: one independent trace per frame.
//!
//! A failed frame is logged and recorded; the rest of the batch still runs.
//! With the `rayon` feature, frames are traced in parallel and results keep
//! the input order.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::frame::{trace_frame, FrameConfig};
use crate::grid::CostMatrix;
use crate::tracer::{Trace, TraceReport};

/// A named cost matrix.
#[derive(Debug, Clone)]
pub struct Frame {
    pub name: String,
    pub costs: CostMatrix,
}

/// Outcome of tracing one frame.
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub name: String,
    pub result: Result<Trace, TraceError>,
}

impl FrameOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn to_report(&self, include_distances: bool) -> FrameReport {
        match &self.result {
            Ok(trace) => FrameReport {
                name: self.name.clone(),
                trace: Some(trace.to_report(include_distances)),
                error: None,
            },
            Err(e) => FrameReport::failed(self.name.clone(), e),
        }
    }
}

/// JSON form of a [`FrameOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FrameReport {
    /// Report for a frame that never produced a trace.
    pub fn failed(name: String, error: &dyn std::error::Error) -> Self {
        Self {
            name,
            trace: None,
            error: Some(error.to_string()),
        }
    }
}

/// Success/failure counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FrameOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

fn trace_one(frame: &Frame, config: &FrameConfig) -> FrameOutcome {
    let result = trace_frame(&frame.costs, config);
    match &result {
        Ok(trace) => tracing::info!(
            "{}: {} path cells, cost {:.4}",
            frame.name,
            trace.path.len(),
            trace.cost
        ),
        Err(e) => tracing::warn!("{}: skipped ({})", frame.name, e),
    }
    FrameOutcome {
        name: frame.name.clone(),
        result,
    }
}

/// Trace every frame with the same configuration.
pub fn trace_batch(frames: &[Frame], config: &FrameConfig) -> Vec<FrameOutcome> {
    #[cfg(feature = "rayon")]
    let outcomes: Vec<FrameOutcome> = {
        use rayon::prelude::*;
        frames.par_iter().map(|f| trace_one(f, config)).collect()
    };
    #[cfg(not(feature = "rayon"))]
    let outcomes: Vec<FrameOutcome> = frames.iter().map(|f| trace_one(f, config)).collect();

    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        "batch finished: {} traced, {} failed",
        summary.succeeded,
        summary.failed
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::EndpointPolicy;

    fn config() -> FrameConfig {
        FrameConfig {
            top_rows: None,
            start: EndpointPolicy::Fixed { row: 0, col: 0 },
            target: EndpointPolicy::Fixed { row: 2, col: 2 },
            ..Default::default()
        }
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let frames = vec![
            Frame {
                name: "ok".to_string(),
                costs: CostMatrix::uniform(3, 3, 1.0).unwrap(),
            },
            Frame {
                name: "too_small".to_string(),
                costs: CostMatrix::uniform(2, 2, 1.0).unwrap(),
            },
            Frame {
                name: "ok_again".to_string(),
                costs: CostMatrix::uniform(4, 4, 2.0).unwrap(),
            },
        ];
        let outcomes = trace_batch(&frames, &config());
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["ok", "too_small", "ok_again"]);
        assert!(outcomes[0].is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(TraceError::OutOfBounds { .. })
        ));
        assert!(outcomes[2].is_ok());
        assert_eq!(
            BatchSummary::from_outcomes(&outcomes),
            BatchSummary {
                succeeded: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn reports_carry_trace_or_error() {
        let frames = vec![
            Frame {
                name: "a".to_string(),
                costs: CostMatrix::uniform(3, 3, 1.0).unwrap(),
            },
            Frame {
                name: "b".to_string(),
                costs: CostMatrix::uniform(1, 1, 1.0).unwrap(),
            },
        ];
        let outcomes = trace_batch(&frames, &config());
        let ok = outcomes[0].to_report(false);
        assert_eq!(ok.trace.as_ref().map(|t| t.path.len()), Some(3));
        assert!(ok.error.is_none());

        let failed = outcomes[1].to_report(false);
        assert!(failed.trace.is_none());
        let json = serde_json::to_value(&failed).unwrap();
        assert!(json["error"].as_str().unwrap().contains("outside"));
        assert!(json.get("trace").is_none());
    }
}
