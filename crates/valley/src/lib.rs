//! valley — minimum-cost valley tracing through 2-D cost fields.
//!
//! Frames from scientific imaging are reduced (outside this crate) to a cost
//! matrix whose low-cost "valley" marks the feature of interest. The crate
//! traces one continuous 8-connected path through that valley:
//!
//! 1. **Grid** – cost matrix, cells and the 8-connected neighborhood.
//! 2. **Tracer** – forward relaxation with linear-scan (or heap) selection,
//!    then backward reconstruction from the target.
//! 3. **Frame** – cropping and endpoint selection for one frame.
//! 4. **Batch** – independent traces over many frames, failures recorded
//!    per frame.
//!
//! # Public API
//! - [`CostMatrix`], [`Cell`] and the [`neighbors`] rule
//! - [`Tracer`] with [`TraceConfig`], producing a [`Trace`]
//! - [`trace_frame`] / [`trace_batch`] for frame-level drivers

mod batch;
mod endpoints;
mod error;
mod frame;
mod grid;
mod tracer;

pub use batch::{trace_batch, BatchSummary, Frame, FrameOutcome, FrameReport};
pub use endpoints::{edge_minimum, EndpointPolicy};
pub use error::{LoadError, TraceError};
pub use frame::{trace_frame, FrameConfig};
pub use grid::{neighbors, Cell, CostMatrix, GridShape};
pub use tracer::{
    DistanceField, Reconstruction, RunStats, Selection, Trace, TraceConfig, TraceReport, Tracer,
    VisitedSet,
};
