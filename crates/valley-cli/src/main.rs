//! valley CLI — trace minimum-cost valleys through numeric frame grids.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use valley::{
    trace_batch, trace_frame, BatchSummary, Cell, CostMatrix, EndpointPolicy, Frame,
    FrameConfig, FrameReport, Reconstruction, Selection,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "valley")]
#[command(about = "Trace a minimum-cost 8-connected path through 2-D cost grids")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace one frame and write a JSON report.
    Trace(CliTraceArgs),

    /// Trace many frames; failed frames are reported and skipped.
    Batch(CliBatchArgs),
}

#[derive(Debug, Clone, Args)]
struct CliTraceArgs {
    /// Whitespace-delimited numeric cost grid (one row per line).
    #[arg(long)]
    costs: PathBuf,

    /// Path to write the trace report (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Include the tentative-distance field in the report.
    #[arg(long)]
    with_distances: bool,

    #[command(flatten)]
    frame: CliFrameArgs,
}

#[derive(Debug, Clone, Args)]
struct CliBatchArgs {
    /// Cost grids to trace, one per frame.
    #[arg(long, num_args = 1.., required = true)]
    costs: Vec<PathBuf>,

    /// Path to write the per-frame reports (JSON array).
    #[arg(long)]
    out: PathBuf,

    /// Include tentative-distance fields in the reports.
    #[arg(long)]
    with_distances: bool,

    #[command(flatten)]
    frame: CliFrameArgs,
}

#[derive(Debug, Clone, Args)]
struct CliFrameArgs {
    /// Frame configuration (JSON). Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial cell as `row,col` (default: cheapest right-edge cell).
    #[arg(long)]
    initial: Option<Cell>,

    /// Target cell as `row,col`.
    #[arg(long)]
    target: Option<Cell>,

    /// Trace only the first N rows of each frame.
    #[arg(long, conflicts_with = "all_rows")]
    top_rows: Option<usize>,

    /// Trace the full frame instead of the top rows.
    #[arg(long)]
    all_rows: bool,

    /// Next-cell selection strategy.
    #[arg(long, value_enum)]
    selection: Option<SelectionArg>,

    /// Path reconstruction strategy.
    #[arg(long, value_enum)]
    reconstruction: Option<ReconstructionArg>,

    /// Sentinel distance for unreached cells (default: unbounded).
    #[arg(long)]
    unvisited_distance: Option<f64>,

    /// Cap on backward reconstruction steps (default: rows * cols).
    #[arg(long)]
    max_backtrack_steps: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionArg {
    LinearScan,
    BinaryHeap,
}

impl SelectionArg {
    fn to_core(self) -> Selection {
        match self {
            Self::LinearScan => Selection::LinearScan,
            Self::BinaryHeap => Selection::BinaryHeap,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReconstructionArg {
    Greedy,
    Predecessor,
}

impl ReconstructionArg {
    fn to_core(self) -> Reconstruction {
        match self {
            Self::Greedy => Reconstruction::Greedy,
            Self::Predecessor => Reconstruction::Predecessor,
        }
    }
}

impl CliFrameArgs {
    fn to_config(&self) -> CliResult<FrameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading frame config: {}", path.display());
                FrameConfig::from_json_file(path)?
            }
            None => FrameConfig::default(),
        };

        if let Some(cell) = self.initial {
            config.start = EndpointPolicy::Fixed {
                row: cell.row,
                col: cell.col,
            };
        }
        if let Some(cell) = self.target {
            config.target = EndpointPolicy::Fixed {
                row: cell.row,
                col: cell.col,
            };
        }
        if self.all_rows {
            config.top_rows = None;
        } else if let Some(n) = self.top_rows {
            config.top_rows = Some(n);
        }
        if let Some(s) = self.selection {
            config.trace.selection = s.to_core();
        }
        if let Some(r) = self.reconstruction {
            config.trace.reconstruction = r.to_core();
        }
        if self.unvisited_distance.is_some() {
            config.trace.unvisited_distance = self.unvisited_distance;
        }
        if self.max_backtrack_steps.is_some() {
            config.trace.max_backtrack_steps = self.max_backtrack_steps;
        }

        config.trace.validate()?;
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace(args) => run_trace(&args),
        Commands::Batch(args) => run_batch(&args),
    }
}

fn load_costs(path: &Path) -> CliResult<CostMatrix> {
    CostMatrix::from_text_file(path).map_err(|e| -> CliError {
        format!("Failed to load cost grid {}: {}", path.display(), e).into()
    })
}

fn frame_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── trace ──────────────────────────────────────────────────────────────

fn run_trace(args: &CliTraceArgs) -> CliResult<()> {
    tracing::info!("Opening cost grid: {}", args.costs.display());
    let costs = load_costs(&args.costs)?;
    tracing::info!("Grid size: {}x{}", costs.rows(), costs.cols());

    let config = args.frame.to_config()?;
    let trace = trace_frame(&costs, &config)?;

    tracing::info!(
        "Traced {} -> {}: {} cells, cost {:.4} ({} iterations)",
        trace.initial,
        trace.target,
        trace.path.len(),
        trace.cost,
        trace.stats.iterations,
    );

    let json = serde_json::to_string_pretty(&trace.to_report(args.with_distances))?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Report written to {}", args.out.display());

    Ok(())
}

// ── batch ──────────────────────────────────────────────────────────────

fn run_batch(args: &CliBatchArgs) -> CliResult<()> {
    let config = args.frame.to_config()?;

    // One slot per input path: `Some` for frames that failed to load.
    let mut frames = Vec::with_capacity(args.costs.len());
    let mut unreadable = Vec::with_capacity(args.costs.len());
    for path in &args.costs {
        let name = frame_name(path);
        match CostMatrix::from_text_file(path) {
            Ok(costs) => {
                frames.push(Frame { name, costs });
                unreadable.push(None);
            }
            Err(e) => {
                tracing::warn!("{}: failed to load {} ({})", name, path.display(), e);
                unreadable.push(Some(FrameReport::failed(name, &e)));
            }
        }
    }
    let n_unreadable = unreadable.iter().filter(|slot| slot.is_some()).count();

    let outcomes = trace_batch(&frames, &config);
    let summary = BatchSummary::from_outcomes(&outcomes);
    let reports = in_input_order(
        unreadable,
        outcomes.iter().map(|o| o.to_report(args.with_distances)),
    );

    tracing::info!(
        "{} frames: {} traced, {} failed, {} unreadable",
        args.costs.len(),
        summary.succeeded,
        summary.failed,
        n_unreadable,
    );

    let json = serde_json::to_string_pretty(&reports)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Reports written to {}", args.out.display());

    Ok(())
}

/// Fill the empty slots of `unreadable` with traced reports, in order.
fn in_input_order(
    unreadable: Vec<Option<FrameReport>>,
    mut traced: impl Iterator<Item = FrameReport>,
) -> Vec<FrameReport> {
    unreadable
        .into_iter()
        .filter_map(|slot| slot.or_else(|| traced.next()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str) -> FrameReport {
        FrameReport {
            name: name.to_string(),
            trace: None,
            error: None,
        }
    }

    #[test]
    fn unreadable_frames_keep_their_position() {
        let unreadable = vec![
            None,
            Some(FrameReport::failed(
                "b".to_string(),
                &std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            )),
            None,
            Some(report("d")),
        ];
        let merged = in_input_order(unreadable, vec![report("a"), report("c")].into_iter());
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert!(merged[1].error.is_some());
    }
}
