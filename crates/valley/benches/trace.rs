use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use valley::{Cell, CostMatrix, Selection, TraceConfig, Tracer};

/// Noisy field with a cheap band along the middle row, like a filtered frame.
fn synthetic_frame(rows: usize, cols: usize, seed: u64) -> CostMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let valley_row = rows / 2;
    let values: Vec<f64> = (0..rows * cols)
        .map(|i| {
            let row = i / cols;
            let base = 0.04 * (row.abs_diff(valley_row) as f64 + 1.0);
            base + rng.gen_range(0.0..0.02)
        })
        .collect();
    CostMatrix::from_row_slice(rows, cols, &values).expect("valid synthetic frame")
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_selection");
    for &(rows, cols) in &[(30usize, 68usize), (64, 128)] {
        let costs = synthetic_frame(rows, cols, 42);
        let initial = Cell::new(rows / 2, cols - 1);
        let target = Cell::new(rows / 2, 0);
        for selection in [Selection::LinearScan, Selection::BinaryHeap] {
            let tracer = Tracer::new(
                &costs,
                TraceConfig {
                    selection,
                    ..Default::default()
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", selection), format!("{}x{}", rows, cols)),
                &(initial, target),
                |b, &(i, t)| b.iter(|| black_box(tracer.trace(i, t).expect("trace"))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
