//! Aggregation throughput benchmarks.
//!
//! Run with: `cargo bench --package brickline-bench`

use brickline_bench::synthetic_history;
use brickline_renko::{OutputToggles, replay};
use brickline_types::RenkoConfig;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

fn renko_benchmark(c: &mut Criterion) {
    // 10 pips on a 4-digit symbol
    let config = RenkoConfig::new(Decimal::new(10, 4), 4).expect("valid config");

    let mut group = c.benchmark_group("replay");
    for &bars in &[1_000usize, 10_000, 50_000] {
        let history = synthetic_history(bars);
        group.throughput(Throughput::Elements(bars as u64));
        group.bench_with_input(BenchmarkId::from_parameter(bars), &history, |b, history| {
            b.iter(|| {
                let mut bricks = Vec::new();
                replay(history, config, OutputToggles::all(), &mut bricks)
                    .expect("replay succeeds");
                bricks
            });
        });
    }
    group.finish();
}

criterion_group!(benches, renko_benchmark);
criterion_main!(benches);
