//! Benchmarks for circuit building and decay fitting
//!
//! Run with: cargo bench -p qcvv-bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qcvv_bench::{IrbExperiment, ResultRow, ResultTable, Variant, fit_and_estimate, reduce};
use qcvv_bench::generator::random_sequence;
use qcvv_ir::Clifford;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Benchmark composing long random sequences
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    let mut rng = StdRng::seed_from_u64(1);

    for depth in &[10, 100, 1000] {
        let sequence = random_sequence(*depth, &mut rng);
        group.bench_with_input(BenchmarkId::new("sequence", depth), &sequence, |b, seq| {
            b.iter(|| reduce(black_box(seq)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark building a full IRB circuit set
fn bench_build_circuits(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_circuits");
    let experiment = IrbExperiment::interleaved(Clifford::X);

    for num_circuits in &[1, 10, 50] {
        group.bench_with_input(
            BenchmarkId::new("irb", num_circuits),
            num_circuits,
            |b, &n| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| {
                    experiment
                        .build_circuits(black_box(n), &[1, 5, 10, 20, 50], &mut rng)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark fitting both decays
fn bench_fit(c: &mut Criterion) {
    let rows: Vec<ResultRow> = (0..50)
        .flat_map(|d| {
            [
                ResultRow::new(d, d + 1, Variant::Plain, 0.99f64.powi(d as i32)),
                ResultRow::new(d, 2 * d + 1, Variant::Interleaved, 0.98f64.powi(d as i32)),
            ]
        })
        .collect();
    let table = ResultTable::from_rows(rows);

    c.bench_function("fit_and_estimate", |b| {
        b.iter(|| fit_and_estimate(black_box(&table), 1, true).unwrap());
    });
}

criterion_group!(benches, bench_reduce, bench_build_circuits, bench_fit);
criterion_main!(benches);
