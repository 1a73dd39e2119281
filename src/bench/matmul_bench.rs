//! Sequential kernel vs. row-partitioned dispatch.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rowmatmul::{Matrix, WorkerCount, multiply_sequential, multiply_with_workers};

fn ramp(rows: usize, cols: usize) -> Matrix<i32> {
    let data = (0..rows * cols).map(|i| (i % 100) as i32 - 50).collect();
    Matrix::from_vec(rows, cols, data).expect("ramp dimensions")
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    group.sample_size(10);

    for size in [64usize, 128, 256] {
        let a = ramp(size, size);
        let b = ramp(size, size);
        group.throughput(Throughput::Elements((2 * size * size * size) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bench, _| {
            bench.iter(|| multiply_sequential(black_box(&a), black_box(&b)))
        });

        for workers in [2usize, 4] {
            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{}", workers), size),
                &size,
                |bench, _| {
                    bench.iter(|| {
                        multiply_with_workers(
                            black_box(&a),
                            black_box(&b),
                            WorkerCount::Fixed(workers),
                        )
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("parallel_auto", size), &size, |bench, _| {
            bench.iter(|| multiply_with_workers(black_box(&a), black_box(&b), WorkerCount::Auto))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matmul);
criterion_main!(benches);
