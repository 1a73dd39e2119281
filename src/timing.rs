//! Sequential vs. parallel wall-clock comparison.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::Result;
use crate::kernels::dot_rows::multiply_sequential;
use crate::matrix::Matrix;
use crate::threaded::dispatch::dispatch;
use crate::threaded::partition::WorkerCount;

/// Timings for one problem, computed once on a single thread and once
/// through the dispatcher. `workers` is the number of threads the
/// dispatcher actually spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingReport {
    pub n: usize,
    pub m: usize,
    pub p: usize,
    pub workers: usize,
    pub sequential: Duration,
    pub parallel: Duration,
}

impl TimingReport {
    /// `sequential / parallel`.
    ///
    /// 1.0 when both runs measured zero, infinite when only the parallel
    /// run did.
    pub fn speedup(&self) -> f64 {
        if self.parallel.is_zero() {
            return if self.sequential.is_zero() {
                1.0
            } else {
                f64::INFINITY
            };
        }
        self.sequential.as_secs_f64() / self.parallel.as_secs_f64()
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Performance Results")?;
        writeln!(f, "-------------------")?;
        writeln!(
            f,
            "Matrix size: {} x {} * {} x {}",
            self.n, self.m, self.m, self.p
        )?;
        writeln!(f, "Workers            : {}", self.workers)?;
        writeln!(
            f,
            "Single-thread time : {:.6} seconds",
            self.sequential.as_secs_f64()
        )?;
        writeln!(
            f,
            "Multi-thread time  : {:.6} seconds",
            self.parallel.as_secs_f64()
        )?;
        write!(f, "Speedup            : {:.2}x", self.speedup())
    }
}

/// Run both paths and time them. Returns the report and the parallel
/// product.
///
/// The two products are compared; a difference would be a dispatcher bug
/// and is reported with `debug_assert!`.
pub fn compare(
    a: &Matrix<i32>,
    b: &Matrix<i32>,
    workers: WorkerCount,
) -> Result<(TimingReport, Matrix<i64>)> {
    let start = Instant::now();
    let single = multiply_sequential(a, b)?;
    let sequential = start.elapsed();

    let start = Instant::now();
    let (multi, spawned) = dispatch(a, b, workers)?;
    let parallel = start.elapsed();

    debug_assert_eq!(single, multi, "parallel product differs from sequential");

    let report = TimingReport {
        n: a.rows(),
        m: a.cols(),
        p: b.cols(),
        workers: spawned,
        sequential,
        parallel,
    };
    info!(
        sequential_ms = sequential.as_secs_f64() * 1000.0,
        parallel_ms = parallel.as_secs_f64() * 1000.0,
        speedup = report.speedup(),
        "timing complete"
    );

    Ok((report, multi))
}
