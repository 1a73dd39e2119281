//! Scoped-thread dispatcher.

use std::any::Any;
use std::thread;

use tracing::debug;

use crate::error::{MatmulError, Result};
use crate::kernels::dot_rows::{check_dimensions, compute_rows};
use crate::matrix::Matrix;
use crate::threaded::partition::{RowRange, WorkerCount, assign_rows, is_exact_partition};

/// Multiply `A × B` with one thread per row range.
///
/// The worker count comes from `workers`, clamped to `A.rows()`. C is
/// allocated zero-filled, its buffer is split into one disjoint mutable
/// slice per worker, and every worker is joined before this returns. A
/// dimension mismatch is reported before any thread is spawned.
///
/// # Example
///
/// ```
/// use rowmatmul::{Matrix, WorkerCount, multiply_with_workers};
///
/// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
///
/// let c = multiply_with_workers(&a, &b, WorkerCount::Fixed(2)).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
/// ```
pub fn multiply_with_workers(
    a: &Matrix<i32>,
    b: &Matrix<i32>,
    workers: WorkerCount,
) -> Result<Matrix<i64>> {
    dispatch(a, b, workers).map(|(c, _)| c)
}

/// [`multiply_with_workers`], also returning how many workers were spawned.
///
/// Fails with [`MatmulError::TooLarge`] before spawning if C cannot be
/// allocated.
pub(crate) fn dispatch(
    a: &Matrix<i32>,
    b: &Matrix<i32>,
    workers: WorkerCount,
) -> Result<(Matrix<i64>, usize)> {
    check_dimensions(a, b)?;

    let mut c = Matrix::try_zeros(a.rows(), b.cols())?;

    // 0 x P and N x 0 results have nothing to compute.
    if c.is_empty() {
        return Ok((c, 0));
    }

    let ranges = assign_rows(a.rows(), workers);
    let spawned = run_workers(a, b, c.as_mut_slice(), &ranges)?;
    Ok((c, spawned))
}

/// Spawn one scoped thread per range and join them all.
///
/// Returns the number of workers spawned. The first worker failure (kernel
/// error or panic) is returned only after every worker has been joined.
fn run_workers(
    a: &Matrix<i32>,
    b: &Matrix<i32>,
    out: &mut [i64],
    ranges: &[RowRange],
) -> Result<usize> {
    if !is_exact_partition(ranges, a.rows()) {
        let (start, end) = match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0, 0),
        };
        return Err(MatmulError::InvalidRowRange {
            start,
            end,
            rows: a.rows(),
        });
    }

    let p = b.cols();
    let expected = a.rows().checked_mul(p).ok_or(MatmulError::TooLarge {
        rows: a.rows(),
        cols: p,
    })?;
    if out.len() != expected {
        return Err(MatmulError::OutputSizeMismatch {
            expected,
            got: out.len(),
        });
    }

    thread::scope(|s| {
        let mut rest = out;
        let mut handles = Vec::with_capacity(ranges.len());

        for (worker, &range) in ranges.iter().enumerate() {
            let (owned, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * p);
            rest = tail;

            let handle = s.spawn(move || {
                debug!(
                    worker,
                    start = range.start,
                    end = range.end,
                    "worker handling rows"
                );
                compute_rows(a, b, owned, range.start, range.end)
            });
            handles.push((worker, handle));
        }

        let spawned = handles.len();
        let mut first_err = None;
        for (worker, handle) in handles {
            let outcome = handle.join().unwrap_or_else(|payload| {
                Err(MatmulError::WorkerPanicked {
                    worker,
                    message: panic_message(&*payload),
                })
            });
            if let Err(err) = outcome {
                first_err.get_or_insert(err);
            }
        }

        debug!(workers = spawned, "all workers joined");
        match first_err {
            Some(err) => Err(err),
            None => Ok(spawned),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::dot_rows::multiply_sequential;
    use crate::threaded::partition::split_rows;

    fn ramp(rows: usize, cols: usize, modulus: i32) -> Matrix<i32> {
        let data = (0..rows * cols).map(|i| (i as i32 % modulus) - modulus / 2).collect();
        Matrix::from_vec(rows, cols, data).unwrap()
    }

    #[test]
    fn test_concrete_scenario_one_and_two_workers() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
        let expected = vec![vec![19i64, 22], vec![43, 50]];

        for workers in [1, 2] {
            let c = multiply_with_workers(&a, &b, WorkerCount::Fixed(workers)).unwrap();
            assert_eq!(c.to_rows(), expected, "workers={}", workers);
        }
    }

    #[test]
    fn test_run_workers_spawns_one_per_range() {
        let a = ramp(10, 4, 7);
        let b = ramp(4, 3, 5);
        let ranges = split_rows(10, 4);
        let mut out = vec![0i64; 30];

        let spawned = run_workers(&a, &b, &mut out, &ranges).unwrap();
        assert_eq!(spawned, 4);
        assert_eq!(out, multiply_sequential(&a, &b).unwrap().into_vec());
    }

    #[test]
    fn test_run_workers_zero_rows_spawns_none() {
        let a: Matrix<i32> = Matrix::zeros(0, 3);
        let b = ramp(3, 2, 5);
        let mut out: Vec<i64> = Vec::new();
        assert_eq!(run_workers(&a, &b, &mut out, &[]).unwrap(), 0);
    }

    #[test]
    fn test_run_workers_rejects_overlapping_ranges() {
        let a = ramp(4, 2, 3);
        let b = ramp(2, 2, 3);
        let mut out = vec![0i64; 8];
        let ranges = [RowRange::new(0, 3), RowRange::new(2, 4)];
        assert!(matches!(
            run_workers(&a, &b, &mut out, &ranges),
            Err(MatmulError::InvalidRowRange { .. })
        ));
    }

    #[test]
    fn test_worker_failure_surfaces_after_join() {
        // Bypass the up-front check so every worker hits the kernel's own
        // dimension check.
        let a = ramp(6, 3, 4);
        let b = ramp(2, 2, 4);
        let mut out = vec![0i64; 12];
        let ranges = split_rows(6, 3);
        assert!(matches!(
            run_workers(&a, &b, &mut out, &ranges),
            Err(MatmulError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch_before_dispatch() {
        let a = ramp(3, 2, 5);
        let b = ramp(3, 2, 5);
        let err = multiply_with_workers(&a, &b, WorkerCount::Fixed(2)).unwrap_err();
        assert!(matches!(
            err,
            MatmulError::DimensionMismatch {
                a_rows: 3,
                a_cols: 2,
                b_rows: 3,
                b_cols: 2
            }
        ));
    }

    #[test]
    fn test_degenerate_shapes() {
        let empty_a: Matrix<i32> = Matrix::zeros(0, 3);
        let c = multiply_with_workers(&empty_a, &ramp(3, 4, 5), WorkerCount::Auto).unwrap();
        assert_eq!(c.shape(), (0, 4));

        let empty_b: Matrix<i32> = Matrix::zeros(2, 0);
        let c = multiply_with_workers(&ramp(3, 2, 5), &empty_b, WorkerCount::Auto).unwrap();
        assert_eq!(c.shape(), (3, 0));

        let a: Matrix<i32> = Matrix::zeros(3, 0);
        let b: Matrix<i32> = Matrix::zeros(0, 4);
        let c = multiply_with_workers(&a, &b, WorkerCount::Auto).unwrap();
        assert_eq!(c, Matrix::zeros(3, 4));
    }

    #[test]
    fn test_dispatch_spawn_counts() {
        let empty_a: Matrix<i32> = Matrix::zeros(0, 3);
        let (_, spawned) = dispatch(&empty_a, &ramp(3, 4, 5), WorkerCount::Fixed(4)).unwrap();
        assert_eq!(spawned, 0);

        let empty_b: Matrix<i32> = Matrix::zeros(2, 0);
        let (c, spawned) = dispatch(&ramp(5, 2, 5), &empty_b, WorkerCount::Fixed(4)).unwrap();
        assert_eq!(c.shape(), (5, 0));
        assert_eq!(spawned, 0);

        // N=3 with 8 requested workers spawns exactly 3
        let (_, spawned) = dispatch(&ramp(3, 2, 5), &ramp(2, 2, 5), WorkerCount::Fixed(8)).unwrap();
        assert_eq!(spawned, 3);

        let (_, spawned) = dispatch(&ramp(10, 2, 5), &ramp(2, 2, 5), WorkerCount::Fixed(4)).unwrap();
        assert_eq!(spawned, 4);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_output_rejected_before_spawn() {
        let a: Matrix<i32> = Matrix::zeros(1 << 32, 0);
        let b: Matrix<i32> = Matrix::zeros(0, 1 << 32);
        assert!(matches!(
            multiply_with_workers(&a, &b, WorkerCount::Auto),
            Err(MatmulError::TooLarge {
                rows: 4294967296,
                cols: 4294967296
            })
        ));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*payload), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(&*payload), "unknown panic payload");
    }
}
