//! Row-partitioned multi-threaded integer matrix multiplication.
//!
//! The output rows of C = A × B are split into contiguous ranges, one per
//! worker thread. Each worker runs the same triple-loop kernel over its
//! range and writes into a slice of C it owns exclusively, so there is no
//! locking in the hot path. All workers are joined before the product is
//! returned.
//!
//! ## Usage
//!
//! ```
//! use rowmatmul::{Matrix, multiply};
//!
//! let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//!
//! let c = multiply(&a, &b).unwrap();
//! assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
//! ```
//!
//! To pin the number of workers:
//!
//! ```
//! use rowmatmul::{Matrix, WorkerCount, multiply_with_workers};
//!
//! let a = Matrix::from_vec(3, 1, vec![1, 2, 3]).unwrap();
//! let b = Matrix::from_vec(1, 2, vec![10, 20]).unwrap();
//!
//! let c = multiply_with_workers(&a, &b, WorkerCount::Fixed(8)).unwrap();
//! assert_eq!(c.row(2), &[30i64, 60]);
//! ```
//!
//! ## Arithmetic
//!
//! Inputs are `i32`. Products and sums are computed in `i64` with wrapping
//! addition; a single product of two `i32` values cannot overflow `i64`.

pub mod error;
pub mod io;
pub mod kernels;
pub mod matrix;
pub mod threaded;
pub mod timing;

pub use error::{MatmulError, Result};
pub use kernels::dot_rows::{compute_rows, multiply_sequential};
pub use matrix::Matrix;
pub use threaded::dispatch::multiply_with_workers;
pub use threaded::partition::{RowRange, WorkerCount};

/// Multiply `A × B` using the platform's available parallelism.
///
/// Falls back to 4 workers when the platform cannot report it, and never
/// uses more workers than A has rows.
///
/// # Errors
///
/// [`MatmulError::DimensionMismatch`] if `B.rows() != A.cols()`; no worker
/// is started in that case.
pub fn multiply(a: &Matrix<i32>, b: &Matrix<i32>) -> Result<Matrix<i64>> {
    multiply_with_workers(a, b, WorkerCount::Auto)
}
