//! Triple-loop kernel over a half-open row range.

use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;

/// Compute rows `start..end` of `A × B` into `c_rows`.
///
/// `c_rows` holds exactly those rows of C, row-major, so its length must be
/// `(end - start) * B.cols()`. Every cell is overwritten.
///
/// Elements are widened to `i64` before multiplying and summed with
/// wrapping addition, so overflow behavior does not depend on the build
/// profile.
///
/// # Errors
///
/// - [`MatmulError::DimensionMismatch`] if `B.rows() != A.cols()`
/// - [`MatmulError::InvalidRowRange`] if `start > end` or `end > A.rows()`
/// - [`MatmulError::OutputSizeMismatch`] if `c_rows` has the wrong length
/// - [`MatmulError::TooLarge`] if the range's cell count overflows `usize`
///
/// # Example
///
/// ```
/// use rowmatmul::{Matrix, compute_rows};
///
/// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
///
/// // only the second row
/// let mut row = vec![0i64; 2];
/// compute_rows(&a, &b, &mut row, 1, 2).unwrap();
/// assert_eq!(row, vec![43, 50]);
/// ```
pub fn compute_rows(
    a: &Matrix<i32>,
    b: &Matrix<i32>,
    c_rows: &mut [i64],
    start: usize,
    end: usize,
) -> Result<()> {
    check_dimensions(a, b)?;

    if start > end || end > a.rows() {
        return Err(MatmulError::InvalidRowRange {
            start,
            end,
            rows: a.rows(),
        });
    }

    let p = b.cols();
    let expected = (end - start)
        .checked_mul(p)
        .ok_or(MatmulError::TooLarge {
            rows: end - start,
            cols: p,
        })?;
    if c_rows.len() != expected {
        return Err(MatmulError::OutputSizeMismatch {
            expected,
            got: c_rows.len(),
        });
    }

    // Nothing to write, and chunks_exact_mut(0) would panic.
    if p == 0 {
        return Ok(());
    }

    for (i, out_row) in (start..end).zip(c_rows.chunks_exact_mut(p)) {
        let a_row = a.row(i);
        for (j, cell) in out_row.iter_mut().enumerate() {
            let mut sum: i64 = 0;
            for (k, &a_ik) in a_row.iter().enumerate() {
                sum = sum.wrapping_add(i64::from(a_ik) * i64::from(b[(k, j)]));
            }
            *cell = sum;
        }
    }

    Ok(())
}

/// Single-threaded product: one kernel call over `0..A.rows()`.
pub fn multiply_sequential(a: &Matrix<i32>, b: &Matrix<i32>) -> Result<Matrix<i64>> {
    check_dimensions(a, b)?;
    let mut c = Matrix::try_zeros(a.rows(), b.cols())?;
    compute_rows(a, b, c.as_mut_slice(), 0, a.rows())?;
    Ok(c)
}

/// `B.rows()` must equal `A.cols()`.
pub(crate) fn check_dimensions(a: &Matrix<i32>, b: &Matrix<i32>) -> Result<()> {
    if b.rows() != a.cols() {
        return Err(MatmulError::DimensionMismatch {
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        });
    }
    Ok(())
}
