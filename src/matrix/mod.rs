//! Dense row-major matrix storage.
//!
//! Inputs are `Matrix<i32>`, products are `Matrix<i64>`. Rows are
//! contiguous in one buffer so the output can be split into disjoint
//! per-worker slices with `split_at_mut`.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MatmulError, Result};

/// A rows × cols matrix stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Zero-filled (`T::default()`) matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` elements cannot be allocated; see
    /// [`Matrix::try_zeros`].
    pub fn zeros(rows: usize, cols: usize) -> Self {
        match Self::try_zeros(rows, cols) {
            Ok(m) => m,
            Err(err) => panic!("{}", err),
        }
    }

    /// Zero-filled matrix, or [`MatmulError::TooLarge`] if the cell count
    /// overflows or exceeds what a `Vec<T>` can hold.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = checked_len::<T>(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![T::default(); len],
        })
    }
}

impl<T> Matrix<T> {
    /// Wrap a row-major buffer.
    ///
    /// Fails with [`MatmulError::TooLarge`] if `rows * cols` overflows and
    /// with [`MatmulError::ElementCount`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = checked_len::<T>(rows, cols)?;
        if data.len() != expected {
            return Err(MatmulError::ElementCount {
                rows,
                cols,
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Build from nested rows. Every row must have the length of the first.
    ///
    /// An empty `Vec` yields a 0×0 matrix; use [`Matrix::zeros`] for 0×P.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(MatmulError::RaggedRows {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Matrix {
            rows: n,
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the matrix holds no cells (zero rows or zero columns).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows, "row {} out of bounds ({} rows)", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows && j < self.cols {
            self.data.get(i * self.cols + j)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Matrix<T> {
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

/// Cell count of a rows × cols matrix of `T`, bounded by `isize::MAX` bytes.
fn checked_len<T>(rows: usize, cols: usize) -> Result<usize> {
    let max = isize::MAX as usize / std::mem::size_of::<T>().max(1);
    rows
        .checked_mul(cols)
        .filter(|&len| len <= max)
        .ok_or(MatmulError::TooLarge { rows, cols })
}

/// One line per row, values separated by a single space.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}
