//! Error type shared by the kernel, the dispatcher and the text I/O layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatmulError {
    #[error("dimension mismatch: [{a_rows}x{a_cols}] * [{b_rows}x{b_cols}]")]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },
    #[error("invalid row range {start}..{end} for a matrix with {rows} rows")]
    InvalidRowRange { start: usize, end: usize, rows: usize },
    #[error("output slice holds {got} cells, expected {expected}")]
    OutputSizeMismatch { expected: usize, got: usize },
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows { row: usize, expected: usize, got: usize },
    #[error("{rows}x{cols} matrix needs {expected} elements, got {got}")]
    ElementCount {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },
    #[error("{rows}x{cols} matrix is too large to allocate")]
    TooLarge { rows: usize, cols: usize },
    #[error("worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatmulError>;
