//! Worker sizing and row splitting.

use std::thread;

use tracing::{debug, warn};

/// Worker count used when the platform cannot report its parallelism.
pub const DEFAULT_WORKERS: usize = 4;

/// How many workers a multiplication may use before clamping to the row
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerCount {
    /// Ask the platform via [`std::thread::available_parallelism`].
    #[default]
    Auto,
    /// Fixed upper bound. Zero means [`DEFAULT_WORKERS`].
    Fixed(usize),
}

impl WorkerCount {
    /// Unclamped worker count. Never zero.
    pub fn hint(self) -> usize {
        match self {
            WorkerCount::Auto => match thread::available_parallelism() {
                Ok(n) => n.get(),
                Err(err) => {
                    warn!(%err, fallback = DEFAULT_WORKERS, "available parallelism unknown");
                    DEFAULT_WORKERS
                }
            },
            WorkerCount::Fixed(0) => DEFAULT_WORKERS,
            WorkerCount::Fixed(n) => n,
        }
    }
}

/// Half-open range of output rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        RowRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Clamp a worker hint to the number of rows.
///
/// A zero hint falls back to [`DEFAULT_WORKERS`]. Zero rows means zero
/// workers; otherwise every worker gets at least one row.
pub fn choose_worker_count(rows: usize, hint: usize) -> usize {
    let hint = if hint == 0 { DEFAULT_WORKERS } else { hint };
    hint.min(rows)
}

/// Split `0..rows` into `workers` contiguous ranges.
///
/// The first `rows % workers` ranges get one extra row, so sizes differ by
/// at most one. `workers` is clamped to `rows` first; zero workers (or zero
/// rows) gives no ranges.
///
/// ```
/// use rowmatmul::threaded::partition::{split_rows, RowRange};
///
/// assert_eq!(
///     split_rows(7, 3),
///     vec![RowRange::new(0, 3), RowRange::new(3, 5), RowRange::new(5, 7)]
/// );
/// ```
pub fn split_rows(rows: usize, workers: usize) -> Vec<RowRange> {
    let workers = workers.min(rows);
    if workers == 0 {
        return Vec::new();
    }

    let base = rows / workers;
    let extra = rows % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut row = 0;
    for worker in 0..workers {
        let len = base + usize::from(worker < extra);
        ranges.push(RowRange::new(row, row + len));
        row += len;
    }
    ranges
}

/// Resolve `count` against `rows` and split: the worker assignment for one
/// multiplication.
pub fn assign_rows(rows: usize, count: WorkerCount) -> Vec<RowRange> {
    let workers = choose_worker_count(rows, count.hint());
    debug!(rows, workers, "resolved worker count");
    split_rows(rows, workers)
}

/// True if `ranges` covers `0..rows` exactly, in order, with no empty range.
pub fn is_exact_partition(ranges: &[RowRange], rows: usize) -> bool {
    let mut next = 0;
    for range in ranges {
        if range.start != next || range.end <= range.start {
            return false;
        }
        next = range.end;
    }
    next == rows
}
