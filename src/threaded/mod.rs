//! Multi-threaded multiplication.
//!
//! The output rows are split into contiguous ranges, one per worker. Each
//! worker owns its slice of C outright, so the hot loop needs no locks or
//! atomics. Workers are scoped threads created per call and joined before
//! the result is returned.
//!
//! - `partition`: worker count and row ranges
//! - `dispatch`: spawning, joining and error propagation

pub mod dispatch;
pub mod partition;
