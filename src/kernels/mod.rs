//! Row-slice multiplication kernel.
//!
//! `dot_rows` is the only place the arithmetic happens. Both the
//! sequential path and every parallel worker go through it.

pub mod dot_rows;
