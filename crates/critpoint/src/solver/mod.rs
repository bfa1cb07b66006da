//! Critical-point search engine: next root, extremum, or intersection after a cursor.
//!
//! Purpose
//! - Turn a black-box scalar evaluator into a deterministic, resumable
//!   search: scan forward in fixed steps, refine the first bracket, and fall
//!   back to a degenerate-case classifier when the window is exhausted.
//! - Failure is data, never an error: see the sentinel table on each op.
//!
//! Layout
//! - `types.rs` (window, samples, results, tolerances), `scan.rs` (scanner
//!   and search conditions), `refine.rs` (bisection, golden-section),
//!   `classify.rs` (degenerate cases), `search.rs` (public operations).
//!
//! References
//! - Code cross-refs: `eval::{Scalar, ScalarFn, Difference}`, `context::Preferences`

mod classify;
mod refine;
mod scan;
mod search;
mod types;

pub use search::{
    find_extremum, find_root, next_extremum, next_extremum_with_cfg, next_intersection,
    next_intersection_with_cfg, next_maximum, next_minimum, next_root, next_root_with_cfg,
};
pub use types::{approx_eq_nan, Bracket, Coordinate2D, Extremum, Sample, SearchWindow, SolverCfg};

#[cfg(test)]
mod tests;
