//! Numeric critical-point, root, and intersection search for graphing.
//!
//! The engine turns a black-box scalar evaluator into a deterministic,
//! resumable search over a scan window: each call finds the *next* point
//! after a cursor, and callers iterate by moving the cursor past the last
//! result (`SearchWindow::after`).
//!
//! Layout
//! - `context`: variable bindings and evaluation preferences (angle unit,
//!   complex format).
//! - `eval`: the `Evaluate` seam to expression collaborators and the scalar
//!   adapters the engine consumes.
//! - `expr`: a small reference expression collaborator (parser + evaluator).
//! - `solver`: scanner, refiners, degenerate-case classifier, public ops.

pub mod api;
pub mod context;
pub mod eval;
pub mod expr;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use context::{AngleUnit, ComplexFormat, Context, Preferences};
pub use eval::{Evaluate, Scalar, ScalarFn, Value};
pub use expr::Expr;
pub use solver::{Coordinate2D, Extremum, SearchWindow, SolverCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::context::{AngleUnit, ComplexFormat, Context, Preferences};
    pub use crate::eval::{Evaluate, Scalar, Value};
    pub use crate::expr::Expr;
    pub use crate::solver::{
        next_extremum, next_intersection, next_maximum, next_minimum, next_root, Coordinate2D,
        Extremum, SearchWindow, SolverCfg,
    };
}
