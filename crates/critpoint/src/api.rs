//! Curated surface for front ends (CLI, demos, benches).
//!
//! Important
//! - Prefer these re-exports over reaching into submodules; the module tree
//!   below may be reorganized without notice.

// Evaluation context and collaborator seam
pub use crate::context::{AngleUnit, ComplexFormat, Context, Preferences};
pub use crate::eval::{Difference, Evaluate, FnExpr, Scalar, ScalarFn, Value};
// Reference expression collaborator
pub use crate::expr::{BinOp, Expr, Func, ParseError};
// Search engine
pub use crate::solver::{
    find_extremum, find_root, next_extremum, next_extremum_with_cfg, next_intersection,
    next_intersection_with_cfg, next_maximum, next_minimum, next_root, next_root_with_cfg,
    Coordinate2D, Extremum, SearchWindow, SolverCfg,
};
