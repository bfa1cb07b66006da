//! Public search operations.
//!
//! | op                | found          | not found                 |
//! |-------------------|----------------|---------------------------|
//! | `next_maximum`    | `(x, f(x))`    | `(NaN, flat value or NaN)` |
//! | `next_minimum`    | `(x, f(x))`    | `(NaN, flat value or NaN)` |
//! | `next_root`       | `(x, 0)`       | `(NaN, 0)`                |
//! | `next_intersection` | `(x, f(x))`  | `(NaN, NaN)`              |
//!
//! A window with `step <= 0` or non-finite bounds fails immediately.

use crate::context::{Context, Preferences};
use crate::eval::{Difference, Evaluate, Scalar, ScalarFn};

use super::classify::classify;
use super::scan::{scan_and_refine, ExtremumCondition, RootCondition, ScanOutcome};
use super::types::{Coordinate2D, Extremum, SearchWindow, SolverCfg};

/// Next root of `f` strictly after `window.start`.
pub fn find_root<F: Scalar + ?Sized>(f: &F, window: SearchWindow, cfg: &SolverCfg) -> Coordinate2D {
    if !window.is_valid() {
        tracing::debug!(?window, "invalid window");
        return Coordinate2D::unlocated(0.0);
    }
    match scan_and_refine(f, &window, &mut RootCondition, cfg) {
        ScanOutcome::Found(p) => Coordinate2D::new(p.abscissa, 0.0),
        ScanOutcome::Exhausted(history) => {
            tracing::debug!(samples = history.count(), "no root in window");
            Coordinate2D::unlocated(0.0)
        }
    }
}

/// Next extremum of kind `kind` strictly after `window.start`.
pub fn find_extremum<F: Scalar + ?Sized>(
    f: &F,
    kind: Extremum,
    window: SearchWindow,
    cfg: &SolverCfg,
) -> Coordinate2D {
    if !window.is_valid() {
        tracing::debug!(?window, "invalid window");
        return Coordinate2D::nan();
    }
    match scan_and_refine(f, &window, &mut ExtremumCondition::new(kind), cfg) {
        ScanOutcome::Found(p) => p,
        ScanOutcome::Exhausted(history) => {
            let verdict = classify(&history, cfg);
            tracing::debug!(?kind, ?verdict, "no extremum in window");
            verdict.extremum_result()
        }
    }
}

/// Next root of `expr` in `symbol`, with default tolerances.
pub fn next_root<E: Evaluate + ?Sized>(
    expr: &E,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
) -> Coordinate2D {
    next_root_with_cfg(expr, symbol, window, ctx, prefs, &SolverCfg::default())
}

pub fn next_root_with_cfg<E: Evaluate + ?Sized>(
    expr: &E,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
    cfg: &SolverCfg,
) -> Coordinate2D {
    let _span =
        tracing::debug_span!("next_root", symbol, start = window.start, max = window.max)
            .entered();
    find_root(&ScalarFn::new(expr, symbol, ctx, prefs), window, cfg)
}

/// Next local maximum of `expr`.
pub fn next_maximum<E: Evaluate + ?Sized>(
    expr: &E,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
) -> Coordinate2D {
    next_extremum(Extremum::Maximum, expr, symbol, window, ctx, prefs)
}

/// Next local minimum of `expr`.
pub fn next_minimum<E: Evaluate + ?Sized>(
    expr: &E,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
) -> Coordinate2D {
    next_extremum(Extremum::Minimum, expr, symbol, window, ctx, prefs)
}

pub fn next_extremum<E: Evaluate + ?Sized>(
    kind: Extremum,
    expr: &E,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
) -> Coordinate2D {
    next_extremum_with_cfg(kind, expr, symbol, window, ctx, prefs, &SolverCfg::default())
}

pub fn next_extremum_with_cfg<E: Evaluate + ?Sized>(
    kind: Extremum,
    expr: &E,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
    cfg: &SolverCfg,
) -> Coordinate2D {
    let _span =
        tracing::debug_span!("next_extremum", ?kind, symbol, start = window.start, max = window.max)
            .entered();
    find_extremum(&ScalarFn::new(expr, symbol, ctx, prefs), kind, window, cfg)
}

/// Next intersection of `expr` with `other`: the next root of `expr − other`,
/// reported as `(x, expr(x))`.
pub fn next_intersection<E, G>(
    expr: &E,
    other: &G,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
) -> Coordinate2D
where
    E: Evaluate + ?Sized,
    G: Evaluate + ?Sized,
{
    next_intersection_with_cfg(expr, other, symbol, window, ctx, prefs, &SolverCfg::default())
}

pub fn next_intersection_with_cfg<E, G>(
    expr: &E,
    other: &G,
    symbol: &str,
    window: SearchWindow,
    ctx: &Context,
    prefs: Preferences,
    cfg: &SolverCfg,
) -> Coordinate2D
where
    E: Evaluate + ?Sized,
    G: Evaluate + ?Sized,
{
    let _span =
        tracing::debug_span!("next_intersection", symbol, start = window.start, max = window.max)
            .entered();
    let f = ScalarFn::new(expr, symbol, ctx, prefs);
    let g = ScalarFn::new(other, symbol, ctx, prefs);
    let root = find_root(&Difference { f, g }, window, cfg);
    if !root.is_found() {
        return Coordinate2D::nan();
    }
    match f.at(root.abscissa) {
        Some(y) => Coordinate2D::new(root.abscissa, y),
        None => Coordinate2D::nan(),
    }
}
