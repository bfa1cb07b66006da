//! Bracket refiners: bisection for sign changes, golden-section for peaks.
//!
//! Both are capped at `SolverCfg::max_iterations` and never fail: a flat or
//! undecidable interval yields its midpoint (or the bracket's best sample).
//! The returned value may be NaN when `f` is undefined at the refined
//! point; acceptance is the condition's call.

use crate::eval::Scalar;

use super::scan::Candidate;
use super::types::{Bracket, Coordinate2D, Sample, SearchWindow, SolverCfg};

/// `(√5 − 1) / 2`
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Objective of a golden-section refinement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Goal {
    Minimize,
    Maximize,
    /// Minimize `|f|` (tangent roots).
    MinimizeAbs,
}

impl Goal {
    /// Lower is better; undefined is worst.
    #[inline]
    fn score(self, y: Option<f64>) -> f64 {
        match (self, y) {
            (_, None) => f64::INFINITY,
            (Goal::Minimize, Some(y)) => y,
            (Goal::Maximize, Some(y)) => -y,
            (Goal::MinimizeAbs, Some(y)) => y.abs(),
        }
    }
}

pub(crate) fn refine<F: Scalar + ?Sized>(
    f: &F,
    candidate: &Candidate,
    cfg: &SolverCfg,
) -> Coordinate2D {
    match *candidate {
        Candidate::Exact(s) => Coordinate2D::new(s.x, s.y),
        Candidate::SignChange(bracket) => bisect(f, bracket, cfg.max_iterations),
        Candidate::Peak { bracket, mid, goal } => {
            optimize(f, bracket, mid, goal, cfg.max_iterations)
        }
    }
}

/// Bisection on a sign-change bracket.
pub(crate) fn bisect<F: Scalar + ?Sized>(
    f: &F,
    bracket: Bracket,
    max_iterations: usize,
) -> Coordinate2D {
    let (mut lo, mut hi) = (bracket.lo.x, bracket.hi.x);
    let lo_negative = bracket.lo.y < 0.0;
    for _ in 0..max_iterations {
        let mid = 0.5 * (lo + hi);
        // Floating-point resolution reached.
        if mid <= lo || mid >= hi {
            break;
        }
        match f.at(mid) {
            Some(y) if y == 0.0 => return Coordinate2D::new(mid, y),
            Some(y) if (y < 0.0) == lo_negative => lo = mid,
            Some(_) => hi = mid,
            None => break,
        }
    }
    let x = 0.5 * (lo + hi);
    Coordinate2D::new(x, f.at(x).unwrap_or(f64::NAN))
}

/// Golden-section refinement of a three-sample peak; keeps `mid` unless
/// the refined point is strictly better.
fn optimize<F: Scalar + ?Sized>(
    f: &F,
    bracket: Bracket,
    mid: Sample,
    goal: Goal,
    max_iterations: usize,
) -> Coordinate2D {
    let x = golden_section(|x| goal.score(f.at(x)), bracket.lo.x, bracket.hi.x, max_iterations);
    match f.at(x) {
        Some(y) if goal.score(Some(y)) < goal.score(Some(mid.y)) => Coordinate2D::new(x, y),
        _ => Coordinate2D::new(mid.x, mid.y),
    }
}

/// Minimize `score` on `[lo, hi]`. Ties shrink both ends, so a flat
/// interval converges to its midpoint.
pub(crate) fn golden_section(
    score: impl Fn(f64) -> f64,
    lo: f64,
    hi: f64,
    max_iterations: usize,
) -> f64 {
    let (mut a, mut b) = (lo, hi);
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = score(c);
    let mut fd = score(d);
    for _ in 0..max_iterations {
        if !(a < c && c < d && d < b) {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = score(c);
        } else if fc > fd {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = score(d);
        } else {
            a = c;
            b = d;
            c = b - INV_PHI * (b - a);
            d = a + INV_PHI * (b - a);
            fc = score(c);
            fd = score(d);
        }
    }
    0.5 * (a + b)
}

/// Snap results within `step · snap_eps` of zero: the abscissa (re-evaluated
/// at 0 when defined there) and the value. The abscissa only snaps when 0
/// lies in `(start, max]`.
pub(crate) fn snap_to_origin<F: Scalar + ?Sized>(
    f: &F,
    point: Coordinate2D,
    window: &SearchWindow,
    cfg: &SolverCfg,
) -> Coordinate2D {
    let tol = window.step * cfg.snap_eps;
    let origin_in_window = window.start < 0.0 && 0.0 <= window.max;
    let mut p = point;
    if origin_in_window && p.abscissa != 0.0 && p.abscissa.abs() < tol {
        if let Some(y) = f.at(0.0) {
            p = Coordinate2D::new(0.0, y);
        }
    }
    if p.value != 0.0 && p.value.abs() < tol {
        p.value = 0.0;
    }
    p
}
