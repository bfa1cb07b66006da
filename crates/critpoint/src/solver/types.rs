//! Search window, samples, results, and tolerances.
//!
//! - `SearchWindow`: `{start, step, max}`; cursor positions are
//!   `start + i·step` for `i ≥ 1`, so `start` itself is never sampled.
//! - `Coordinate2D`: result with the NaN sentinel scheme (`abscissa = NaN`
//!   means "no distinguished location").
//! - `SolverCfg`: centralizes tolerances and iteration caps.

use serde::{Deserialize, Serialize};

/// Scan window. `step > 0` is a caller precondition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start: f64,
    pub step: f64,
    pub max: f64,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            start: -1.0,
            step: 0.1,
            max: 100.0,
        }
    }
}

impl SearchWindow {
    #[inline]
    pub fn new(start: f64, step: f64, max: f64) -> Self {
        Self { start, step, max }
    }

    /// Finite bounds and a strictly positive step.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.max.is_finite() && self.step.is_finite() && self.step > 0.0
    }

    /// Cursor position `i` (`i ≥ 1`). Computed by multiplication so long
    /// scans do not accumulate rounding drift.
    #[inline]
    pub fn cursor(&self, i: u64) -> f64 {
        self.start + i as f64 * self.step
    }

    /// Upper bound on the number of samples a scan takes: `⌈(max−start)/step⌉`.
    pub fn sample_count(&self) -> u64 {
        if !self.is_valid() || self.max <= self.start {
            return 0;
        }
        let n = ((self.max - self.start) / self.step).ceil();
        if n >= u64::MAX as f64 {
            u64::MAX
        } else {
            n as u64
        }
    }

    /// Window resuming the search past a previous result at `x`.
    #[inline]
    pub fn after(&self, x: f64) -> Self {
        Self {
            start: x + self.step,
            ..*self
        }
    }
}

/// Defined sample: `y` is a finite real.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Two consecutive defined samples across which a predicate flips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    pub lo: Sample,
    pub hi: Sample,
}

/// Result point. `abscissa` finite implies `value` finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub abscissa: f64,
    pub value: f64,
}

impl Coordinate2D {
    #[inline]
    pub fn new(abscissa: f64, value: f64) -> Self {
        Self { abscissa, value }
    }

    /// "No value exists": `(NaN, NaN)`.
    #[inline]
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// "No distinguished location", with a companion value.
    #[inline]
    pub fn unlocated(value: f64) -> Self {
        Self::new(f64::NAN, value)
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.abscissa.is_finite()
    }

    /// Component-wise `|a − b| < tol`, where NaN only matches NaN.
    pub fn approx_eq(&self, other: &Coordinate2D, tol: f64) -> bool {
        approx_eq_nan(self.abscissa, other.abscissa, tol)
            && approx_eq_nan(self.value, other.value, tol)
    }
}

/// Absolute-tolerance comparison where NaN equals only NaN.
#[inline]
pub fn approx_eq_nan(a: f64, b: f64, tol: f64) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => true,
        (false, false) => (a - b).abs() < tol,
        _ => false,
    }
}

/// Which extremum to look for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremum {
    Maximum,
    Minimum,
}

/// Solver configuration (tolerances and caps).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverCfg {
    /// "Approximately equal" tolerance: root acceptance, flatness, convergence.
    pub eps: f64,
    /// A sample with `|y| <= zero_eps` is a root without refinement.
    pub zero_eps: f64,
    /// Cap on refinement iterations (bisection and golden-section alike).
    pub max_iterations: usize,
    /// Number of trailing samples inspected for convergence.
    pub tail_window: usize,
    /// Results within `step · snap_eps` of 0 (abscissa or extremum value) snap to 0.
    pub snap_eps: f64,
    /// Extrema with `|y|` above this are treated as implausible and skipped.
    pub max_value: f64,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            eps: 1e-5,
            zero_eps: 1e-12,
            max_iterations: 60,
            tail_window: 10,
            snap_eps: 1e-5,
            max_value: 1e100,
        }
    }
}
