//! Degenerate-case classifier for scans that found no bracket.
//!
//! Heuristic over the sampled data only:
//! - fewer than two defined samples: nothing could be evaluated;
//! - total spread below `eps`: the function is flat, report the last value;
//! - a full tail window whose spread and slope per unit `x` are both below
//!   `eps`: the function has settled, report the last value;
//! - otherwise: no finite extremum exists in the window.

use super::scan::History;
use super::types::{Coordinate2D, SolverCfg};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Verdict {
    TooFewSamples,
    /// Constant or settled; carries the representative (last) value.
    Flat(f64),
    Unsettled,
}

impl Verdict {
    /// Extremum failure result: `(NaN, representative)` or `(NaN, NaN)`.
    pub(crate) fn extremum_result(self) -> Coordinate2D {
        match self {
            Verdict::Flat(v) => Coordinate2D::unlocated(v),
            Verdict::TooFewSamples | Verdict::Unsettled => Coordinate2D::nan(),
        }
    }
}

pub(crate) fn classify(history: &History, cfg: &SolverCfg) -> Verdict {
    let Some(last) = history.latest() else {
        return Verdict::TooFewSamples;
    };
    if history.count() < 2 {
        return Verdict::TooFewSamples;
    }
    if history.spread() < cfg.eps {
        return Verdict::Flat(last.y);
    }
    let settled = history.tail_spread().is_some_and(|s| s < cfg.eps)
        && history.tail_slope().is_some_and(|m| m < cfg.eps);
    if settled {
        return Verdict::Flat(last.y);
    }
    Verdict::Unsettled
}
