//! Domain scanner shared by root and extremum search.
//!
//! The scanner walks the cursor forward, skips undefined samples (gaps keep
//! the history), and asks a `Condition` whether the latest samples form a
//! candidate. Candidates are refined and then either accepted (the scan
//! stops) or rejected (the scan resumes). If the cursor passes `max`, the
//! accumulated `History` goes to the classifier.

use std::collections::VecDeque;

use crate::eval::Scalar;

use super::refine::{refine, snap_to_origin, Goal};
use super::types::{Bracket, Coordinate2D, Extremum, Sample, SearchWindow, SolverCfg};

/// Summary of the defined samples seen so far: running range plus a short tail.
#[derive(Clone, Debug)]
pub(crate) struct History {
    recent: VecDeque<Sample>,
    cap: usize,
    count: usize,
    lo: f64,
    hi: f64,
}

impl History {
    pub(crate) fn new(tail_window: usize) -> Self {
        let cap = tail_window.max(3);
        Self {
            recent: VecDeque::with_capacity(cap),
            cap,
            count: 0,
            lo: f64::INFINITY,
            hi: f64::NEG_INFINITY,
        }
    }

    pub(crate) fn push(&mut self, s: Sample) {
        if self.recent.len() == self.cap {
            self.recent.pop_front();
        }
        self.recent.push_back(s);
        self.count += 1;
        self.lo = self.lo.min(s.y);
        self.hi = self.hi.max(s.y);
    }

    /// Number of defined samples seen.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn latest(&self) -> Option<Sample> {
        self.recent.back().copied()
    }

    /// Sample `k` positions before the latest (`back(0)` is the latest).
    #[inline]
    fn back(&self, k: usize) -> Option<Sample> {
        let n = self.recent.len();
        (k < n).then(|| self.recent[n - 1 - k])
    }

    /// `max y − min y` over every defined sample.
    #[inline]
    pub(crate) fn spread(&self) -> f64 {
        self.hi - self.lo
    }

    /// `max y − min y` over the tail, once the tail window is full.
    pub(crate) fn tail_spread(&self) -> Option<f64> {
        if self.recent.len() < self.cap {
            return None;
        }
        let (lo, hi) = self
            .recent
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.y), hi.max(s.y))
            });
        Some(hi - lo)
    }

    /// Tail spread per unit of `x`, once the tail window is full.
    pub(crate) fn tail_slope(&self) -> Option<f64> {
        let spread = self.tail_spread()?;
        let (first, last) = (self.recent.front()?, self.recent.back()?);
        Some(spread / (last.x - first.x))
    }
}

/// What a condition found in the latest samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Candidate {
    /// The latest sample already satisfies the condition.
    Exact(Sample),
    /// Sign change of `y` across the bracket.
    SignChange(Bracket),
    /// `mid` is optimal for `goal` among the three samples `lo, mid, hi`.
    Peak {
        bracket: Bracket,
        mid: Sample,
        goal: Goal,
    },
}

/// Search predicate strategy: detection on the sample stream plus
/// acceptance of the refined point.
pub(crate) trait Condition {
    fn detect(&mut self, history: &History, cfg: &SolverCfg) -> Option<Candidate>;
    fn accept(&self, point: &Coordinate2D, cfg: &SolverCfg) -> bool;
}

/// Zero crossings, exact zeros, and tangent zeros (local minima of `|f|`
/// that reach zero).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RootCondition;

impl Condition for RootCondition {
    fn detect(&mut self, history: &History, cfg: &SolverCfg) -> Option<Candidate> {
        let cur = history.latest()?;
        if cur.y.abs() <= cfg.zero_eps {
            return Some(Candidate::Exact(cur));
        }
        let prev = history.back(1)?;
        if (prev.y < 0.0) != (cur.y < 0.0) {
            return Some(Candidate::SignChange(Bracket { lo: prev, hi: cur }));
        }
        let first = history.back(2)?;
        let same_sign = (first.y < 0.0) == (prev.y < 0.0);
        if same_sign && prev.y.abs() <= first.y.abs() && prev.y.abs() < cur.y.abs() {
            return Some(Candidate::Peak {
                bracket: Bracket { lo: first, hi: cur },
                mid: prev,
                goal: Goal::MinimizeAbs,
            });
        }
        None
    }

    fn accept(&self, point: &Coordinate2D, cfg: &SolverCfg) -> bool {
        point.value.abs() < cfg.eps
    }
}

/// Turns of the sampled curve, with `eps` hysteresis: a maximum needs a rise
/// of more than `eps` above the running low, then a fall of more than `eps`
/// below the best sample (mirrored for minima). Rounding noise in a constant
/// expression never moves that far, so it stays flat.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExtremumCondition {
    kind: Extremum,
    /// Worst sample since the last turn.
    trough: Option<Sample>,
    /// Once a rise is confirmed: the best sample and the one before it.
    crest: Option<(Sample, Sample)>,
}

impl ExtremumCondition {
    pub(crate) fn new(kind: Extremum) -> Self {
        Self {
            kind,
            trough: None,
            crest: None,
        }
    }

    #[inline]
    fn score(&self, s: Sample) -> f64 {
        match self.kind {
            Extremum::Maximum => s.y,
            Extremum::Minimum => -s.y,
        }
    }

    fn goal(&self) -> Goal {
        match self.kind {
            Extremum::Maximum => Goal::Maximize,
            Extremum::Minimum => Goal::Minimize,
        }
    }
}

impl Condition for ExtremumCondition {
    fn detect(&mut self, history: &History, cfg: &SolverCfg) -> Option<Candidate> {
        let cur = history.latest()?;
        let Some((before, best)) = self.crest else {
            let trough = *self.trough.get_or_insert(cur);
            if self.score(cur) < self.score(trough) {
                self.trough = Some(cur);
            } else if self.score(cur) > self.score(trough) + cfg.eps {
                self.crest = history.back(1).map(|prev| (prev, cur));
            }
            return None;
        };
        if self.score(cur) > self.score(best) {
            self.crest = history.back(1).map(|prev| (prev, cur));
            return None;
        }
        if self.score(cur) < self.score(best) - cfg.eps {
            self.crest = None;
            self.trough = Some(cur);
            return Some(Candidate::Peak {
                bracket: Bracket { lo: before, hi: cur },
                mid: best,
                goal: self.goal(),
            });
        }
        None
    }

    fn accept(&self, point: &Coordinate2D, cfg: &SolverCfg) -> bool {
        point.value.is_finite() && point.value.abs() <= cfg.max_value
    }
}

/// How a scan ended.
#[derive(Clone, Debug)]
pub(crate) enum ScanOutcome {
    Found(Coordinate2D),
    Exhausted(History),
}

/// Scan `window` with `cond`, refining each candidate until one is accepted.
pub(crate) fn scan_and_refine<F, C>(
    f: &F,
    window: &SearchWindow,
    cond: &mut C,
    cfg: &SolverCfg,
) -> ScanOutcome
where
    F: Scalar + ?Sized,
    C: Condition,
{
    let mut history = History::new(cfg.tail_window);
    let mut i: u64 = 1;
    loop {
        let x = window.cursor(i);
        if x > window.max {
            break;
        }
        i += 1;
        let Some(y) = f.at(x) else {
            tracing::trace!(x, "undefined sample");
            continue;
        };
        history.push(Sample { x, y });

        let Some(candidate) = cond.detect(&history, cfg) else {
            continue;
        };
        let refined = refine(f, &candidate, cfg);
        let point = snap_to_origin(f, refined, window, cfg);
        if cond.accept(&point, cfg) {
            tracing::debug!(?candidate, x = point.abscissa, y = point.value, "accepted");
            return ScanOutcome::Found(point);
        }
        tracing::debug!(?candidate, x = point.abscissa, y = point.value, "rejected");
    }
    tracing::debug!(samples = history.count(), last_cursor = i - 1, "window exhausted");
    ScanOutcome::Exhausted(history)
}
