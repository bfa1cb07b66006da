//! Scalar evaluator adapter.
//!
//! Purpose
//! - `Evaluate` is the only boundary to expression collaborators: evaluate
//!   an expression at `symbol = x` under a context and preferences.
//! - `ScalarFn` binds everything but `x` and collapses non-real, infinite,
//!   and NaN results into `None` ("undefined"), which is what the search
//!   engine consumes through `Scalar`.
//! - `Difference` composes two scalars as `f − g` for intersections.
//!
//! References
//! - Code cross-refs: `context::{Context, Preferences}`, `solver::scan`

use crate::context::{AngleUnit, ComplexFormat, Context, Preferences};

/// Raw result reported by an expression collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Real(f64),
    /// The result left the real line (e.g. `sqrt(-1)` under `ComplexFormat::Real`).
    NonReal,
    /// Evaluation failed (division by zero, unbound variable, ...).
    Undefined,
}

impl Value {
    /// Finite real payload, if any.
    #[inline]
    pub fn finite(self) -> Option<f64> {
        match self {
            Value::Real(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }
}

/// Expression collaborator: evaluate at `symbol = x`.
///
/// Implementations must be referentially transparent for a fixed context.
pub trait Evaluate {
    fn evaluate(
        &self,
        symbol: &str,
        x: f64,
        ctx: &Context,
        complex_format: ComplexFormat,
        angle_unit: AngleUnit,
    ) -> Value;
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    #[inline]
    fn evaluate(
        &self,
        symbol: &str,
        x: f64,
        ctx: &Context,
        complex_format: ComplexFormat,
        angle_unit: AngleUnit,
    ) -> Value {
        (**self).evaluate(symbol, x, ctx, complex_format, angle_unit)
    }
}

/// Closure-backed collaborator; ignores context and preferences.
#[derive(Clone, Copy, Debug)]
pub struct FnExpr<F>(pub F);

impl<F: Fn(f64) -> Value> Evaluate for FnExpr<F> {
    #[inline]
    fn evaluate(&self, _: &str, x: f64, _: &Context, _: ComplexFormat, _: AngleUnit) -> Value {
        (self.0)(x)
    }
}

/// Pure scalar function `x ↦ f(x)`, `None` meaning undefined at `x`.
pub trait Scalar {
    fn at(&self, x: f64) -> Option<f64>;
}

impl<F: Fn(f64) -> Option<f64>> Scalar for F {
    #[inline]
    fn at(&self, x: f64) -> Option<f64> {
        self(x)
    }
}

/// Expression bound to a symbol, context, and preferences.
#[derive(Debug)]
pub struct ScalarFn<'a, E: ?Sized> {
    pub expr: &'a E,
    pub symbol: &'a str,
    pub ctx: &'a Context,
    pub prefs: Preferences,
}

// Manual impls: only references are held, so no `E: Clone` bound.
impl<E: ?Sized> Clone for ScalarFn<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<E: ?Sized> Copy for ScalarFn<'_, E> {}

impl<'a, E: Evaluate + ?Sized> ScalarFn<'a, E> {
    #[inline]
    pub fn new(expr: &'a E, symbol: &'a str, ctx: &'a Context, prefs: Preferences) -> Self {
        Self {
            expr,
            symbol,
            ctx,
            prefs,
        }
    }
}

impl<E: Evaluate + ?Sized> Scalar for ScalarFn<'_, E> {
    #[inline]
    fn at(&self, x: f64) -> Option<f64> {
        let raw = self.expr.evaluate(
            self.symbol,
            x,
            self.ctx,
            self.prefs.complex_format,
            self.prefs.angle_unit,
        );
        // Non-real results are undefined under every format: the scan is real-valued.
        raw.finite()
    }
}

/// `h(x) = f(x) − g(x)`; undefined where either side is.
#[derive(Clone, Copy, Debug)]
pub struct Difference<F, G> {
    pub f: F,
    pub g: G,
}

impl<F: Scalar, G: Scalar> Scalar for Difference<F, G> {
    #[inline]
    fn at(&self, x: f64) -> Option<f64> {
        let d = self.f.at(x)? - self.g.at(x)?;
        d.is_finite().then_some(d)
    }
}
