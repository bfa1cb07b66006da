//! Point evaluation of `Expr` in real arithmetic.
//!
//! Results
//! - `Value::NonReal`: the real-valued computation left the real line
//!   (`sqrt`/`ln`/`log` of a negative, fractional power of a negative,
//!   `asin`/`acos` outside [-1, 1]). This evaluator has no complex
//!   arithmetic, so a non-real intermediate is non-real under both
//!   `ComplexFormat`s.
//! - `Value::Undefined`: division by zero, `ln(0)`, unbound variable,
//!   overflow to ±∞ or NaN.

use crate::context::{AngleUnit, ComplexFormat, Context};
use crate::eval::{Evaluate, Value};

use super::{BinOp, Expr, Func};

struct Env<'a> {
    symbol: &'a str,
    x: f64,
    ctx: &'a Context,
    angle_unit: AngleUnit,
}

impl Evaluate for Expr {
    fn evaluate(
        &self,
        symbol: &str,
        x: f64,
        ctx: &Context,
        _complex_format: ComplexFormat,
        angle_unit: AngleUnit,
    ) -> Value {
        let env = Env {
            symbol,
            x,
            ctx,
            angle_unit,
        };
        eval_node(self, &env)
    }
}

#[inline]
fn real(v: f64) -> Value {
    if v.is_finite() {
        Value::Real(v)
    } else {
        Value::Undefined
    }
}

fn eval_node(e: &Expr, env: &Env<'_>) -> Value {
    match e {
        Expr::Num(v) => real(*v),
        Expr::Var(name) if name == env.symbol => real(env.x),
        Expr::Var(name) => env.ctx.get(name).map_or(Value::Undefined, real),
        Expr::Neg(a) => match eval_node(a, env) {
            Value::Real(v) => Value::Real(-v),
            other => other,
        },
        Expr::Bin(op, a, b) => {
            let va = eval_node(a, env);
            let vb = eval_node(b, env);
            match (va, vb) {
                (Value::Real(p), Value::Real(q)) => binary(*op, p, q),
                (Value::Undefined, _) | (_, Value::Undefined) => Value::Undefined,
                _ => Value::NonReal,
            }
        }
        Expr::Call(f, a) => match eval_node(a, env) {
            Value::Real(v) => call(*f, v, env.angle_unit),
            other => other,
        },
    }
}

fn binary(op: BinOp, p: f64, q: f64) -> Value {
    match op {
        BinOp::Add => real(p + q),
        BinOp::Sub => real(p - q),
        BinOp::Mul => real(p * q),
        BinOp::Div if q == 0.0 => Value::Undefined,
        BinOp::Div => real(p / q),
        BinOp::Pow => power(p, q),
    }
}

fn power(p: f64, q: f64) -> Value {
    if p == 0.0 && q < 0.0 {
        return Value::Undefined;
    }
    if p < 0.0 && q.fract() != 0.0 {
        // Odd-denominator rationals (cube roots) are not recognized here.
        return Value::NonReal;
    }
    real(p.powf(q))
}

fn call(f: Func, v: f64, unit: AngleUnit) -> Value {
    match f {
        Func::Sin => real(unit.to_radians(v).sin()),
        Func::Cos => real(unit.to_radians(v).cos()),
        Func::Tan => real(unit.to_radians(v).tan()),
        Func::Asin | Func::Acos if !(-1.0..=1.0).contains(&v) => Value::NonReal,
        Func::Asin => real(unit.from_radians(v.asin())),
        Func::Acos => real(unit.from_radians(v.acos())),
        Func::Atan => real(unit.from_radians(v.atan())),
        Func::Sqrt if v < 0.0 => Value::NonReal,
        Func::Sqrt => real(v.sqrt()),
        Func::Ln | Func::Log if v < 0.0 => Value::NonReal,
        Func::Ln | Func::Log if v == 0.0 => Value::Undefined,
        Func::Ln => real(v.ln()),
        Func::Log => real(v.log10()),
        Func::Exp => real(v.exp()),
        Func::Abs => real(v.abs()),
    }
}
