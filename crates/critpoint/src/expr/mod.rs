//! Reference expression collaborator.
//!
//! Purpose
//! - Give the search engine something real to evaluate: a small scientific
//!   calculator grammar (numbers, `pi`, `e`, variables, `+ - * / ^`, unary
//!   minus, implicit multiplication, and the usual one-argument functions).
//! - Implements `Evaluate`, so the engine never sees the AST.
//!
//! Pipeline
//! - `tokens`: text → tokens
//! - `parse`: tokens → RPN (shunting-yard) → `Expr`
//! - `eval`: `Expr` evaluated at a point under `Context` + preferences
//!
//! References
//! - Code cross-refs: `eval::{Evaluate, Value}`, `context::{Context, AngleUnit}`

mod eval;
mod parse;
mod tokens;

use std::collections::BTreeSet;
use std::fmt;

pub use parse::ParseError;

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }
}

/// One-argument functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Ln,
    Log,
    Exp,
    Abs,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" | "arcsin" => Func::Asin,
            "acos" | "arccos" => Func::Acos,
            "atan" | "arctan" => Func::Atan,
            "sqrt" => Func::Sqrt,
            "ln" => Func::Ln,
            "log" => Func::Log,
            "exp" => Func::Exp,
            "abs" => Func::Abs,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sqrt => "sqrt",
            Func::Ln => "ln",
            Func::Log => "log",
            Func::Exp => "exp",
            Func::Abs => "abs",
        }
    }
}

/// Expression tree. Constants `pi` and `e` are folded into `Num` at parse time.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(String),
    Neg(Box<Expr>),
    Bin(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Parse calculator syntax, e.g. `"cos(a)"`, `"a^2 - 4"`, `"2a + sqrt(a)"`.
    pub fn parse(text: &str) -> Result<Expr, ParseError> {
        let toks = tokens::tokenize(text)?;
        let rpn = parse::to_rpn(&toks)?;
        parse::from_rpn(rpn)
    }

    #[inline]
    pub fn num(v: f64) -> Expr {
        Expr::Num(v)
    }

    #[inline]
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    #[inline]
    pub fn call(f: Func, arg: Expr) -> Expr {
        Expr::Call(f, Box::new(arg))
    }

    #[inline]
    pub fn bin(op: BinOp, a: Expr, b: Expr) -> Expr {
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    /// Names of all variables occurring in the tree.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            match e {
                Expr::Num(_) => {}
                Expr::Var(name) => {
                    out.insert(name.clone());
                }
                Expr::Neg(a) | Expr::Call(_, a) => stack.push(a),
                Expr::Bin(_, a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
            }
        }
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => write!(f, "{v}"),
            Expr::Var(name) => f.write_str(name),
            Expr::Neg(a) => write!(f, "-({a})"),
            Expr::Bin(op, a, b) => write!(f, "({a} {} {b})", op.symbol()),
            Expr::Call(func, a) => write!(f, "{}({a})", func.name()),
        }
    }
}

#[cfg(test)]
mod tests;
