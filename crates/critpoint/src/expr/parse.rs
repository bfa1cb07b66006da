//! Shunting-yard: tokens → RPN → `Expr`.
//!
//! Rules
//! - A known function name is a prefix operator bound to the next operand
//!   (`sin(a)^2` is `(sin a)^2`).
//! - `-` where an operand is expected is unary negation, looser than `^`
//!   (`-a^2` is `-(a^2)`); a leading `+` is ignored.
//! - An operand directly followed by another operand or `(` is an implicit
//!   product (`2a`, `3(a+1)`, `2sin(a)`).

use std::f64::consts::{E, PI};

use thiserror::Error;

use super::tokens::Tok;
use super::{BinOp, Expr, Func};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at offset {at}")]
    UnexpectedChar { ch: char, at: usize },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unbalanced parentheses")]
    Unbalanced,
    #[error("missing operand near '{0}'")]
    MissingOperand(String),
    #[error("malformed expression")]
    Malformed,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Rpn {
    Num(f64),
    Var(String),
    Bin(BinOp),
    Neg,
    Call(Func),
}

#[derive(Clone, Copy, Debug)]
enum Pending {
    Bin(BinOp),
    Neg,
    Call(Func),
    LPar,
}

impl Pending {
    fn precedence(self) -> u8 {
        match self {
            Pending::Bin(BinOp::Add | BinOp::Sub) => 1,
            Pending::Bin(BinOp::Mul | BinOp::Div) => 2,
            Pending::Neg => 3,
            Pending::Bin(BinOp::Pow) => 4,
            Pending::Call(_) => 5,
            Pending::LPar => 0,
        }
    }

    fn emit(self) -> Option<Rpn> {
        match self {
            Pending::Bin(op) => Some(Rpn::Bin(op)),
            Pending::Neg => Some(Rpn::Neg),
            Pending::Call(f) => Some(Rpn::Call(f)),
            Pending::LPar => None,
        }
    }
}

fn binop_of(t: &Tok) -> Option<BinOp> {
    match t {
        Tok::Plus => Some(BinOp::Add),
        Tok::Minus => Some(BinOp::Sub),
        Tok::Star => Some(BinOp::Mul),
        Tok::Slash => Some(BinOp::Div),
        Tok::Caret => Some(BinOp::Pow),
        _ => None,
    }
}

fn push_binop(op: BinOp, ops: &mut Vec<Pending>, out: &mut Vec<Rpn>) {
    let prec = Pending::Bin(op).precedence();
    let right_assoc = op == BinOp::Pow;
    while let Some(&top) = ops.last() {
        let tp = top.precedence();
        if matches!(top, Pending::LPar) || tp < prec || (tp == prec && right_assoc) {
            break;
        }
        ops.pop();
        out.extend(top.emit());
    }
    ops.push(Pending::Bin(op));
}

pub(crate) fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ParseError> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pending> = Vec::new();
    let mut expect_operand = true;

    for tok in tokens {
        let starts_operand = matches!(tok, Tok::Num(_) | Tok::Ident(_) | Tok::LPar);
        if starts_operand && !expect_operand {
            push_binop(BinOp::Mul, &mut ops, &mut out);
        }

        match tok {
            Tok::Num(v) => {
                out.push(Rpn::Num(*v));
                expect_operand = false;
            }
            Tok::Ident(name) => {
                if let Some(f) = Func::from_name(name) {
                    ops.push(Pending::Call(f));
                    expect_operand = true;
                } else {
                    out.push(match name.as_str() {
                        "pi" => Rpn::Num(PI),
                        "e" => Rpn::Num(E),
                        _ => Rpn::Var(name.clone()),
                    });
                    expect_operand = false;
                }
            }
            Tok::Minus if expect_operand => ops.push(Pending::Neg),
            Tok::Plus if expect_operand => {}
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if expect_operand {
                    return Err(ParseError::MissingOperand(symbol_of(tok).into()));
                }
                if let Some(op) = binop_of(tok) {
                    push_binop(op, &mut ops, &mut out);
                }
                expect_operand = true;
            }
            Tok::LPar => {
                ops.push(Pending::LPar);
                expect_operand = true;
            }
            Tok::RPar => {
                if expect_operand {
                    return Err(ParseError::MissingOperand(")".into()));
                }
                loop {
                    match ops.pop() {
                        Some(Pending::LPar) => break,
                        Some(p) => out.extend(p.emit()),
                        None => return Err(ParseError::Unbalanced),
                    }
                }
                // A function applied to this parenthesized group binds now.
                if let Some(Pending::Call(f)) = ops.last().copied() {
                    ops.pop();
                    out.push(Rpn::Call(f));
                }
                expect_operand = false;
            }
        }
    }

    if expect_operand {
        return Err(ParseError::MissingOperand("end of input".into()));
    }
    while let Some(p) = ops.pop() {
        match p {
            Pending::LPar => return Err(ParseError::Unbalanced),
            p => out.extend(p.emit()),
        }
    }
    Ok(out)
}

fn symbol_of(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::Caret => "^",
        Tok::LPar => "(",
        Tok::RPar => ")",
        Tok::Num(_) | Tok::Ident(_) => "operand",
    }
}

pub(crate) fn from_rpn(rpn: Vec<Rpn>) -> Result<Expr, ParseError> {
    let mut stack: Vec<Expr> = Vec::with_capacity(rpn.len());
    for item in rpn {
        let e = match item {
            Rpn::Num(v) => Expr::Num(v),
            Rpn::Var(name) => Expr::Var(name),
            Rpn::Neg => Expr::Neg(Box::new(stack.pop().ok_or(ParseError::Malformed)?)),
            Rpn::Call(f) => Expr::call(f, stack.pop().ok_or(ParseError::Malformed)?),
            Rpn::Bin(op) => {
                let b = stack.pop().ok_or(ParseError::Malformed)?;
                let a = stack.pop().ok_or(ParseError::Malformed)?;
                Expr::bin(op, a, b)
            }
        };
        stack.push(e);
    }
    match (stack.pop(), stack.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(ParseError::Malformed),
    }
}
