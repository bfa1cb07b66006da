use super::*;
use crate::context::{AngleUnit, ComplexFormat, Context};
use crate::eval::{Evaluate, Value};

fn at(text: &str, x: f64) -> Value {
    at_with(text, x, &Context::new(), AngleUnit::Degree)
}

fn at_with(text: &str, x: f64, ctx: &Context, unit: AngleUnit) -> Value {
    Expr::parse(text)
        .unwrap()
        .evaluate("a", x, ctx, ComplexFormat::Real, unit)
}

fn real(v: Value) -> f64 {
    match v {
        Value::Real(r) => r,
        other => panic!("expected a real value, got {other:?}"),
    }
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(real(at("1 + 2 * 3", 0.0)), 7.0);
    assert_eq!(real(at("2 ^ 3 ^ 2", 0.0)), 512.0);
    assert_eq!(real(at("-a^2", 3.0)), -9.0);
    assert_eq!(real(at("(1 + 2) * 3", 0.0)), 9.0);
    assert_eq!(real(at("8 / 4 / 2", 0.0)), 1.0);
    assert_eq!(real(at("2 ^ -a", 1.0)), 0.5);
    assert_eq!(real(at("+a - -a", 2.0)), 4.0);
}

#[test]
fn implicit_multiplication() {
    assert_eq!(real(at("2a", 3.0)), 6.0);
    assert_eq!(real(at("3(a+1)", 1.0)), 6.0);
    assert_eq!(real(at("(a)(a)", 4.0)), 16.0);
    assert!((real(at("2sin(a)", 30.0)) - 1.0).abs() < 1e-12);
    assert!((real(at("2pi", 0.0)) - std::f64::consts::TAU).abs() < 1e-15);
}

#[test]
fn trig_follows_angle_unit() {
    assert!((real(at("cos(a)", 180.0)) + 1.0).abs() < 1e-15);
    assert!(real(at("cos(a)", 90.0)).abs() < 1e-15);
    let rad = at_with("sin(a)", std::f64::consts::FRAC_PI_2, &Context::new(), AngleUnit::Radian);
    assert!((real(rad) - 1.0).abs() < 1e-15);
    assert!((real(at("asin(1)", 0.0)) - 90.0).abs() < 1e-12);
    assert!((real(at("atan(1)", 0.0)) - 45.0).abs() < 1e-12);
}

#[test]
fn non_real_and_undefined_results() {
    assert_eq!(at("sqrt(a)", -1.0), Value::NonReal);
    assert_eq!(at("ln(a)", -1.0), Value::NonReal);
    assert_eq!(at("ln(a)", 0.0), Value::Undefined);
    assert_eq!(at("a^0.5", -4.0), Value::NonReal);
    assert_eq!(at("acos(a)", 2.0), Value::NonReal);
    assert_eq!(at("1/a", 0.0), Value::Undefined);
    assert_eq!(at("0^(-1)", 0.0), Value::Undefined);
    assert_eq!(at("exp(a)", 1e6), Value::Undefined);
    // Undefined dominates non-real.
    assert_eq!(at("sqrt(-1) + 1/0", 0.0), Value::Undefined);
    assert_eq!(real(at("(-2)^3", 0.0)), -8.0);
}

#[test]
fn context_bindings_and_symbol_shadowing() {
    let ctx = Context::new().with_var("k", 2.0).with_var("a", 100.0);
    assert_eq!(real(at_with("k*a", 3.0, &ctx, AngleUnit::Degree)), 6.0);
    assert_eq!(at("k*a", 3.0), Value::Undefined);
}

#[test]
fn free_symbols_and_display() {
    let e = Expr::parse("k*cos(a) + pi").unwrap();
    let syms: Vec<_> = e.free_symbols().into_iter().collect();
    assert_eq!(syms, vec!["a".to_string(), "k".to_string()]);
    assert!(Expr::parse("3").unwrap().free_symbols().is_empty());
    let shown = Expr::parse("-a^2").unwrap().to_string();
    assert_eq!(shown, "-((a ^ 2))");
    // Display output parses back to the same tree.
    let e2 = Expr::parse("sin(a) / (1 + a)").unwrap();
    assert_eq!(Expr::parse(&e2.to_string()).unwrap(), e2);
}

#[test]
fn parse_errors() {
    assert_eq!(Expr::parse("   "), Err(ParseError::Empty));
    assert_eq!(Expr::parse("(a"), Err(ParseError::Unbalanced));
    assert_eq!(Expr::parse("a)"), Err(ParseError::Unbalanced));
    assert!(matches!(Expr::parse("a +"), Err(ParseError::MissingOperand(_))));
    assert!(matches!(Expr::parse("* a"), Err(ParseError::MissingOperand(_))));
    assert!(matches!(Expr::parse("sin"), Err(ParseError::MissingOperand(_))));
    assert!(matches!(Expr::parse("()"), Err(ParseError::MissingOperand(_))));
    assert!(matches!(Expr::parse("1..2"), Err(ParseError::InvalidNumber(_))));
    assert_eq!(
        Expr::parse("a $ 2"),
        Err(ParseError::UnexpectedChar { ch: '$', at: 2 })
    );
}
