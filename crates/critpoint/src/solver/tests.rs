//! Scenario tests for the public operations plus property checks.

use super::*;
use crate::context::{AngleUnit, ComplexFormat, Context, Preferences};
use crate::eval::{Evaluate, Scalar, ScalarFn};
use crate::expr::Expr;

use proptest::prelude::*;

const TOL: f64 = 1e-5;

#[derive(Clone, Copy, Debug)]
enum Op {
    Max,
    Min,
    Root,
}

fn expr(text: &str) -> Expr {
    Expr::parse(text).expect("test expression parses")
}

fn run(op: Op, e: &Expr, window: SearchWindow, prefs: Preferences) -> Coordinate2D {
    let ctx = Context::new();
    match op {
        Op::Max => next_maximum(e, "a", window, &ctx, prefs),
        Op::Min => next_minimum(e, "a", window, &ctx, prefs),
        Op::Root => next_root(e, "a", window, &ctx, prefs),
    }
}

/// Iterate caller-side (`start = x + step`) and compare each result.
fn assert_next_are(op: Op, text: &str, window: SearchWindow, expected: &[(f64, f64)]) {
    let e = expr(text);
    let mut w = window;
    for (i, &(x, y)) in expected.iter().enumerate() {
        assert!(!w.start.is_nan(), "{text}: iteration {i} resumed from NaN");
        let got = run(op, &e, w, Preferences::default());
        assert!(
            got.approx_eq(&Coordinate2D::new(x, y), TOL),
            "{op:?} of {text} #{i}: expected ({x}, {y}), got {got:?}"
        );
        w = w.after(got.abscissa);
    }
}

fn assert_next_intersections_are(text: &str, other: &str, expected: &[(f64, f64)]) {
    let (e, g) = (expr(text), expr(other));
    let ctx = Context::new();
    let mut w = SearchWindow::new(-1.0, 0.1, 500.0);
    for (i, &(x, y)) in expected.iter().enumerate() {
        let got = next_intersection(&e, &g, "a", w, &ctx, Preferences::default());
        assert!(
            got.approx_eq(&Coordinate2D::new(x, y), TOL),
            "{text} ∩ {other} #{i}: expected ({x}, {y}), got {got:?}"
        );
        w = w.after(got.abscissa);
    }
}

#[test]
fn cos_extrema_in_degrees() {
    assert_next_are(
        Op::Max,
        "cos(a)",
        SearchWindow::new(-1.0, 0.1, 500.0),
        &[(0.0, 1.0), (360.0, 1.0), (f64::NAN, f64::NAN)],
    );
    assert_next_are(
        Op::Min,
        "cos(a)",
        SearchWindow::new(0.0, 0.1, 300.0),
        &[(180.0, -1.0)],
    );
}

#[test]
fn square_extrema_default_window() {
    assert_next_are(Op::Max, "a^2", SearchWindow::default(), &[(f64::NAN, f64::NAN)]);
    assert_next_are(Op::Min, "a^2", SearchWindow::default(), &[(0.0, 0.0)]);
}

#[test]
fn constant_extrema_report_the_constant() {
    for op in [Op::Max, Op::Min] {
        assert_next_are(op, "3", SearchWindow::default(), &[(f64::NAN, 3.0)]);
        assert_next_are(op, "0", SearchWindow::default(), &[(f64::NAN, 0.0)]);
    }
}

#[test]
fn roots() {
    assert_next_are(
        Op::Root,
        "cos(a)",
        SearchWindow::new(0.0, 0.1, 500.0),
        &[(90.0, 0.0), (270.0, 0.0), (450.0, 0.0)],
    );
    assert_next_are(Op::Root, "a^2", SearchWindow::default(), &[(0.0, 0.0)]);
    assert_next_are(
        Op::Root,
        "a^2 - 4",
        SearchWindow::new(-5.0, 0.1, 100.0),
        &[(-2.0, 0.0), (2.0, 0.0), (f64::NAN, 0.0)],
    );
    assert_next_are(Op::Root, "3", SearchWindow::default(), &[(f64::NAN, 0.0)]);
    // The zero function is zero at the first cursor.
    assert_next_are(Op::Root, "0", SearchWindow::default(), &[(-0.9, 0.0)]);
}

#[test]
fn intersections() {
    assert_next_intersections_are("cos(a)", "2", &[(f64::NAN, f64::NAN)]);
    assert_next_intersections_are("cos(a)", "1", &[(0.0, 1.0), (360.0, 1.0)]);
    assert_next_intersections_are("cos(a)", "0", &[(90.0, 0.0), (270.0, 0.0), (450.0, 0.0)]);
}

#[test]
fn tangent_root_between_samples_is_refined() {
    // Double root at 0.05, never sampled and never a sign change.
    let got = run(Op::Root, &expr("(a - 0.05)^2"), SearchWindow::default(), Preferences::default());
    assert!((got.abscissa - 0.05).abs() < 1e-6, "got {got:?}");
    assert_eq!(got.value, 0.0);
}

#[test]
fn sign_changes_across_poles_are_not_roots() {
    let no_root = run(Op::Root, &expr("1/a"), SearchWindow::default(), Preferences::default());
    assert!(no_root.abscissa.is_nan());
    assert_eq!(no_root.value, 0.0);
    // tan(90°) is huge but finite in floating point; the next real root is 180.
    let window = SearchWindow::new(1.0, 0.1, 200.0);
    let got = run(Op::Root, &expr("tan(a)"), window, Preferences::default());
    assert!((got.abscissa - 180.0).abs() < TOL, "got {got:?}");
}

#[test]
fn undefined_samples_are_gaps() {
    // sqrt is non-real left of 0 under the real format.
    assert_next_are(Op::Root, "sqrt(a)", SearchWindow::default(), &[(0.0, 0.0)]);
    assert_next_are(Op::Root, "sqrt(a) - 1", SearchWindow::default(), &[(1.0, 0.0)]);
    // Nothing defined at all.
    assert_next_are(Op::Max, "sqrt(-1 - a^2)", SearchWindow::default(), &[(f64::NAN, f64::NAN)]);
}

#[test]
fn radians_and_context_bindings() {
    let ctx = Context::new().with_var("k", 2.0);
    let prefs = Preferences::new(ComplexFormat::Real, AngleUnit::Radian);
    let e = expr("sin(a)");
    let r = next_root(&e, "a", SearchWindow::new(1.0, 0.1, 10.0), &ctx, prefs);
    assert!((r.abscissa - std::f64::consts::PI).abs() < 1e-12);

    // k*a meets a + 3 at a = 3.
    let window = SearchWindow::default();
    let p = next_intersection(&expr("k*a"), &expr("a + 3"), "a", window, &ctx, prefs);
    assert!(p.approx_eq(&Coordinate2D::new(3.0, 6.0), TOL), "got {p:?}");
}

#[test]
fn out_of_window_and_invalid_windows_fail_closed() {
    let e = expr("cos(a)");
    let beyond = SearchWindow::new(200.0, 0.1, 100.0);
    assert!(run(Op::Max, &e, beyond, Preferences::default()).approx_eq(&Coordinate2D::nan(), TOL));
    assert!(run(Op::Root, &e, beyond, Preferences::default())
        .approx_eq(&Coordinate2D::unlocated(0.0), TOL));
    for bad in [
        SearchWindow::new(0.0, 0.0, 10.0),
        SearchWindow::new(0.0, -0.1, 10.0),
        SearchWindow::new(f64::NAN, 0.1, 10.0),
        SearchWindow::new(0.0, 0.1, f64::INFINITY),
    ] {
        assert!(run(Op::Min, &e, bad, Preferences::default()).approx_eq(&Coordinate2D::nan(), TOL));
        assert!(run(Op::Root, &e, bad, Preferences::default())
            .approx_eq(&Coordinate2D::unlocated(0.0), TOL));
    }
}

#[test]
fn implausible_extrema_are_skipped() {
    let cfg = SolverCfg {
        max_value: 0.5,
        ..SolverCfg::default()
    };
    let e = expr("cos(a)");
    let p = next_extremum_with_cfg(
        Extremum::Maximum,
        &e,
        "a",
        SearchWindow::new(-1.0, 0.1, 500.0),
        &Context::new(),
        Preferences::default(),
        &cfg,
    );
    assert!(p.approx_eq(&Coordinate2D::nan(), TOL), "got {p:?}");
}

#[test]
fn slow_decay_settles_to_its_last_value() {
    let p = run(Op::Max, &expr("exp(-a)"), SearchWindow::default(), Preferences::default());
    assert!(p.abscissa.is_nan());
    assert!(p.value.abs() < TOL);
}

#[test]
fn rounding_noise_in_constant_expressions_is_flat() {
    for text in ["sin(a)^2 + cos(a)^2", "(a+1)^2 - a^2 - 2a"] {
        for op in [Op::Max, Op::Min] {
            assert_next_are(op, text, SearchWindow::default(), &[(f64::NAN, 1.0)]);
        }
    }
}

#[test]
fn fine_steps_do_not_mistake_slopes_for_convergence() {
    let prefs = Preferences::default();
    let ramp = run(Op::Max, &expr("a"), SearchWindow::new(0.0, 1e-7, 1e-3), prefs);
    assert!(ramp.approx_eq(&Coordinate2D::nan(), TOL), "got {ramp:?}");
    // Strictly decreasing on (10, 12].
    let falling = SearchWindow::new(10.0, 1e-4, 12.0);
    for op in [Op::Max, Op::Min] {
        let p = run(op, &expr("cos(a)"), falling, prefs);
        assert!(p.approx_eq(&Coordinate2D::nan(), TOL), "{op:?}: got {p:?}");
    }
}

#[test]
fn results_stay_inside_a_window_ending_just_below_zero() {
    let f = |x: f64| Some(x + 5e-7);
    let window = SearchWindow::new(-0.1 - 5e-7, 0.1, -1e-7);
    let r = find_root(&f, window, &SolverCfg::default());
    assert!(r.abscissa <= window.max, "got {r:?}");
    assert!((r.abscissa + 5e-7).abs() < 1e-12, "got {r:?}");
}

#[test]
fn closures_drive_the_engine_directly() {
    let f = |x: f64| Some((x - 1.5) * (x + 0.5));
    let r = find_root(&f, SearchWindow::new(0.0, 0.25, 10.0), &SolverCfg::default());
    assert!((r.abscissa - 1.5).abs() < 1e-12);
    let window = SearchWindow::new(-2.0, 0.25, 10.0);
    let m = find_extremum(&f, Extremum::Minimum, window, &SolverCfg::default());
    assert!(m.approx_eq(&Coordinate2D::new(0.5, -1.0), 1e-9), "got {m:?}");
}

#[test]
fn approx_eq_treats_nan_as_equal_only_to_nan() {
    assert!(approx_eq_nan(f64::NAN, f64::NAN, TOL));
    assert!(!approx_eq_nan(f64::NAN, 0.0, TOL));
    assert!(!approx_eq_nan(0.0, f64::NAN, TOL));
    assert!(approx_eq_nan(1.0, 1.0 + 1e-6, TOL));
    assert!(!approx_eq_nan(1.0, 1.0 + 1e-4, TOL));
}

#[test]
fn window_helpers() {
    let w = SearchWindow::new(0.0, 0.1, 500.0);
    assert_eq!(w.sample_count(), 5000);
    assert_eq!(SearchWindow::new(10.0, 0.1, 0.0).sample_count(), 0);
    assert_eq!(w.after(90.0).start, 90.1);
    assert_eq!(w.cursor(3), 0.30000000000000004);
}

// Properties ---------------------------------------------------------------

fn bits(p: Coordinate2D) -> (u64, u64) {
    (p.abscissa.to_bits(), p.value.to_bits())
}

fn cubic() -> Expr {
    // Roots -2, 1, 3; one local maximum and one local minimum between them.
    expr("(a - 1)(a + 2)(a - 3)")
}

fn eval_at(e: &Expr, x: f64) -> Option<f64> {
    let ctx = Context::new();
    ScalarFn::new(e, "a", &ctx, Preferences::default()).at(x)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_deterministic(start in -400.0f64..400.0) {
        let e = expr("cos(a)");
        let w = SearchWindow::new(start, 0.1, start + 400.0);
        for op in [Op::Max, Op::Min, Op::Root] {
            let prefs = Preferences::default();
            prop_assert_eq!(bits(run(op, &e, w, prefs)), bits(run(op, &e, w, prefs)));
        }
    }

    #[test]
    fn prop_forward_progress_and_rescan(start in -6.0f64..4.0) {
        let e = cubic();
        let w = SearchWindow::new(start, 0.05, 6.0);
        for op in [Op::Max, Op::Min, Op::Root] {
            let p = run(op, &e, w, Preferences::default());
            if p.is_found() {
                prop_assert!(p.abscissa > w.start && p.abscissa <= w.max, "{:?}: {:?}", op, p);
                let q = run(op, &e, w.after(p.abscissa), Preferences::default());
                prop_assert!(
                    !q.is_found() || q.abscissa > p.abscissa,
                    "{:?}: {:?} then {:?}",
                    op,
                    p,
                    q
                );
            }
        }
    }

    #[test]
    fn prop_root_correctness(start in -6.0f64..4.0) {
        let e = cubic();
        let p = run(Op::Root, &e, SearchWindow::new(start, 0.05, 6.0), Preferences::default());
        if p.is_found() {
            let y = eval_at(&e, p.abscissa).expect("defined at a root");
            prop_assert!(y.abs() < TOL, "f({}) = {}", p.abscissa, y);
            prop_assert_eq!(p.value, 0.0);
        }
    }

    #[test]
    fn prop_extremum_correctness(start in -400.0f64..400.0, maximum in any::<bool>()) {
        let e = expr("cos(a)");
        let step = 0.1;
        let (op, sign) = if maximum { (Op::Max, 1.0) } else { (Op::Min, -1.0) };
        let p = run(op, &e, SearchWindow::new(start, step, start + 400.0), Preferences::default());
        if p.is_found() {
            let y = eval_at(&e, p.abscissa).expect("defined at an extremum");
            prop_assert!((y - p.value).abs() < TOL);
            for k in 1..=3 {
                for x in [p.abscissa - k as f64 * step, p.abscissa + k as f64 * step] {
                    let n = eval_at(&e, x).expect("cos is defined everywhere");
                    prop_assert!(sign * (n - p.value) <= TOL, "neighbor {} beats {:?}", x, p);
                }
            }
        }
    }

    #[test]
    fn prop_intersection_correctness(start in -6.0f64..4.0) {
        let (f, g) = (cubic(), expr("2a - 1"));
        let ctx = Context::new();
        let window = SearchWindow::new(start, 0.05, 6.0);
        let p = next_intersection(&f, &g, "a", window, &ctx, Preferences::default());
        if p.is_found() {
            let fy = eval_at(&f, p.abscissa).expect("f defined");
            let gy = eval_at(&g, p.abscissa).expect("g defined");
            prop_assert!((fy - gy).abs() < TOL);
            prop_assert!((p.value - fy).abs() < TOL);
        }
    }
}

#[test]
fn evaluate_trait_objects_are_accepted() {
    let e = expr("a - 4");
    let dynamic: &dyn Evaluate = &e;
    let ctx = Context::new();
    let r = next_root(dynamic, "a", SearchWindow::default(), &ctx, Preferences::default());
    assert!((r.abscissa - 4.0).abs() < TOL);
}
