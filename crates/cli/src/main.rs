use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use critpoint::api::{
    next_extremum_with_cfg, next_intersection_with_cfg, next_root_with_cfg, AngleUnit,
    ComplexFormat, Context, Coordinate2D, Expr, Extremum, Preferences, SearchWindow, SolverCfg,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod config;
mod provenance;

#[derive(Parser, Debug)]
#[command(name = "cli")]
#[command(about = "Find the next root, extremum, or intersection of a graph after a cursor")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Next root: f(x) = 0
    Root(SearchArgs),
    /// Next local minimum
    Min(SearchArgs),
    /// Next local maximum
    Max(SearchArgs),
    /// Next intersection with a second graph
    Intersect {
        /// Second expression g; reports (x, f(x)) where f(x) = g(x)
        #[arg(long = "with")]
        with: String,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Debug, Clone, Serialize)]
struct SearchArgs {
    /// Expression in the search symbol, e.g. "cos(a)"
    expr: String,
    #[arg(long, default_value = "a")]
    symbol: String,
    /// Cursor; the first sample is taken at start + step
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    start: f64,
    #[arg(long, default_value_t = 0.1)]
    step: f64,
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    max: f64,
    #[arg(long, value_enum, default_value_t = AngleArg::Degree)]
    angle: AngleArg,
    /// Evaluate with the cartesian complex format instead of real-only
    #[arg(long)]
    complex: bool,
    /// Bind another variable: --var k=2 (repeatable)
    #[arg(long = "var", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,
    /// Keep searching past each result, up to N results
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    json: bool,
    /// JSON file with solver tolerances (partial files keep defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Refuse windows that would take more samples than this
    #[arg(long, default_value_t = 1_000_000)]
    max_samples: u64,
    /// Write results as JSON here, plus a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum AngleArg {
    Degree,
    Radian,
}

impl SearchArgs {
    fn prefs(&self) -> Preferences {
        let angle_unit = match self.angle {
            AngleArg::Degree => AngleUnit::Degree,
            AngleArg::Radian => AngleUnit::Radian,
        };
        let complex_format = if self.complex {
            ComplexFormat::Cartesian
        } else {
            ComplexFormat::Real
        };
        Preferences::new(complex_format, angle_unit)
    }

    fn context(&self) -> Context {
        self.vars
            .iter()
            .fold(Context::new(), |ctx, (name, v)| ctx.with_var(name.clone(), *v))
    }

    fn window(&self) -> SearchWindow {
        SearchWindow::new(self.start, self.step, self.max)
    }
}

enum Op {
    Root,
    Extremum(Extremum),
    Intersect(Expr),
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Op::Root => "root",
            Op::Extremum(Extremum::Minimum) => "min",
            Op::Extremum(Extremum::Maximum) => "max",
            Op::Intersect(_) => "intersect",
        }
    }
}

#[derive(Serialize)]
struct Outcome {
    operation: &'static str,
    expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    with: Option<String>,
    points: Vec<Coordinate2D>,
    /// Result that ended the walk, when fewer than `count` points were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<Coordinate2D>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Root(args) => search(Op::Root, args),
        Action::Min(args) => search(Op::Extremum(Extremum::Minimum), args),
        Action::Max(args) => search(Op::Extremum(Extremum::Maximum), args),
        Action::Intersect { with, search: args } => {
            let other = parse_expr(&with)?;
            search(Op::Intersect(other), args)
        }
        Action::Report => report(),
    }
}

fn search(op: Op, args: SearchArgs) -> Result<()> {
    let expr = parse_expr(&args.expr)?;
    let cfg = config::load_cfg(args.config.as_deref())?;
    let ctx = args.context();
    let prefs = args.prefs();
    let window = args.window();
    check_window(&window, args.max_samples)?;
    check_symbols(&expr, &args.symbol, &ctx)?;
    if let Op::Intersect(other) = &op {
        check_symbols(other, &args.symbol, &ctx)?;
    }
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    tracing::info!(op = op.name(), expr = %expr, ?window, count = args.count, "search");

    let (points, end) = walk(window, args.count, |w| match &op {
        Op::Root => next_root_with_cfg(&expr, &args.symbol, w, &ctx, prefs, &cfg),
        Op::Extremum(kind) => {
            next_extremum_with_cfg(*kind, &expr, &args.symbol, w, &ctx, prefs, &cfg)
        }
        Op::Intersect(other) => {
            next_intersection_with_cfg(&expr, other, &args.symbol, w, &ctx, prefs, &cfg)
        }
    });
    let outcome = Outcome {
        operation: op.name(),
        expr: args.expr.clone(),
        with: match &op {
            Op::Intersect(other) => Some(other.to_string()),
            _ => None,
        },
        points,
        end,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_text(&outcome, &op);
    }
    if let Some(out) = &args.out {
        write_outcome(out, &outcome, &args, &cfg)?;
    }
    Ok(())
}

/// Caller-side "find next" loop: resume one step past each result and stop
/// at the first failure.
fn walk(
    mut window: SearchWindow,
    count: usize,
    mut next: impl FnMut(SearchWindow) -> Coordinate2D,
) -> (Vec<Coordinate2D>, Option<Coordinate2D>) {
    let mut points = Vec::new();
    while points.len() < count {
        let p = next(window);
        if !p.is_found() {
            tracing::debug!(found = points.len(), ?window, "walk ended");
            return (points, Some(p));
        }
        points.push(p);
        window = window.after(p.abscissa);
    }
    (points, None)
}

fn print_text(outcome: &Outcome, op: &Op) {
    for p in &outcome.points {
        println!("x = {:.10}\ty = {:.10}", p.abscissa, p.value);
    }
    if let Some(end) = outcome.end {
        match op {
            Op::Extremum(_) if end.value.is_finite() => {
                println!("no further {}: function settles at y = {}", op.name(), end.value)
            }
            _ => println!("no further {}", op.name()),
        }
    }
}

fn write_outcome(
    out: &Path,
    outcome: &Outcome,
    args: &SearchArgs,
    cfg: &SolverCfg,
) -> Result<()> {
    provenance::ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(outcome)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let params = serde_json::json!({ "args": args, "solver": cfg });
    let payload = provenance::Payload::new(outcome.operation, params);
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote results");
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::report())?);
    Ok(())
}

fn parse_expr(text: &str) -> Result<Expr> {
    Expr::parse(text).with_context(|| format!("parsing expression `{text}`"))
}

fn check_window(window: &SearchWindow, max_samples: u64) -> Result<()> {
    if !(window.step.is_finite() && window.step > 0.0) {
        bail!("--step must be a positive finite number, got {}", window.step);
    }
    if !(window.start.is_finite() && window.max.is_finite()) {
        bail!("--start and --max must be finite");
    }
    let n = window.sample_count();
    if n > max_samples {
        bail!(
            "window ({}, {}] at step {} needs {n} samples, above --max-samples {max_samples}",
            window.start,
            window.max,
            window.step
        );
    }
    Ok(())
}

fn check_symbols(expr: &Expr, symbol: &str, ctx: &Context) -> Result<()> {
    let unbound: Vec<String> = expr
        .free_symbols()
        .into_iter()
        .filter(|s| s != symbol && !ctx.contains(s))
        .collect();
    if !unbound.is_empty() {
        bail!(
            "`{expr}` uses unbound variable(s) {} (search symbol is `{symbol}`; \
             bind others with --var name=value)",
            unbound.join(", ")
        );
    }
    Ok(())
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty variable name in `{s}`"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value for `{name}`: {e}"))?;
    Ok((name.to_string(), value))
}
