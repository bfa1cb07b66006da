//! Solver configuration loading for the CLI.
//!
//! `--config <file.json>` holds a (possibly partial) `SolverCfg`; fields left
//! out keep their defaults through `#[serde(default)]` on the struct.

use anyhow::{bail, Context, Result};
use critpoint::api::SolverCfg;
use std::fs;
use std::path::Path;

pub fn load_cfg(path: Option<&Path>) -> Result<SolverCfg> {
    let Some(path) = path else {
        return Ok(SolverCfg::default());
    };
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: SolverCfg = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing config {}", path.display()))?;
    validate(&cfg)?;
    tracing::debug!(?cfg, path = %path.display(), "loaded solver config");
    Ok(cfg)
}

fn validate(cfg: &SolverCfg) -> Result<()> {
    for (name, v) in [
        ("eps", cfg.eps),
        ("zero_eps", cfg.zero_eps),
        ("snap_eps", cfg.snap_eps),
        ("max_value", cfg.max_value),
    ] {
        if !(v.is_finite() && v >= 0.0) {
            bail!("config field `{name}` must be a finite non-negative number, got {v}");
        }
    }
    if cfg.max_iterations == 0 {
        bail!("config field `max_iterations` must be at least 1");
    }
    if cfg.tail_window < 2 {
        bail!("config field `tail_window` must be at least 2");
    }
    Ok(())
}
