use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a search run was asked to do; recorded next to its output.
pub struct Payload {
    pub operation: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(operation: &'static str, params: Value) -> Self {
        Self { operation, params }
    }
}

/// Write `<artifact>.provenance.json` with the engine version, git commit,
/// callsite, search parameters, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    ensure_parent(&provenance_path)?;

    let callsite = Location::caller();
    let doc = json!({
        "engine": engine_block(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "operation": payload.operation,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

/// Block printed by `cli report`: engine identity plus the default tolerances.
pub fn report() -> Value {
    json!({
        "engine": engine_block(),
        "solver_defaults": critpoint::api::SolverCfg::default(),
        "preferences_defaults": critpoint::api::Preferences::default(),
    })
}

fn engine_block() -> Value {
    json!({
        "crate": "critpoint",
        "version": critpoint::VERSION,
        "code_rev": current_git_rev(),
    })
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    Ok(())
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("results"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/runs/cos_roots.json");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/runs/cos_roots.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_operation_params_and_output() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("maxima.json");
        ensure_parent(&artifact).unwrap();
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new("max", json!({"expr": "cos(a)", "step": 0.1}));
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert!(prov_path.exists());

        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["operation"], "max");
        assert_eq!(parsed["params"]["expr"], "cos(a)");
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["engine"]["version"], critpoint::VERSION);
    }

    #[test]
    fn report_lists_default_tolerances() {
        let r = report();
        assert_eq!(r["solver_defaults"]["eps"], 1e-5);
        assert_eq!(r["preferences_defaults"]["angle_unit"], "degree");
    }
}
