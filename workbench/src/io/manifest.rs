//! The run manifest: the permanent, machine-consumable record of one run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::types::{RunStatus, TraceSummary};

/// Content hashes of the checker inputs, for provenance tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputHashes {
    pub spec_sha256: String,
    pub cfg_sha256: String,
}

/// Written once per invocation to `<run_dir>/summary.json` and echoed to
/// stdout, so both CI and downstream agents can consume it without re-reading
/// files from the run directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub status: RunStatus,
    pub exit_code: i32,
    pub timed_out: bool,
    pub started_at_utc: String,
    pub finished_at_utc: String,
    pub duration_ms: u64,
    pub spec_path: String,
    pub cfg_path: String,
    pub module: String,
    pub spec_dir: String,
    pub jar_path: String,
    pub inputs: InputHashes,
    /// Full invocation, structured.
    pub command: Vec<String>,
    /// Shell-quoted form of `command` for human debugging.
    pub command_str: String,
    pub run_dir: String,
    pub meta_root: String,
    pub metadir: Option<String>,
    pub stdout_path: String,
    pub stderr_path: String,
    pub counterexample_json_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterexample_summary: Option<TraceSummary>,
}

/// Serialize to pretty-printed JSON with trailing newline.
pub fn manifest_json(manifest: &RunManifest) -> Result<String> {
    let mut payload = serde_json::to_string_pretty(manifest).context("serialize manifest")?;
    payload.push('\n');
    Ok(payload)
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let payload = manifest_json(manifest)?;
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// POSIX-shell quote an argv list into one copy-pasteable string.
pub fn shell_quote_command(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
        });
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
