//! One checker run end-to-end: resolve inputs, launch TLC, classify, record.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::core::status::classify_run;
use crate::core::trace::summarize;
use crate::core::types::TraceSummary;
use crate::io::config::load_config;
use crate::io::hash::file_sha256;
use crate::io::jar::{find_tla2tools_jar, JAR_NOT_FOUND_HELP};
use crate::io::layout::{pick_metadir, run_id, RunPaths};
use crate::io::manifest::{shell_quote_command, write_manifest, InputHashes, RunManifest};
use crate::io::process::run_with_redirects;

/// Directory name holding workbench state next to a spec.
pub const WORKBENCH_DIR: &str = ".tlc-workbench";

/// One `check` invocation, CLI flags mapped 1:1.
///
/// `None` fields fall back to the workbench config file, then to built-in
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub spec: PathBuf,
    pub cfg: Option<PathBuf>,
    pub jar: Option<PathBuf>,
    pub java: Option<String>,
    pub workers: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub out_root: Option<PathBuf>,
    pub trace_max_steps: Option<usize>,
}

/// Why a check could not produce a manifest.
///
/// The input variants are reported before anything is launched and before any
/// run directory exists; they map to the input-error process exit code.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("spec not found: {}", .0.display())]
    SpecNotFound(PathBuf),
    #[error("cfg not found: {}", .0.display())]
    CfgNotFound(PathBuf),
    #[error("{}", JAR_NOT_FOUND_HELP)]
    JarNotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CheckError {
    /// True for failures reported before the checker was launched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CheckError::SpecNotFound(_) | CheckError::CfgNotFound(_) | CheckError::JarNotFound
        )
    }
}

/// Run TLC once and record the outcome.
///
/// Blocks until the child exits or the timeout fires. Always produces a
/// manifest once the run directory exists; summarization failures only drop
/// the summary field.
#[instrument(skip_all, fields(spec = %request.spec.display()))]
pub fn run_check(request: &CheckRequest) -> Result<RunManifest, CheckError> {
    if !request.spec.is_file() {
        return Err(CheckError::SpecNotFound(request.spec.clone()));
    }
    let spec_path = fs::canonicalize(&request.spec).context("canonicalize spec path")?;

    let cfg_path = match &request.cfg {
        Some(path) => path.clone(),
        None => spec_path.with_extension("cfg"),
    };
    if !cfg_path.is_file() {
        return Err(CheckError::CfgNotFound(cfg_path));
    }
    let cfg_path = fs::canonicalize(&cfg_path).context("canonicalize cfg path")?;

    let spec_dir = spec_path
        .parent()
        .context("spec path has no parent directory")?
        .to_path_buf();
    let module = spec_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("spec file name is not valid UTF-8")?
        .to_string();

    let config = load_config(&spec_dir.join(WORKBENCH_DIR).join("config.toml"))?;
    let java = request.java.clone().unwrap_or(config.java);
    let workers = request.workers.unwrap_or(config.workers);
    let timeout_secs = request.timeout_secs.unwrap_or(config.timeout_secs);
    let trace_max_steps = request.trace_max_steps.unwrap_or(config.trace_max_steps);

    let jar_path =
        find_tla2tools_jar(&spec_dir, request.jar.as_deref()).ok_or(CheckError::JarNotFound)?;

    let spec_sha256 = file_sha256(&spec_path)?;
    let cfg_sha256 = file_sha256(&cfg_path)?;

    let out_root = request
        .out_root
        .clone()
        .unwrap_or_else(|| spec_dir.join(WORKBENCH_DIR).join("runs"));
    let id = run_id(&spec_sha256, &cfg_sha256);
    let paths = RunPaths::new(&out_root, &id);
    paths.create()?;
    debug!(run_dir = %paths.run_dir.display(), "run directory created");

    // TLC resolves -config relative to the spec directory; pass a bare file
    // name when the cfg lives next to the spec.
    let cfg_arg = if cfg_path.parent() == Some(spec_dir.as_path()) {
        cfg_path
            .file_name()
            .and_then(|name| name.to_str())
            .context("cfg file name is not valid UTF-8")?
            .to_string()
    } else {
        cfg_path.display().to_string()
    };

    let command: Vec<String> = vec![
        java,
        "-cp".to_string(),
        jar_path.display().to_string(),
        "tlc2.TLC".to_string(),
        "-workers".to_string(),
        workers.to_string(),
        "-metadir".to_string(),
        paths.meta_root.display().to_string(),
        "-dumpTrace".to_string(),
        "json".to_string(),
        paths.counterexample_path.display().to_string(),
        "-config".to_string(),
        cfg_arg,
        module.clone(),
    ];

    let mut cmd = Command::new(&command[0]);
    cmd.args(&command[1..]).current_dir(&spec_dir);
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

    info!(run_id = %id, module = %module, workers, "launching checker");
    let started_at = Utc::now();
    let outcome = run_with_redirects(cmd, &paths.stdout_path, &paths.stderr_path, timeout)?;
    let finished_at = Utc::now();

    let counterexample_exists = paths.counterexample_path.is_file();
    let status = classify_run(counterexample_exists, outcome.timed_out, outcome.exit_code);

    let counterexample_summary = if counterexample_exists {
        summarize_counterexample_file(&paths.counterexample_path, trace_max_steps)
    } else {
        None
    };

    let duration = finished_at - started_at;
    let manifest = RunManifest {
        status,
        exit_code: outcome.exit_code,
        timed_out: outcome.timed_out,
        started_at_utc: started_at.to_rfc3339(),
        finished_at_utc: finished_at.to_rfc3339(),
        duration_ms: duration.num_milliseconds().max(0) as u64,
        spec_path: spec_path.display().to_string(),
        cfg_path: cfg_path.display().to_string(),
        module,
        spec_dir: spec_dir.display().to_string(),
        jar_path: jar_path.display().to_string(),
        inputs: InputHashes {
            spec_sha256,
            cfg_sha256,
        },
        command_str: shell_quote_command(&command),
        command,
        run_dir: paths.run_dir.display().to_string(),
        meta_root: paths.meta_root.display().to_string(),
        metadir: pick_metadir(&paths.meta_root).map(|p| p.display().to_string()),
        stdout_path: paths.stdout_path.display().to_string(),
        stderr_path: paths.stderr_path.display().to_string(),
        counterexample_json_path: counterexample_exists
            .then(|| paths.counterexample_path.display().to_string()),
        counterexample_summary,
    };

    write_manifest(&paths.summary_path, &manifest)?;
    info!(status = ?manifest.status, run_dir = %paths.run_dir.display(), "checker run recorded");
    Ok(manifest)
}

/// Best-effort summarization of the dumped counterexample.
///
/// The file's existence is the authoritative fail signal; a dump the
/// summarizer cannot parse (schema drift) must not sink the manifest, so
/// failures here are logged and the summary is simply omitted.
fn summarize_counterexample_file(path: &Path, max_steps: usize) -> Option<TraceSummary> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(err = %err, path = %path.display(), "read counterexample failed");
            return None;
        }
    };
    let doc: Value = match serde_json::from_str(&contents) {
        Ok(doc) => doc,
        Err(err) => {
            warn!(err = %err, path = %path.display(), "parse counterexample failed");
            return None;
        }
    };
    match summarize(&doc, Some(max_steps)) {
        Ok(summary) => Some(summary),
        Err(err) => {
            warn!(err = %err, path = %path.display(), "summarize counterexample failed");
            None
        }
    }
}
