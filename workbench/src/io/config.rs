//! Workbench configuration stored under `<spec-dir>/.tlc-workbench/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Workbench configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to reproducible values; CLI flags
/// override whatever is configured here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Java executable used to launch TLC.
    pub java: String,

    /// TLC worker count. Defaults to 1 to keep runs reproducible.
    pub workers: u32,

    /// Kill TLC after this many seconds (0 = no timeout).
    pub timeout_secs: u64,

    /// Cap on steps emitted when summarizing a counterexample trace.
    pub trace_max_steps: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            workers: 1,
            timeout_secs: 0,
            trace_max_steps: 50,
        }
    }
}

impl WorkbenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.java.trim().is_empty() {
            return Err(anyhow!("java must be a non-empty executable name"));
        }
        if self.workers == 0 {
            return Err(anyhow!("workers must be >= 1"));
        }
        if self.trace_max_steps == 0 {
            return Err(anyhow!("trace_max_steps must be >= 1"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `WorkbenchConfig::default()`.
pub fn load_config(path: &Path) -> Result<WorkbenchConfig> {
    if !path.exists() {
        let cfg = WorkbenchConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WorkbenchConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &WorkbenchConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
