//! Run identity and on-disk layout for checker runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::io::hash::short_hash;

/// Derive a run id from a timestamp plus short content hashes of the inputs.
///
/// Identical inputs run at different times stay distinguishable, while any
/// run id remains traceable to the exact spec and cfg that produced it.
pub fn run_id(spec_sha256: &str, cfg_sha256: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().format("%Y%m%d-%H%M%S"),
        short_hash(spec_sha256),
        short_hash(cfg_sha256)
    )
}

/// Artifact paths inside one run directory.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub run_dir: PathBuf,
    pub stdout_path: PathBuf,
    pub stderr_path: PathBuf,
    pub summary_path: PathBuf,
    pub counterexample_path: PathBuf,
    pub meta_root: PathBuf,
}

impl RunPaths {
    pub fn new(out_root: &Path, run_id: &str) -> Self {
        let run_dir = out_root.join(run_id);
        Self {
            stdout_path: run_dir.join("tlc.stdout"),
            stderr_path: run_dir.join("tlc.stderr"),
            summary_path: run_dir.join("summary.json"),
            counterexample_path: run_dir.join("counterexample.json"),
            meta_root: run_dir.join("metadir"),
            run_dir,
        }
    }

    /// Create the run directory tree.
    ///
    /// Each run owns an exclusive, newly created directory: creation fails if
    /// the run directory already exists instead of overwriting it.
    pub fn create(&self) -> Result<()> {
        if let Some(parent) = self.run_dir.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output root {}", parent.display()))?;
        }
        fs::create_dir(&self.run_dir)
            .with_context(|| format!("create run dir {}", self.run_dir.display()))?;
        fs::create_dir_all(&self.meta_root)
            .with_context(|| format!("create metadir root {}", self.meta_root.display()))?;
        Ok(())
    }
}

/// TLC creates a single timestamped metadir under the metadir root; pick the
/// newest if multiple exist.
pub fn pick_metadir(meta_root: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(meta_root).ok()?;
    let mut subdirs: Vec<(SystemTime, PathBuf)> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if !path.is_dir() {
                return None;
            }
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, path))
        })
        .collect();
    subdirs.sort_by(|a, b| b.0.cmp(&a.0));
    subdirs.into_iter().next().map(|(_, path)| path)
}
