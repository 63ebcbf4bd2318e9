//! Shared helpers for workbench tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A temp directory holding a minimal spec, its cfg, and a placeholder jar,
/// enough for the runner to get past input resolution.
pub struct SpecDir {
    temp: tempfile::TempDir,
    pub spec_path: PathBuf,
    pub cfg_path: PathBuf,
    pub jar_path: PathBuf,
}

impl SpecDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let spec_path = temp.path().join("Counter.tla");
        let cfg_path = temp.path().join("Counter.cfg");
        let jar_path = temp.path().join("tla2tools.jar");

        fs::write(
            &spec_path,
            "---- MODULE Counter ----\nVARIABLE x\nInit == x = 0\nNext == x' = x + 1\n====\n",
        )
        .context("write spec")?;
        fs::write(&cfg_path, "INIT Init\nNEXT Next\n").context("write cfg")?;
        fs::write(&jar_path, b"placeholder jar").context("write jar")?;

        Ok(Self {
            temp,
            spec_path,
            cfg_path,
            jar_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn out_root(&self) -> PathBuf {
        self.path().join("runs")
    }
}

/// Write an executable shell script standing in for the `java` binary.
///
/// The script receives the full TLC argv; `$TRACE_PATH` is pre-substituted
/// with a snippet that extracts the `-dumpTrace json <path>` argument, so
/// scripts can fake a dumped counterexample.
#[cfg(unix)]
pub fn write_fake_java(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let preamble = r#"
trace=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "json" ]; then trace="$arg"; fi
  prev="$arg"
done
"#;
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{preamble}\n{body}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    let mut perms = fs::metadata(&path).context("stat script")?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).context("chmod script")?;
    Ok(path)
}
