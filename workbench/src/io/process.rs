//! Child process execution with redirected output and a wall-clock timeout.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Exit code recorded when the child is killed by the timeout.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// How one child process run ended.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub timed_out: bool,
}

/// Run a command with stdout/stderr redirected to files, optionally bounded
/// by a wall-clock timeout.
///
/// On expiry the child is killed and synchronously awaited before returning,
/// so nothing keeps writing to the log files after the run is finalized.
pub fn run_with_redirects(
    mut cmd: Command,
    stdout_path: &Path,
    stderr_path: &Path,
    timeout: Option<Duration>,
) -> Result<ProcessOutcome> {
    let stdout_file = File::create(stdout_path)
        .with_context(|| format!("create {}", stdout_path.display()))?;
    let stderr_file = File::create(stderr_path)
        .with_context(|| format!("create {}", stderr_path.display()))?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::from(stderr_file));

    debug!("spawning checker process");
    let mut child = cmd.spawn().context("spawn checker")?;

    let status = match timeout {
        Some(limit) => match child.wait_timeout(limit).context("wait for checker")? {
            Some(status) => status,
            None => {
                warn!(timeout_secs = limit.as_secs(), "checker timed out, killing");
                child.kill().context("kill checker")?;
                child.wait().context("wait checker after kill")?;
                return Ok(ProcessOutcome {
                    exit_code: TIMEOUT_EXIT_CODE,
                    timed_out: true,
                });
            }
        },
        None => child.wait().context("wait for checker")?,
    };

    // Killed-by-signal has no code; record -1 rather than inventing one.
    let exit_code = status.code().unwrap_or(-1);
    debug!(exit_code, "checker finished");
    Ok(ProcessOutcome {
        exit_code,
        timed_out: false,
    })
}
