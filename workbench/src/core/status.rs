//! Run outcome classification and process exit-code mapping.

use crate::core::types::RunStatus;
use crate::exit_codes;

/// Classify a finished checker run.
///
/// Priority order, not simply exit-code-based: TLC can exit non-zero for
/// errors that are not property violations, so the presence of the dumped
/// counterexample file is the most reliable fail signal.
pub fn classify_run(counterexample_exists: bool, timed_out: bool, exit_code: i32) -> RunStatus {
    if counterexample_exists {
        RunStatus::Fail
    } else if timed_out {
        RunStatus::Timeout
    } else if exit_code == 0 {
        RunStatus::Pass
    } else {
        RunStatus::Error
    }
}

impl RunStatus {
    /// The whole invocation's process exit code for this status.
    pub fn process_exit_code(self) -> i32 {
        match self {
            RunStatus::Pass => exit_codes::PASS,
            RunStatus::Fail => exit_codes::FAIL,
            RunStatus::Timeout => exit_codes::TIMEOUT,
            RunStatus::Error => exit_codes::ERROR,
        }
    }
}
