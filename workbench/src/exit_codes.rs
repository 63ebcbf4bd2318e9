//! Stable exit codes for workbench CLI commands.
//!
//! Calling automation branches on these without parsing the manifest JSON.

/// Checker run passed (exit 0, no counterexample).
pub const PASS: i32 = 0;
/// Missing spec/cfg/jar or other invalid input; nothing was launched.
pub const INPUT_ERROR: i32 = 2;
/// Checker produced a counterexample.
pub const FAIL: i32 = 10;
/// Checker was killed by the wall-clock timeout.
pub const TIMEOUT: i32 = 11;
/// Checker exited non-zero without producing a counterexample.
pub const ERROR: i32 = 12;
