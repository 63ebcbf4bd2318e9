//! Reproducible TLC model-checker runs with machine-consumable results.
//!
//! Running TLC is easy; keeping runs reproducible and parsing counterexamples
//! reliably in automation is where things go wrong. This crate wraps one TLC
//! invocation behind a stable contract and distills `-dumpTrace json`
//! counterexamples into compact, diff-based summaries. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (trace summarization, change
//!   detection, status classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, hashing, process
//!   execution). Isolated to enable faking in tests.
//!
//! The [`check`] module coordinates core logic with I/O to implement the
//! `check` CLI command; [`core::trace`] is usable standalone.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
