//! Shared deterministic types for workbench core logic.
//!
//! These types define stable contracts between core components and the wire
//! shapes consumed by downstream automation. They must remain deterministic
//! across runs: every list field is recorded in a documented, stable order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classified outcome of one checker run.
///
/// Classification is not simply exit-code-based; see [`crate::core::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Checker exited zero without producing a counterexample.
    Pass,
    /// Checker dumped a counterexample.
    Fail,
    /// Checker was killed by the wall-clock timeout.
    Timeout,
    /// Checker exited non-zero without producing a counterexample.
    Error,
}

/// One step of a summarized counterexample trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// 1-based position in the emitted sequence, not the checker's state id.
    pub idx: usize,
    /// Checker-assigned state number.
    pub state_number: i64,
    /// Action record for the edge targeting this state, if one was indexed.
    pub action: Option<Value>,
    /// Variable names that differ from the previous step, sorted. For the
    /// first step, all variable names of that state.
    pub changed_vars: Vec<String>,
}

/// An edge whose target state number is ≤ its source: the trace loops back to
/// an earlier (or the same) state, representing an infinite cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LassoEdge {
    #[serde(rename = "from")]
    pub from_state: i64,
    #[serde(rename = "to")]
    pub to_state: i64,
    pub action: Value,
}

/// Compact, diff-based summary of a counterexample trace.
///
/// `states_total` counts every parsed state even when `steps` was truncated
/// by a step cap; `steps_emitted` is always `steps.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub states_total: usize,
    pub steps_emitted: usize,
    pub steps: Vec<TraceStep>,
    /// Lasso-closing edges in raw encounter order.
    pub lasso_edges: Vec<LassoEdge>,
}
