//! Counterexample trace summarization.
//!
//! Distills a TLC `-dumpTrace json` document into a small, stable summary:
//! one step per state with the variables that changed, plus any lasso-closing
//! edges. The dump is an external, evolving wire format, so parsing is
//! best-effort: non-conforming states and edges are dropped, and only
//! whole-document shape violations are fatal.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::core::diff::changed_vars;
use crate::core::types::{LassoEdge, TraceStep, TraceSummary};

/// Fatal summarization failures. Everything below whole-document shape is
/// skipped instead of reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummarizeError {
    /// The document (or its `counterexample` field) is not usable at all.
    #[error("malformed counterexample: {0}")]
    MalformedInput(&'static str),
    /// The `state` list produced zero parsable state records.
    #[error("no parsable states found in counterexample state list")]
    EmptyTrace,
}

/// Summarize a raw counterexample document.
///
/// `max_steps` caps the emitted steps; totals still reflect every parsed
/// state. Pure function of its input, safe to call concurrently.
pub fn summarize(doc: &Value, max_steps: Option<usize>) -> Result<TraceSummary, SummarizeError> {
    let ce = extract_counterexample(doc)?;

    let raw_states = ce
        .get("state")
        .and_then(Value::as_array)
        .ok_or(SummarizeError::MalformedInput(
            "state is missing or not a list",
        ))?;

    let mut states: Vec<(i64, &Map<String, Value>)> =
        raw_states.iter().filter_map(parse_state_pair).collect();
    if states.is_empty() {
        return Err(SummarizeError::EmptyTrace);
    }
    // Raw order is untrusted. Stable sort keeps duplicates in input order.
    states.sort_by_key(|entry| entry.0);

    let (action_by_to, lasso_edges) = index_actions(ce.get("action"));

    let cap = max_steps.unwrap_or(usize::MAX);
    let mut steps: Vec<TraceStep> = Vec::new();
    let mut prev: Option<&Map<String, Value>> = None;
    for (i, &(state_number, vars)) in states.iter().enumerate() {
        if steps.len() >= cap {
            break;
        }
        let changed = match prev {
            None => {
                let mut names: Vec<String> = vars.keys().cloned().collect();
                names.sort();
                names
            }
            Some(prev_vars) => changed_vars(prev_vars, vars),
        };
        steps.push(TraceStep {
            idx: i + 1,
            state_number,
            action: action_by_to.get(&state_number).cloned(),
            changed_vars: changed,
        });
        prev = Some(vars);
    }

    Ok(TraceSummary {
        states_total: states.len(),
        steps_emitted: steps.len(),
        steps,
        lasso_edges,
    })
}

/// The dump may wrap the record under `counterexample` or be the record
/// itself; accept both.
fn extract_counterexample(doc: &Value) -> Result<&Map<String, Value>, SummarizeError> {
    if let Some(inner) = doc.get("counterexample").and_then(Value::as_object) {
        return Ok(inner);
    }
    doc.as_object()
        .ok_or(SummarizeError::MalformedInput("document is not an object"))
}

/// Parse a `[stateNumber, {var: value, ...}]` pair as serialized by
/// `tlc2.value.impl.CounterExample`.
fn parse_state_pair(item: &Value) -> Option<(i64, &Map<String, Value>)> {
    let pair = item.as_array()?;
    let state_number = pair.first()?.as_i64()?;
    let vars = pair.get(1)?.as_object()?;
    Some((state_number, vars))
}

/// Index `[fromPair, actionRecord, toPair]` edges by target state number.
///
/// Lasso-closing edges (target ≤ source, self-loops included) are collected
/// separately in raw order and never indexed. Duplicate targets keep the
/// first edge seen. Non-object action payloads are wrapped so the summary's
/// action field is always an object or absent.
fn index_actions(raw_actions: Option<&Value>) -> (HashMap<i64, Value>, Vec<LassoEdge>) {
    let mut action_by_to: HashMap<i64, Value> = HashMap::new();
    let mut lasso_edges: Vec<LassoEdge> = Vec::new();

    let Some(edges) = raw_actions.and_then(Value::as_array) else {
        return (action_by_to, lasso_edges);
    };
    for edge in edges {
        let Some(triple) = edge.as_array() else {
            continue;
        };
        if triple.len() < 3 {
            continue;
        }
        let Some((from_state, _)) = parse_state_pair(&triple[0]) else {
            continue;
        };
        let Some((to_state, _)) = parse_state_pair(&triple[2]) else {
            continue;
        };
        let action = match &triple[1] {
            payload @ Value::Object(_) => payload.clone(),
            payload => json!({ "_raw": payload }),
        };

        if to_state <= from_state {
            lasso_edges.push(LassoEdge {
                from_state,
                to_state,
                action,
            });
        } else {
            action_by_to.entry(to_state).or_insert(action);
        }
    }
    (action_by_to, lasso_edges)
}
