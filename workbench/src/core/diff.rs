//! Deep structural change detection between state variable maps.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Variable names whose values differ between two consecutive states, sorted.
///
/// Equality is structural: `serde_json::Value` compares objects by key and
/// value regardless of key order, so `{"a":1,"b":2}` equals `{"b":2,"a":1}`.
/// A name present in only one state counts as changed, and values of
/// differing shapes are plain inequality, never an error.
pub fn changed_vars(prev: &Map<String, Value>, curr: &Map<String, Value>) -> Vec<String> {
    let names: BTreeSet<&str> = prev.keys().chain(curr.keys()).map(String::as_str).collect();
    names
        .into_iter()
        .filter(|name| prev.get(*name) != curr.get(*name))
        .map(str::to_string)
        .collect()
}
