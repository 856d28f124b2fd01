//! Shared test utilities for the mdmblock workspace.
//!
//! `xtask` uses these at runtime, so they live in a crate instead of a `#[cfg(test)]` module.

use serde_json::{Value, json};

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced only when the root object is a decision report envelope
/// (`schema`, `tool`, `run`, `decision`). Timestamps and `duration_ms` are replaced at any
/// depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "decision"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_run_fields(&mut value);
    value
}

fn normalize_run_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_run_fields(val);
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(normalize_run_fields),
        _ => {}
    }
}

/// Reduce a decision report to the shape stored in fixture `expected.json` files:
/// `{"blocked": bool, "outcome_codes": [..]}`.
pub fn decision_summary(report: &Value) -> Value {
    let decision = &report["decision"];
    let codes: Vec<Value> = decision["outcomes"]
        .as_array()
        .map(|outcomes| outcomes.iter().map(|o| o["code"].clone()).collect())
        .unwrap_or_default();
    json!({
        "blocked": decision["blocked"].clone(),
        "outcome_codes": codes,
    })
}
