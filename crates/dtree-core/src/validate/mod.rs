//! Structural validation and sanitization of decision tree documents.
//!
//! `validate_tree` runs three stages over one untrusted document:
//! 1. nodes    -> sanitized nodes + accepted id set
//! 2. edges    -> sanitized edges (checked against the id set)
//! 3. viewport -> sanitized viewport
//!
//! Guarantees:
//! - fail-fast: the first violated rule aborts the whole call
//! - deterministic: check order is fixed, so the same document always
//!   reports the same first error
//! - the input is only read; output values are freshly allocated
//! - no I/O, no shared state; safe to call concurrently on independent
//!   documents

use serde_json::{Map, Value};

use crate::errors::{Expected, ValidationError};
use crate::model::{RawValue, ValidatedTree};

mod edges;
mod nodes;
mod viewport;

pub use edges::validate_edges;
pub use nodes::{validate_nodes, NodeStage};
pub use viewport::validate_viewport;

/// Validate an untrusted document and build a sanitized tree.
pub fn validate_tree(raw: &RawValue) -> Result<ValidatedTree, ValidationError> {
    let result = run_stages(raw);

    match &result {
        Ok(tree) => tracing::debug!(
            nodes = tree.nodes().len(),
            edges = tree.edges().len(),
            "decision tree accepted"
        ),
        Err(e) => tracing::debug!(
            kind = e.kind().as_str(),
            path = e.path(),
            "decision tree rejected: {e}"
        ),
    }

    result
}

fn run_stages(raw: &RawValue) -> Result<ValidatedTree, ValidationError> {
    let obj = as_object(raw, "tree")?;

    let NodeStage { nodes, ids } = validate_nodes(field(obj, "nodes"))?;
    let edges = validate_edges(field(obj, "edges"), &ids)?;
    let viewport = validate_viewport(field(obj, "viewport"))?;

    Ok(ValidatedTree::from_parts(nodes, edges, viewport))
}

/// Missing keys read as `Null`, so "absent" and "wrong kind" share one
/// match arm wherever the rules don't distinguish them.
pub(crate) fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Value {
    obj.get(key).unwrap_or(&Value::Null)
}

pub(crate) fn as_object<'a>(
    v: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    match v {
        Value::Object(m) => Ok(m),
        _ => Err(ValidationError::shape(path, Expected::Object)),
    }
}

pub(crate) fn as_sequence<'a>(v: &'a Value, path: &str) -> Result<&'a [Value], ValidationError> {
    match v {
        Value::Array(items) => Ok(items),
        _ => Err(ValidationError::shape(path, Expected::Sequence)),
    }
}

pub(crate) fn as_str<'a>(v: &'a Value, path: &str) -> Result<&'a str, ValidationError> {
    match v {
        Value::String(s) => Ok(s),
        _ => Err(ValidationError::shape(path, Expected::String)),
    }
}

pub(crate) fn as_number(v: &Value, path: &str) -> Result<f64, ValidationError> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ValidationError::shape(path, Expected::Number)),
        _ => Err(ValidationError::shape(path, Expected::Number)),
    }
}

/// `null` and absent both mean "no payload".
pub(crate) fn optional_payload(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<Map<String, Value>>, ValidationError> {
    match field(obj, key) {
        Value::Null => Ok(None),
        Value::Object(m) => Ok(Some(m.clone())),
        _ => Err(ValidationError::shape(path, Expected::Object)),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::errors::{Endpoint, ErrorKind};

    fn node(id: &str) -> Value {
        json!({
            "id": id,
            "type": "decisionNode",
            "position": { "x": 0, "y": 0 },
            "measured": { "width": 32, "height": 32 }
        })
    }

    fn viewport() -> Value {
        json!({ "x": 0, "y": 0, "zoom": 1 })
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree = validate_tree(&json!({ "nodes": [], "edges": [], "viewport": viewport() })).unwrap();
        assert!(tree.nodes().is_empty());
        assert!(tree.edges().is_empty());
        assert_eq!(tree.viewport().zoom, 1.0);
    }

    #[test]
    fn tree_must_be_object() {
        for raw in [json!(null), json!([]), json!("tree"), json!(1)] {
            let e = validate_tree(&raw).unwrap_err();
            assert_eq!(e, ValidationError::shape("tree", Expected::Object));
        }
    }

    #[test]
    fn node_failure_skips_later_stages() {
        // edges and viewport are also broken; only the node error is reported
        let raw = json!({ "nodes": [node("a"), node("a")], "edges": 7, "viewport": null });
        let e = validate_tree(&raw).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Duplicate);
        assert_eq!(e.id(), Some("a"));
    }

    #[test]
    fn edge_failure_skips_viewport() {
        let raw = json!({
            "nodes": [node("a")],
            "edges": [{ "id": "e1", "source": "a", "target": "b" }],
            "viewport": "nope"
        });
        let e = validate_tree(&raw).unwrap_err();
        assert_matches!(e, ValidationError::Reference { endpoint: Endpoint::Target, ref id, .. } if id == "b");
    }

    #[test]
    fn viewport_checked_last() {
        let raw = json!({
            "nodes": [node("a")],
            "edges": [],
            "viewport": { "x": 0, "y": 0, "zoom": "1" }
        });
        let e = validate_tree(&raw).unwrap_err();
        assert_eq!(e.path(), "viewport.zoom");
        assert_eq!(e.to_string(), "viewport.zoom must be a number");
    }

    #[test]
    fn missing_sections_are_shape_errors() {
        let e = validate_tree(&json!({})).unwrap_err();
        assert_eq!(e, ValidationError::shape("nodes", Expected::Sequence));

        let e = validate_tree(&json!({ "nodes": [] })).unwrap_err();
        assert_eq!(e, ValidationError::shape("edges", Expected::Sequence));

        let e = validate_tree(&json!({ "nodes": [], "edges": [] })).unwrap_err();
        assert_eq!(e, ValidationError::shape("viewport", Expected::Object));
    }

    #[test]
    fn unknown_top_level_keys_are_dropped() {
        let raw = json!({ "nodes": [], "edges": [], "viewport": viewport(), "owner": "mallory" });
        let tree = validate_tree(&raw).unwrap();
        let out = tree.to_raw();
        assert!(out.get("owner").is_none());
    }
}
