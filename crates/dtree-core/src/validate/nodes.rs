use std::collections::HashSet;

use serde_json::{Map, Value};

use super::{as_number, as_object, as_sequence, as_str, field, optional_payload};
use crate::errors::{Collection, Expected, ValidationError};
use crate::model::{Measured, NodeKind, Position, RawValue, ValidatedNode};

/// Output of the node stage: sanitized nodes in input order, plus the set
/// of accepted ids the edge stage resolves references against.
#[derive(Debug, Clone, Default)]
pub struct NodeStage {
    pub nodes: Vec<ValidatedNode>,
    pub ids: HashSet<String>,
}

/// Validate the raw `nodes` field.
///
/// Per element, checks run in this order: object, `id`, duplicate id,
/// `type`, `position` (x, y), `measured` (width, height), `data`.
pub fn validate_nodes(raw_nodes: &RawValue) -> Result<NodeStage, ValidationError> {
    let items = as_sequence(raw_nodes, "nodes")?;

    let mut out = NodeStage {
        nodes: Vec::with_capacity(items.len()),
        ids: HashSet::with_capacity(items.len()),
    };

    for (idx, item) in items.iter().enumerate() {
        let path = format!("nodes[{idx}]");
        let node = validate_node(item, &path, &out.ids)?;
        out.ids.insert(node.id.clone());
        out.nodes.push(node);
    }

    Ok(out)
}

fn validate_node(
    item: &Value,
    path: &str,
    seen: &HashSet<String>,
) -> Result<ValidatedNode, ValidationError> {
    let obj = as_object(item, path)?;

    let id_path = format!("{path}.id");
    let id = as_str(field(obj, "id"), &id_path)?;
    if seen.contains(id) {
        return Err(ValidationError::Duplicate {
            collection: Collection::Nodes,
            path: id_path,
            id: id.to_string(),
        });
    }

    let kind = node_kind(obj, path)?;

    let (x, y) = number_pair(obj, path, "position", ("x", "y"))?;
    let (width, height) = number_pair(obj, path, "measured", ("width", "height"))?;

    let data = optional_payload(obj, "data", &format!("{path}.data"))?.unwrap_or_default();

    Ok(ValidatedNode {
        id: id.to_string(),
        kind,
        data,
        position: Position { x, y },
        measured: Measured { width, height },
    })
}

fn node_kind(obj: &Map<String, Value>, path: &str) -> Result<NodeKind, ValidationError> {
    let type_path = format!("{path}.type");
    let raw = obj
        .get("type")
        .ok_or_else(|| ValidationError::shape(&type_path, Expected::Present))?;

    raw.as_str()
        .and_then(NodeKind::parse)
        .ok_or_else(|| ValidationError::shape(type_path, Expected::OneOf(NodeKind::NAMES)))
}

/// Read a required sub-object holding two numeric fields.
fn number_pair(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    (first, second): (&str, &str),
) -> Result<(f64, f64), ValidationError> {
    let key_path = format!("{path}.{key}");
    let inner = obj
        .get(key)
        .ok_or_else(|| ValidationError::shape(&key_path, Expected::Present))?;
    let inner = as_object(inner, &key_path)?;

    let a = as_number(field(inner, first), &format!("{key_path}.{first}"))?;
    let b = as_number(field(inner, second), &format!("{key_path}.{second}"))?;
    Ok((a, b))
}
