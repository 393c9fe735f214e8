use std::collections::HashSet;

use serde_json::{Map, Value};

use super::{as_object, as_sequence, as_str, field, optional_payload};
use crate::errors::{Collection, Endpoint, Expected, ValidationError};
use crate::model::{EdgeKind, RawValue, ValidatedEdge};

/// Validate the raw `edges` field against the ids accepted by the node stage.
///
/// Per element, checks run in this order: object, `id`, duplicate id,
/// `source`, `target`, self-loop, `animated`, `type`, `data`.
/// `known_node_ids` is only read.
pub fn validate_edges(
    raw_edges: &RawValue,
    known_node_ids: &HashSet<String>,
) -> Result<Vec<ValidatedEdge>, ValidationError> {
    let items = as_sequence(raw_edges, "edges")?;

    let mut edge_ids = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());

    for (idx, item) in items.iter().enumerate() {
        let path = format!("edges[{idx}]");
        let edge = validate_edge(item, &path, &edge_ids, known_node_ids)?;
        edge_ids.insert(edge.id.clone());
        out.push(edge);
    }

    Ok(out)
}

fn validate_edge(
    item: &Value,
    path: &str,
    seen: &HashSet<String>,
    known_node_ids: &HashSet<String>,
) -> Result<ValidatedEdge, ValidationError> {
    let obj = as_object(item, path)?;

    let id_path = format!("{path}.id");
    let id = as_str(field(obj, "id"), &id_path)?;
    if seen.contains(id) {
        return Err(ValidationError::Duplicate {
            collection: Collection::Edges,
            path: id_path,
            id: id.to_string(),
        });
    }

    let source = endpoint(obj, path, Endpoint::Source, known_node_ids)?;
    let target = endpoint(obj, path, Endpoint::Target, known_node_ids)?;

    if source == target {
        return Err(ValidationError::SelfLoop {
            path: path.to_string(),
            edge_id: id.to_string(),
        });
    }

    let animated = match obj.get("animated") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(ValidationError::shape(
                format!("{path}.animated"),
                Expected::OptionalBoolean,
            ))
        }
    };

    let kind = match obj.get("type") {
        None => None,
        Some(raw) => Some(
            raw.as_str()
                .and_then(EdgeKind::parse)
                .ok_or_else(|| {
                    ValidationError::shape(format!("{path}.type"), Expected::OneOf(EdgeKind::NAMES))
                })?,
        ),
    };

    let data = optional_payload(obj, "data", &format!("{path}.data"))?;

    Ok(ValidatedEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        animated,
        kind,
        data,
    })
}

fn endpoint<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    which: Endpoint,
    known_node_ids: &HashSet<String>,
) -> Result<&'a str, ValidationError> {
    let ep_path = format!("{path}.{}", which.as_str());
    let id = as_str(field(obj, which.as_str()), &ep_path)?;
    if !known_node_ids.contains(id) {
        return Err(ValidationError::Reference {
            endpoint: which,
            path: ep_path,
            id: id.to_string(),
        });
    }
    Ok(id)
}
