//! Request body handling for decision tree endpoints.
//!
//! Bodies arrive as untyped JSON. The `tree` field is validated and
//! sanitized here before any handler sees it, so nothing downstream ever
//! holds an unchecked tree.

use dtree_core::model::ValidatedTree;
use dtree_core::validate_tree;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const MAX_NAME_CHARS: usize = 128;

fn body_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::bad_request("request body must be a JSON object"))
}

/// Pull and validate the `tree` field.
///
/// Absent is an error when `required`, otherwise `Ok(None)`.
pub fn extract_tree(body: &Value, required: bool) -> Result<Option<ValidatedTree>, ApiError> {
    let obj = body_object(body)?;

    match obj.get("tree") {
        None if required => Err(ApiError::bad_request(
            "The \"tree\" field must have a value",
        )),
        None => Ok(None),
        Some(raw) => Ok(Some(validate_tree(raw)?)),
    }
}

/// Pull the `name` field: a string of 1..=128 characters.
pub fn extract_name(body: &Value, required: bool) -> Result<Option<String>, ApiError> {
    let obj = body_object(body)?;

    let raw = match obj.get("name") {
        None if required => {
            return Err(ApiError::bad_request("The \"name\" field must have a value"))
        }
        None => return Ok(None),
        Some(raw) => raw,
    };

    let name = raw
        .as_str()
        .ok_or_else(|| ApiError::bad_request("The \"name\" field must be a string"))?;

    let chars = name.chars().count();
    if chars == 0 || chars > MAX_NAME_CHARS {
        return Err(ApiError::bad_request(format!(
            "The \"name\" field must be between 1 and {MAX_NAME_CHARS} characters"
        )));
    }

    Ok(Some(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!({ "nodes": [], "edges": [], "viewport": { "x": 0, "y": 0, "zoom": 1 } })
    }

    #[test]
    fn tree_required_on_create() {
        let e = extract_tree(&json!({ "name": "x" }), true).unwrap_err();
        assert_eq!(e.to_string(), "The \"tree\" field must have a value");
        assert!(extract_tree(&json!({ "name": "x" }), false).unwrap().is_none());
    }

    #[test]
    fn tree_is_validated() {
        let ok = extract_tree(&json!({ "tree": tree() }), true).unwrap();
        assert!(ok.is_some());

        let e = extract_tree(&json!({ "tree": "{}" }), false).unwrap_err();
        assert_eq!(e.kind(), "shape");
        assert_eq!(e.to_string(), "tree must be an object");
    }

    #[test]
    fn body_must_be_object() {
        assert!(extract_tree(&json!([tree()]), false).is_err());
        assert!(extract_name(&Value::Null, false).is_err());
    }

    #[test]
    fn name_rules() {
        assert_eq!(
            extract_name(&json!({ "name": "Launch plan" }), true).unwrap().as_deref(),
            Some("Launch plan")
        );
        assert!(extract_name(&json!({}), true).is_err());
        assert!(extract_name(&json!({}), false).unwrap().is_none());
        assert!(extract_name(&json!({ "name": "" }), true).is_err());
        assert_eq!(
            extract_name(&json!({ "name": "   " }), true).unwrap().as_deref(),
            Some("   ")
        );
        assert!(extract_name(&json!({ "name": 7 }), true).is_err());
        assert!(extract_name(&json!({ "name": "x".repeat(129) }), true).is_err());
        assert!(extract_name(&json!({ "name": "é".repeat(128) }), true).is_ok());
    }
}
