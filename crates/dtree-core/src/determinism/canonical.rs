//! Canonical JSON encoding.
//!
//! Rules:
//! - object keys sorted by byte order, recursively
//! - no insignificant whitespace
//! - strings escaped exactly as `serde_json` escapes them
//! - numbers printed in `serde_json`'s shortest round-trip form
//!
//! Default `serde_json::to_vec` is not canonical (key order follows the map
//! implementation), so hashing must go through this module.

use itertools::Itertools;
use serde_json::Value;

use crate::errors::{DtreeError, DtreeResult};

/// Encode a JSON value in canonical form.
pub fn canonical_json_string(value: &Value) -> DtreeResult<String> {
    let mut out = String::new();
    write_value(value, &mut out)?;
    Ok(out)
}

pub fn canonical_json_bytes(value: &Value) -> DtreeResult<Vec<u8>> {
    canonical_json_string(value).map(String::into_bytes)
}

fn write_value(value: &Value, out: &mut String) -> DtreeResult<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(s, out)?,
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().sorted_by(|a, b| a.0.cmp(b.0)).enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(k, out)?;
                out.push(':');
                write_value(v, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(s: &str, out: &mut String) -> DtreeResult<()> {
    let escaped = serde_json::to_string(s)
        .map_err(|e| DtreeError::serialization(format!("failed to encode string: {e}")))?;
    out.push_str(&escaped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_sorted_recursively() {
        let v = json!({ "b": 1, "a": { "z": [true, null], "y": "q\"" } });
        assert_eq!(
            canonical_json_string(&v).unwrap(),
            r#"{"a":{"y":"q\"","z":[true,null]},"b":1}"#
        );
    }

    #[test]
    fn key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"x":1,"y":{"p":2,"q":3}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y":{"q":3,"p":2},"x":1}"#).unwrap();
        assert_eq!(canonical_json_bytes(&a).unwrap(), canonical_json_bytes(&b).unwrap());
    }

    #[test]
    fn floats_keep_their_form() {
        let v = json!({ "x": 54.3, "n": 480, "f": 1.0 });
        assert_eq!(canonical_json_string(&v).unwrap(), r#"{"f":1.0,"n":480,"x":54.3}"#);
    }
}
