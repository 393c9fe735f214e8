//! Parsing helpers for decision tree inputs.
//!
//! These operate on in-memory bytes only; callers do the I/O.
//!
//! - strict JSON parsing with a size limit
//! - parse + validate in one call for hosts that hold raw bytes

use crate::config::LimitsConfig;
use crate::errors::{DtreeError, DtreeResult};
use crate::model::{RawValue, ValidatedTree};
use crate::validate::validate_tree;

/// Parse JSON bytes into a `RawValue` with a hard size limit.
pub fn parse_json_bytes(bytes: &[u8], max_bytes: usize) -> DtreeResult<RawValue> {
    if bytes.len() > max_bytes {
        return Err(DtreeError::invalid_argument(format!(
            "JSON payload too large ({} bytes > limit {})",
            bytes.len(),
            max_bytes
        )));
    }

    serde_json::from_slice(bytes)
        .map_err(|e| DtreeError::serialization(format!("failed to parse JSON: {e}")))
}

/// Parse JSON bytes and validate them as a decision tree.
pub fn parse_tree_bytes(bytes: &[u8], limits: &LimitsConfig) -> DtreeResult<ValidatedTree> {
    let raw = parse_json_bytes(bytes, limits.max_json_bytes)?;
    Ok(validate_tree(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn parse_json_bytes_respects_limit() {
        let bytes = br#"{"nodes":[]}"#;
        let v = parse_json_bytes(bytes, 1024).unwrap();
        assert!(v["nodes"].is_array());

        let err = parse_json_bytes(bytes, 1).err().unwrap();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = parse_json_bytes(b"{nodes:", 1024).unwrap_err();
        assert!(matches!(err, DtreeError::Serialization(_)));
    }

    #[test]
    fn parse_tree_bytes_validates() {
        let limits = LimitsConfig::default();
        let tree = parse_tree_bytes(
            br#"{"nodes":[],"edges":[],"viewport":{"x":0,"y":0,"zoom":1}}"#,
            &limits,
        )
        .unwrap();
        assert!(tree.nodes().is_empty());

        let err = parse_tree_bytes(br#"{"nodes":[],"edges":[]}"#, &limits).unwrap_err();
        assert_eq!(err.as_validation().map(|e| e.kind()), Some(ErrorKind::Shape));
    }
}
