//! dtree-core
//!
//! Core engine for dtree:
//! - Decision tree models (nodes, edges, viewport)
//! - Structural validation and sanitization of untrusted tree documents
//! - Size-limited JSON parsing helpers
//! - Canonical JSON encoding and tree fingerprints
//!
//! The crate performs no I/O and holds no global state.

pub mod config;
pub mod determinism;
pub mod errors;
pub mod model;
pub mod parse;
pub mod validate;

pub use crate::errors::{DtreeError, DtreeResult, ErrorKind, ValidationError};
pub use crate::validate::validate_tree;

/// Domain separation labels.
/// These must remain stable across versions.
pub mod domain {
    pub const TREE: &str = "dtree.v1.tree";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{CoreConfig, LimitsConfig};
    pub use crate::determinism::tree_fingerprint;
    pub use crate::errors::{Collection, Endpoint, ErrorKind, Expected, ValidationError};
    pub use crate::model::{
        EdgeKind, Measured, NodeKind, Position, RawValue, ValidatedEdge, ValidatedNode,
        ValidatedTree, ValidatedViewport,
    };
    pub use crate::parse::{parse_json_bytes, parse_tree_bytes};
    pub use crate::validate::{validate_edges, validate_nodes, validate_tree, validate_viewport};
    pub use crate::{DtreeError, DtreeResult};
}
