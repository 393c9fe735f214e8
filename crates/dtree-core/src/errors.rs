//! Error types for dtree-core.
//!
//! Two layers:
//! - `ValidationError`: why an untrusted document was rejected. These are
//!   client errors; hosts surface `kind()` and the message and never treat
//!   them as faults.
//! - `DtreeError`: everything else the crate can fail with (payload limits,
//!   malformed JSON, serialization, configuration), plus a wrapper around
//!   `ValidationError` for helpers that parse and validate in one call.

use std::fmt;

use thiserror::Error;

pub type DtreeResult<T> = Result<T, DtreeError>;

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Shape,
    Duplicate,
    Reference,
    SelfLoop,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Duplicate => "duplicate",
            Self::Reference => "reference",
            Self::SelfLoop => "self_loop",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a field was expected to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Sequence,
    Object,
    String,
    Number,
    Boolean,
    /// Boolean if the key is present at all.
    OptionalBoolean,
    /// Only presence is required.
    Present,
    /// One of a closed list of tags.
    OneOf(&'static [&'static str]),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => f.write_str("must be a sequence"),
            Self::Object => f.write_str("must be an object"),
            Self::String => f.write_str("must be a string"),
            Self::Number => f.write_str("must be a number"),
            Self::Boolean => f.write_str("must be a boolean"),
            Self::OptionalBoolean => f.write_str("must be a boolean when present"),
            Self::Present => f.write_str("is required"),
            Self::OneOf(tags) => write!(f, "must be one of [{}]", tags.join(" ")),
        }
    }
}

/// Which id collection a duplicate was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Nodes,
    Edges,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::Edges => "edges",
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            Self::Nodes => "node",
            Self::Edges => "edge",
        }
    }
}

/// Which end of an edge a reference error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

/// First violation found while validating a decision tree document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{path} {expected}")]
    Shape { path: String, expected: Expected },

    #[error("duplicate {} id {id}", .collection.singular())]
    Duplicate {
        collection: Collection,
        path: String,
        id: String,
    },

    #[error("unknown {} node {id}", .endpoint.as_str())]
    Reference {
        endpoint: Endpoint,
        path: String,
        id: String,
    },

    #[error("edge {edge_id} has identical source and target")]
    SelfLoop { path: String, edge_id: String },
}

impl ValidationError {
    pub fn shape(path: impl Into<String>, expected: Expected) -> Self {
        Self::Shape {
            path: path.into(),
            expected,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Shape { .. } => ErrorKind::Shape,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::Reference { .. } => ErrorKind::Reference,
            Self::SelfLoop { .. } => ErrorKind::SelfLoop,
        }
    }

    /// Dotted path of the offending field, e.g. `edges[1].target`.
    pub fn path(&self) -> &str {
        match self {
            Self::Shape { path, .. }
            | Self::Duplicate { path, .. }
            | Self::Reference { path, .. }
            | Self::SelfLoop { path, .. } => path,
        }
    }

    /// The identifier the error is about, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Shape { .. } => None,
            Self::Duplicate { id, .. } | Self::Reference { id, .. } => Some(id),
            Self::SelfLoop { edge_id, .. } => Some(edge_id),
        }
    }
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum DtreeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid decision tree: {0}")]
    Validation(#[from] ValidationError),
}

impl DtreeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// The validation error, when this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_messages() {
        let e = ValidationError::shape("viewport.zoom", Expected::Number);
        assert_eq!(e.to_string(), "viewport.zoom must be a number");
        assert_eq!(e.kind(), ErrorKind::Shape);
        assert_eq!(e.path(), "viewport.zoom");
        assert_eq!(e.id(), None);

        let e = ValidationError::shape("nodes[0].type", Expected::Present);
        assert_eq!(e.to_string(), "nodes[0].type is required");

        let e = ValidationError::shape("nodes[0].type", Expected::OneOf(&["a", "b"]));
        assert_eq!(e.to_string(), "nodes[0].type must be one of [a b]");
    }

    #[test]
    fn identifier_messages() {
        let e = ValidationError::Duplicate {
            collection: Collection::Nodes,
            path: "nodes[1].id".into(),
            id: "a".into(),
        };
        assert_eq!(e.to_string(), "duplicate node id a");
        assert_eq!(e.id(), Some("a"));

        let e = ValidationError::Reference {
            endpoint: Endpoint::Target,
            path: "edges[0].target".into(),
            id: "b".into(),
        };
        assert_eq!(e.to_string(), "unknown target node b");
        assert_eq!(e.kind().as_str(), "reference");

        let e = ValidationError::SelfLoop {
            path: "edges[0]".into(),
            edge_id: "e1".into(),
        };
        assert_eq!(e.to_string(), "edge e1 has identical source and target");
    }

    #[test]
    fn dtree_error_wraps_validation() {
        let e: DtreeError = ValidationError::shape("tree", Expected::Object).into();
        assert_eq!(e.as_validation().map(|v| v.kind()), Some(ErrorKind::Shape));
        assert!(e.to_string().contains("tree must be an object"));
    }
}
