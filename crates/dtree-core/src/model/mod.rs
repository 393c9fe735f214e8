//! Decision tree data models.
//!
//! These are the typed, sanitized shapes produced by `crate::validate`.
//! Inputs arrive as `RawValue` (an untyped JSON-like tree) and only become
//! a `ValidatedTree` after every node, edge and viewport field has been
//! checked.
//!
//! Notes on serde:
//! - Field names and kind tags serialize in the camelCase form the drawing
//!   client uses (`decisionNode`, `chanceToChanceEdge`, ...), so a tree can
//!   be sent back to the client and re-validated unchanged.
//! - `ValidatedTree` deliberately has no `Deserialize` impl. The only way
//!   to obtain one is through `validate_tree`.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

/// Untrusted input document.
///
/// `serde_json::Value` is already the closed sum type we need
/// (null, bool, number, string, sequence, mapping), so the engine matches
/// on its variants directly.
pub type RawValue = Value;

/// Opaque per-node / per-edge payload, passed through verbatim.
pub type Payload = Map<String, Value>;

/// Role of a vertex in a decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    DecisionNode,
    ChanceNode,
    EndpointNode,
    TextNode,
}

impl NodeKind {
    /// Wire tags of every accepted node kind, in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["decisionNode", "chanceNode", "endpointNode", "textNode"];

    pub const ALL: [NodeKind; 4] = [
        Self::DecisionNode,
        Self::ChanceNode,
        Self::EndpointNode,
        Self::TextNode,
    ];

    /// Resolve a wire tag. Matching is exact and case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "decisionNode" => Some(Self::DecisionNode),
            "chanceNode" => Some(Self::ChanceNode),
            "endpointNode" => Some(Self::EndpointNode),
            "textNode" => Some(Self::TextNode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecisionNode => "decisionNode",
            Self::ChanceNode => "chanceNode",
            Self::EndpointNode => "endpointNode",
            Self::TextNode => "textNode",
        }
    }
}

/// Role of an edge in a decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    DecisionEdge,
    ChanceToEndpointEdge,
    ChanceToChanceEdge,
}

impl EdgeKind {
    pub const NAMES: &'static [&'static str] =
        &["decisionEdge", "chanceToEndpointEdge", "chanceToChanceEdge"];

    pub const ALL: [EdgeKind; 3] = [
        Self::DecisionEdge,
        Self::ChanceToEndpointEdge,
        Self::ChanceToChanceEdge,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "decisionEdge" => Some(Self::DecisionEdge),
            "chanceToEndpointEdge" => Some(Self::ChanceToEndpointEdge),
            "chanceToChanceEdge" => Some(Self::ChanceToChanceEdge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecisionEdge => "decisionEdge",
            Self::ChanceToEndpointEdge => "chanceToEndpointEdge",
            Self::ChanceToChanceEdge => "chanceToChanceEdge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measured {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub data: Payload,
    pub position: Position,
    pub measured: Measured,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EdgeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedViewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// A structurally sound decision tree.
///
/// Invariants (established by `validate_tree`):
/// - node ids are unique
/// - edge ids are unique
/// - every edge endpoint names a node in `nodes`
/// - no edge has `source == target`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedTree {
    nodes: Vec<ValidatedNode>,
    edges: Vec<ValidatedEdge>,
    viewport: ValidatedViewport,
}

impl ValidatedTree {
    pub(crate) fn from_parts(
        nodes: Vec<ValidatedNode>,
        edges: Vec<ValidatedEdge>,
        viewport: ValidatedViewport,
    ) -> Self {
        Self {
            nodes,
            edges,
            viewport,
        }
    }

    pub fn nodes(&self) -> &[ValidatedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ValidatedEdge] {
        &self.edges
    }

    pub fn viewport(&self) -> &ValidatedViewport {
        &self.viewport
    }

    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn count_nodes(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Re-encode as an untyped document (the shape clients send).
    pub fn to_raw(&self) -> RawValue {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
