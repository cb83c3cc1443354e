//! Display edges and their target references.
//!
//! An [`Edge`] is an immutable (target-reference, label) pair leading away
//! from a visible node in the contracted graph. The target is addressed
//! either by numeric node ID (the common case -- edges created by the
//! contraction engine always use IDs) or by a stable node name (used for
//! function-entry nodes).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Reference to the node an edge points at: a numeric node ID or a stable
/// node name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeTarget {
    /// Target addressed by node ID.
    Id(NodeId),
    /// Target addressed by node name.
    Name(String),
}

impl fmt::Display for EdgeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeTarget::Id(id) => write!(f, "{}", id),
            EdgeTarget::Name(name) => write!(f, "{}", name),
        }
    }
}

/// An outgoing display edge. Immutable once constructed.
///
/// The label is typically empty; decision nodes carry their branch labels
/// ("true"/"false" for conditionals, case values for switches).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The node this edge points to.
    pub target: EdgeTarget,
    /// Label drawn on the edge. Empty for plain sequential flow.
    pub label: String,
}

impl Edge {
    /// Creates an edge targeting a node by ID.
    pub fn to_id(target: NodeId, label: impl Into<String>) -> Self {
        Edge {
            target: EdgeTarget::Id(target),
            label: label.into(),
        }
    }

    /// Creates an edge targeting a node by name.
    pub fn to_name(target: impl Into<String>, label: impl Into<String>) -> Self {
        Edge {
            target: EdgeTarget::Name(target.into()),
            label: label.into(),
        }
    }
}
