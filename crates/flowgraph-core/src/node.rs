//! Contractable graph nodes.
//!
//! Each [`Node`] corresponds to one source-level instruction. A node with a
//! non-empty label is *visible* (displayed in the output graph); a node
//! with an empty label is *invisible* (a pass-through such as a load, cast,
//! or unconditional jump) and is elided by contraction. The label is always
//! a defined string, never an absent value, so visibility checks never need
//! a separate presence check.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::edge::Edge;
use crate::id::{BlockId, NodeId};

/// Node kind, used by the emitter for shape selection. The contraction
/// engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// Begins a graph (function entry).
    Start,
    /// An operation that occurs.
    #[default]
    Activity,
    /// A branch in processing.
    Decision,
    /// Ends a graph.
    End,
}

/// A single contractable vertex of the display graph.
///
/// `transfer_targets` is the ordered mapping of transfer-label to target
/// block handle supplied by the instruction decoder (e.g. `{"true": A,
/// "false": B}` for a conditional branch, `{"": normal, "unwind": handler}`
/// for an invoke). `edges` is populated by the contraction engine and holds
/// at most one edge per distinct target reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    /// Display label; empty means invisible.
    pub label: String,
    /// Stable identifier used instead of the numeric ID when emitting.
    pub name: Option<String>,
    /// Shape hint for the emitter.
    pub kind: NodeKind,
    transfer_targets: IndexMap<String, BlockId>,
    edges: SmallVec<[Edge; 2]>,
}

impl Node {
    /// Creates a node with the given ID and display label. An empty label
    /// makes the node invisible.
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Node {
            id,
            label: label.into(),
            name: None,
            kind: NodeKind::default(),
            transfer_targets: IndexMap::new(),
            edges: SmallVec::new(),
        }
    }

    /// The unique ID assigned at creation time.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns `true` if this node has a non-empty label and will be
    /// displayed in the output graph.
    pub fn is_visible(&self) -> bool {
        !self.label.is_empty()
    }

    /// Records an outgoing control transfer to another block. Later
    /// insertions with the same label overwrite the earlier target.
    pub fn add_transfer(&mut self, label: impl Into<String>, target: BlockId) {
        self.transfer_targets.insert(label.into(), target);
    }

    /// The ordered transfer-label to block-handle mapping.
    pub fn transfer_targets(&self) -> &IndexMap<String, BlockId> {
        &self.transfer_targets
    }

    /// Adds an outgoing display edge. Each edge from the node must lead to
    /// a distinct target, so inserting an edge whose target already exists
    /// is a no-op. Returns `true` if the edge was inserted.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if self.edges.iter().any(|e| e.target == edge.target) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// The outgoing display edges computed by contraction.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The identifier to emit for this node: its name if one is assigned
    /// (in practice, only function-entry nodes have names), else its
    /// numeric ID.
    pub fn identifier(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_label_is_invisible() {
        let node = Node::new(NodeId(0), "");
        assert!(!node.is_visible());

        let node = Node::new(NodeId(1), "x := 3");
        assert!(node.is_visible());
    }

    #[test]
    fn duplicate_edge_target_is_noop() {
        let mut node = Node::new(NodeId(0), "call foo");
        assert!(node.add_edge(Edge::to_id(NodeId(4), "")));
        assert!(!node.add_edge(Edge::to_id(NodeId(4), "true")));
        assert_eq!(node.edges().len(), 1);
        // The first insertion wins, including its label.
        assert_eq!(node.edges()[0].label, "");
    }

    #[test]
    fn edges_to_distinct_targets_accumulate() {
        let mut node = Node::new(NodeId(0), "i < 10");
        node.add_edge(Edge::to_id(NodeId(1), "true"));
        node.add_edge(Edge::to_id(NodeId(2), "false"));
        assert_eq!(node.edges().len(), 2);
    }

    #[test]
    fn transfer_targets_keep_insertion_order() {
        let mut node = Node::new(NodeId(0), "");
        node.add_transfer("true", BlockId(1));
        node.add_transfer("false", BlockId(2));
        let labels: Vec<&str> = node.transfer_targets().keys().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["true", "false"]);
    }

    #[test]
    fn transfer_relabel_overwrites() {
        let mut node = Node::new(NodeId(0), "");
        node.add_transfer("default", BlockId(1));
        node.add_transfer("default", BlockId(2));
        assert_eq!(node.transfer_targets().len(), 1);
        assert_eq!(node.transfer_targets()["default"], BlockId(2));
    }

    #[test]
    fn identifier_prefers_name() {
        let mut node = Node::new(NodeId(17), "int main()");
        assert_eq!(node.identifier(), "17");
        node.name = Some("main".into());
        assert_eq!(node.identifier(), "main");
        node.name = Some(String::new());
        assert_eq!(node.identifier(), "17");
    }

    #[test]
    fn default_kind_is_activity() {
        let node = Node::new(NodeId(0), "store");
        assert_eq!(node.kind, NodeKind::Activity);
    }

    #[test]
    fn serde_roundtrip() {
        let mut node = Node::new(NodeId(3), "x == y");
        node.kind = NodeKind::Decision;
        node.add_transfer("true", BlockId(1));
        node.add_transfer("false", BlockId(2));
        node.add_edge(Edge::to_id(NodeId(9), "true"));

        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
