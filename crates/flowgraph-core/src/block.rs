//! Basic blocks: ordered, owned sequences of nodes.
//!
//! A [`Block`] owns the nodes decoded from one source basic block, in
//! instruction execution order. Insertion order is significant: the
//! contraction engine's backward pass and the cross-block resolver both
//! depend on it.

use serde::{Deserialize, Serialize};

use crate::id::BlockId;
use crate::node::Node;

/// One basic block of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    /// The basic block's name (e.g. "entry", "for.cond").
    pub label: String,
    nodes: Vec<Node>,
}

impl Block {
    /// Creates an empty block.
    pub fn new(id: BlockId, label: impl Into<String>) -> Self {
        Block {
            id,
            label: label.into(),
            nodes: Vec::new(),
        }
    }

    /// The block's handle.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Appends a node in execution order.
    pub fn append_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// The nodes in execution order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn node_mut(&mut self, pos: usize) -> Option<&mut Node> {
        self.nodes.get_mut(pos)
    }

    /// Returns the first node with a non-empty label, if any.
    pub fn first_visible(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_visible())
    }
}
