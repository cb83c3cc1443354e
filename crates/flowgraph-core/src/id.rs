//! Stable ID newtypes for graph entities.
//!
//! All IDs are distinct newtype wrappers over `u32`, providing type safety
//! so that a `NodeId` cannot be accidentally used where a `BlockId` is
//! expected. IDs are allocated monotonically by [`FlowGraph`] builder
//! methods and are never reused.
//!
//! [`FlowGraph`]: crate::graph::FlowGraph

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier, unique within one function's graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Opaque handle for a basic block, used as the lookup key into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

// Display implementations -- just print the inner value.

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(format!("{}", NodeId(7)), "7");
    }

    #[test]
    fn block_id_display() {
        assert_eq!(format!("{}", BlockId(0)), "0");
    }

    #[test]
    fn id_types_are_distinct() {
        // Compile-time guarantee; just verify the inner values are independent.
        let node = NodeId(1);
        let block = BlockId(1);
        assert_eq!(node.0, block.0);
    }

    #[test]
    fn serde_roundtrip() {
        let node = NodeId(42);
        let json = serde_json::to_string(&node).unwrap();
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);

        let block = BlockId(9);
        let json = serde_json::to_string(&block).unwrap();
        let back: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
