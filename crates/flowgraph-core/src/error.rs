//! Core error types for flowgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering all
//! anticipated failure modes of graph construction and contraction. Every
//! failure is local to one function's graph; the caller decides whether to
//! skip that function or abort.

use crate::id::{BlockId, NodeId};
use thiserror::Error;

/// Errors produced by the flowgraph-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A block handle was looked up that is absent from the graph.
    #[error("unknown block: BlockId({id})", id = id.0)]
    UnknownBlock { id: BlockId },

    /// A node ID was not found in any block of the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// A block contains no visible node and its chain of invisible nodes
    /// ends with no outgoing transfer, so there is nothing to resolve to.
    /// Signals malformed input.
    #[error("dead end: block BlockId({id}) has no visible node and no outgoing transfer", id = block.0)]
    DeadEnd { block: BlockId },

    /// Cross-block resolution revisited a block already on the current
    /// resolution path.
    #[error("cycle detected: resolution re-entered block BlockId({id})", id = block.0)]
    CycleDetected { block: BlockId },
}
