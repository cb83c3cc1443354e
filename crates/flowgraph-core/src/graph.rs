//! FlowGraph: the per-function container of blocks and nodes.
//!
//! [`FlowGraph`] is the single entry point for constructing and querying
//! one function's display graph. It owns the blocks (keyed by [`BlockId`]
//! in insertion order), allocates node and block IDs monotonically, and
//! maintains a node index so contraction can address any node in O(1).
//!
//! Lifecycle: the decoder builds the graph through `add_block` /
//! `add_node` while walking the source function; the contraction engine
//! then mutates only each node's `edges`; the emitter finally consumes the
//! visible nodes. Block and node membership is fixed once contraction
//! begins -- there is no removal API.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::GraphError;
use crate::id::{BlockId, NodeId};
use crate::node::Node;

/// The display graph of a single function, prior to and after contraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Blocks in decode order, keyed by handle.
    blocks: IndexMap<BlockId, Block>,
    /// Node ID to (owning block, position within block).
    node_index: HashMap<NodeId, (BlockId, usize)>,
    next_block_id: u32,
    next_node_id: u32,
}

impl FlowGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        FlowGraph::default()
    }

    // -----------------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------------

    /// Adds an empty block with the given label, returning its handle.
    pub fn add_block(&mut self, label: impl Into<String>) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;
        self.blocks.insert(id, Block::new(id, label));
        id
    }

    /// Appends a node to a block, allocating the next node ID.
    ///
    /// An empty label makes the node invisible. Errors if the block does
    /// not exist.
    pub fn add_node(
        &mut self,
        block: BlockId,
        label: impl Into<String>,
    ) -> Result<NodeId, GraphError> {
        let blk = self
            .blocks
            .get_mut(&block)
            .ok_or(GraphError::UnknownBlock { id: block })?;

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        let pos = blk.nodes().len();
        blk.append_node(Node::new(id, label));
        self.node_index.insert(id, (block, pos));
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Looks up a block by handle.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Looks up a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let &(block, pos) = self.node_index.get(&id)?;
        self.blocks.get(&block)?.nodes().get(pos)
    }

    /// Looks up a node by ID (mutable, e.g. for setting its name, kind, or
    /// transfer targets after creation, and for the engine to add edges).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let &(block, pos) = self.node_index.get(&id)?;
        self.blocks.get_mut(&block)?.node_mut(pos)
    }

    /// All block handles in decode order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.keys().copied()
    }

    /// All blocks in decode order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// All nodes, in block decode order then in-block execution order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.blocks.values().flat_map(|b| b.nodes().iter())
    }

    /// All visible nodes, in the same order as [`nodes`](Self::nodes).
    pub fn visible_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_visible())
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of nodes across all blocks.
    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }
}
