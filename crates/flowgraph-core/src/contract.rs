//! The contraction engine: collapses chains of invisible nodes into direct
//! edges between visible nodes.
//!
//! [`contract`] runs a block-local backward pass over every block and a
//! cross-block recursive resolver ([`resolve_first_visible`]) to populate
//! each visible node's outgoing display edges. After contraction, every
//! edge connects two visible nodes; invisible nodes (loads, casts,
//! unconditional jumps, whole pass-through blocks) are fully elided.
//!
//! Each block's contraction mutates only that block's own nodes, and
//! cross-block resolution reads only node labels and transfer targets,
//! never edges. Blocks can therefore be processed in any order without one
//! block observing another's partial results.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::block::Block;
use crate::edge::Edge;
use crate::error::GraphError;
use crate::graph::FlowGraph;
use crate::id::{BlockId, NodeId};

/// Summary of one function's contraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionReport {
    /// Number of blocks processed.
    pub blocks_processed: usize,
    /// Number of display edges added across all nodes.
    pub edges_added: usize,
    /// Number of invisible nodes that had more than one transfer target
    /// and were collapsed to a single successor. Each occurrence is lossy
    /// (a true branch narrowed to one path) and is logged as a warning.
    pub ambiguous_transfers: usize,
}

/// An edge computed by the planning pass, waiting to be applied to its
/// source node.
struct PendingEdge {
    source: NodeId,
    edge: Edge,
}

/// Contracts every block of the graph, populating the visible nodes'
/// outgoing display edges.
///
/// Fails on the first structural error: a transfer to a block absent from
/// the graph ([`GraphError::UnknownBlock`]), an all-invisible block with no
/// outgoing transfer ([`GraphError::DeadEnd`]), or a resolution path that
/// revisits a block ([`GraphError::CycleDetected`]). A failure abandons the
/// whole function's contraction; the caller decides whether to skip the
/// function or abort.
pub fn contract(graph: &mut FlowGraph) -> Result<ContractionReport, GraphError> {
    let mut report = ContractionReport::default();
    let block_ids: Vec<BlockId> = graph.block_ids().collect();

    for id in block_ids {
        // Plan against the immutable graph, then apply to this block's own
        // nodes. The resolver never reads edges, so per-block apply order
        // cannot change any later block's plan.
        let pending = plan_block(graph, id, &mut report)?;
        for PendingEdge { source, edge } in pending {
            let node = graph
                .node_mut(source)
                .ok_or(GraphError::NodeNotFound { id: source })?;
            if node.add_edge(edge) {
                report.edges_added += 1;
            }
        }
        report.blocks_processed += 1;
    }

    Ok(report)
}

/// Block-local contraction: computes the display edges for one block.
///
/// Walks the node sequence backwards, tracking the ID of the next visible
/// node seen so far. Walking backward lets each node discover its successor
/// before being visited -- edges point forward, but the "next visible
/// thing" is only known once the suffix of the block has been resolved.
///
/// Transfer targets are authoritative over fallthrough: a node that
/// carries any is linked (or, if invisible, degenerates) through them,
/// regardless of what follows it in the block.
fn plan_block(
    graph: &FlowGraph,
    id: BlockId,
    report: &mut ContractionReport,
) -> Result<Vec<PendingEdge>, GraphError> {
    let block = graph.block(id).ok_or(GraphError::UnknownBlock { id })?;

    let mut pending = Vec::new();
    let mut next_visible: Option<NodeId> = None;

    for node in block.nodes().iter().rev() {
        if !node.transfer_targets().is_empty() {
            if node.is_visible() {
                // Branch/switch/invoke node: one edge per transfer target,
                // each resolved to the first visible node of its chain.
                for (label, &target) in node.transfer_targets() {
                    let resolved = resolve_first_visible(graph, target)?;
                    pending.push(PendingEdge {
                        source: node.id(),
                        edge: Edge::to_id(resolved, label.clone()),
                    });
                }
                next_visible = Some(node.id());
            } else {
                // An invisible node with transfer targets (e.g. an
                // unconditional jump) degenerates to a single fallthrough
                // pointer. With more than one target this is lossy; the
                // lexicographically first transfer label is taken.
                if node.transfer_targets().len() > 1 {
                    report.ambiguous_transfers += 1;
                    warn!(
                        node = %node.id(),
                        block = %id,
                        targets = node.transfer_targets().len(),
                        "invisible node has multiple transfer targets; \
                         collapsing to the lexicographically first label"
                    );
                }
                let target = first_transfer(node.transfer_targets())
                    .expect("transfer_targets checked non-empty");
                next_visible = Some(resolve_first_visible(graph, target)?);
            }
        } else if node.is_visible() {
            // Plain instruction: link to the next visible node, then
            // become the anchor for earlier nodes.
            if let Some(next) = next_visible {
                pending.push(PendingEdge {
                    source: node.id(),
                    edge: Edge::to_id(next, ""),
                });
            }
            next_visible = Some(node.id());
        }
        // Invisible, no transfers: elided, next_visible unchanged.
    }

    Ok(pending)
}

/// Returns the ID of the first node that should be displayed when control
/// enters `target`.
///
/// Scans the block's nodes in order for a visible one; if the whole block
/// is invisible, recurses through the last node's transfer targets
/// (lexicographically first label when there are several). Fails with
/// [`GraphError::DeadEnd`] if an all-invisible block has no outgoing
/// transfer, and with [`GraphError::CycleDetected`] if the resolution path
/// revisits a block.
pub fn resolve_first_visible(graph: &FlowGraph, target: BlockId) -> Result<NodeId, GraphError> {
    let mut path = Vec::new();
    resolve_inner(graph, target, &mut path)
}

fn resolve_inner(
    graph: &FlowGraph,
    target: BlockId,
    path: &mut Vec<BlockId>,
) -> Result<NodeId, GraphError> {
    if path.contains(&target) {
        return Err(GraphError::CycleDetected { block: target });
    }
    path.push(target);

    let block: &Block = graph
        .block(target)
        .ok_or(GraphError::UnknownBlock { id: target })?;

    if let Some(node) = block.first_visible() {
        return Ok(node.id());
    }

    // The whole block is invisible. Follow the terminator's transfer, if
    // any. An empty block counts as a dead end too.
    let next = block
        .nodes()
        .last()
        .and_then(|last| first_transfer(last.transfer_targets()))
        .ok_or(GraphError::DeadEnd { block: target })?;

    resolve_inner(graph, next, path)
}

/// Selects a single transfer target deterministically: the one with the
/// lexicographically smallest transfer label. Insertion order and handle
/// identity play no part, keeping output reproducible.
fn first_transfer(targets: &indexmap::IndexMap<String, BlockId>) -> Option<BlockId> {
    targets
        .iter()
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, &id)| id)
}
