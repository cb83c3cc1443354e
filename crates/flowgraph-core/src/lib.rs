//! Display graph contraction for compiled functions.
//!
//! A function arrives decomposed into basic blocks of instruction nodes,
//! some carrying a visible label and some invisible (pass-throughs such as
//! loads, casts, and unconditional jumps). This crate computes the
//! *contracted* display graph: every edge connects two visible nodes, with
//! chains of invisible nodes -- including chains crossing block boundaries
//! -- fully elided.
//!
//! # Modules
//!
//! - [`id`] -- Stable ID newtypes for nodes and blocks
//! - [`error`] -- Error types for all contraction failure modes
//! - [`edge`] -- Display edges and target references
//! - [`node`] -- Contractable nodes with labels and transfer targets
//! - [`block`] -- Ordered, owned node sequences per basic block
//! - [`graph`] -- The per-function [`FlowGraph`] container
//! - [`contract`] -- The contraction engine itself

pub mod block;
pub mod contract;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;

// Re-export commonly used types
pub use block::Block;
pub use contract::{contract, resolve_first_visible, ContractionReport};
pub use edge::{Edge, EdgeTarget};
pub use error::GraphError;
pub use graph::FlowGraph;
pub use id::{BlockId, NodeId};
pub use node::{Node, NodeKind};
