//! DOT (Graphviz) emission for contracted display graphs.
//!
//! Consumes a [`FlowGraph`] whose edges have been populated by
//! `flowgraph_core::contract` and renders the visible nodes as a `digraph`.
//! Only visible nodes are emitted; each node definition is followed by the
//! edges leading away from it, which DOT permits in any order.
//!
//! DOT identifiers cannot contain `.`, so graph names, node names, and
//! block-derived identifiers have every `.` replaced with `_`.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use flowgraph_core::{EdgeTarget, FlowGraph, Node, NodeKind};

/// Options controlling DOT output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Name of the emitted digraph, typically the function identifier.
    /// Sanitized for DOT before use.
    pub graph_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            graph_name: "flowgraph".into(),
        }
    }
}

/// Renders a contracted graph as a DOT digraph.
pub fn render(graph: &FlowGraph, options: &RenderOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "digraph {} {{", sanitize(&options.graph_name));

    for node in graph.visible_nodes() {
        emit_node(&mut out, graph, node);
    }

    out.push('}');
    out
}

/// Convenience wrapper: render with the given graph name.
pub fn render_named(graph: &FlowGraph, name: &str) -> String {
    render(
        graph,
        &RenderOptions {
            graph_name: name.into(),
        },
    )
}

/// Emits one node definition and its outgoing edges.
///
/// Format:
/// ```text
/// ident [label="..." shape=...]
/// ident -> target[label="..."]
/// ```
fn emit_node(out: &mut String, graph: &FlowGraph, node: &Node) {
    let ident = sanitize(&node.identifier());

    let _ = writeln!(
        out,
        "{} [label=\"{}\" shape={}]",
        ident,
        escape(&node.label),
        shape(node)
    );

    for edge in node.edges() {
        let target = match &edge.target {
            // Route ID targets through the target node's emitted
            // identifier so edges to named nodes do not dangle.
            EdgeTarget::Id(id) => match graph.node(*id) {
                Some(target) => sanitize(&target.identifier()),
                None => id.to_string(),
            },
            EdgeTarget::Name(name) => sanitize(name),
        };
        let _ = writeln!(out, "{} -> {}[label=\"{}\"]", ident, target, escape(&edge.label));
    }
}

/// Shape for a node. A visible node with no outgoing edges is terminal,
/// whatever kind the decoder assigned.
fn shape(node: &Node) -> &'static str {
    let kind = if node.edges().is_empty() {
        NodeKind::End
    } else {
        node.kind
    };
    match kind {
        NodeKind::Start | NodeKind::End => "none",
        NodeKind::Decision => "diamond",
        NodeKind::Activity => "box",
    }
}

/// DOT identifiers cannot contain '.'.
fn sanitize(identifier: &str) -> String {
    identifier.replace('.', "_")
}

/// Escapes a label for embedding between double quotes.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgraph_core::contract;

    fn two_node_graph() -> FlowGraph {
        let mut graph = FlowGraph::new();
        let entry = graph.add_block("entry");
        let a = graph.add_node(entry, "a").unwrap();
        graph.node_mut(a).unwrap().kind = NodeKind::Start;
        graph.add_node(entry, "").unwrap();
        graph.add_node(entry, "b").unwrap();
        contract(&mut graph).unwrap();
        graph
    }

    #[test]
    fn renders_visible_nodes_and_edges_only() {
        let graph = two_node_graph();
        let dot = render_named(&graph, "demo");

        assert!(dot.starts_with("digraph demo {\n"));
        assert!(dot.ends_with("}"));
        assert!(dot.contains("0 [label=\"a\" shape=none]"));
        assert!(dot.contains("0 -> 2[label=\"\"]"));
        // Terminal node: no edges, so shape falls back to none.
        assert!(dot.contains("2 [label=\"b\" shape=none]"));
        // The invisible node (id 1) appears nowhere.
        assert!(!dot.contains("\n1 "));
    }

    #[test]
    fn decision_node_renders_diamond_with_branch_labels() {
        let mut graph = FlowGraph::new();
        let entry = graph.add_block("entry");
        let then_b = graph.add_block("then");
        let else_b = graph.add_block("else");

        let d = graph.add_node(entry, "x == y").unwrap();
        graph.node_mut(d).unwrap().kind = NodeKind::Decision;
        graph.node_mut(d).unwrap().add_transfer("true", then_b);
        graph.node_mut(d).unwrap().add_transfer("false", else_b);
        graph.add_node(then_b, "f").unwrap();
        graph.add_node(else_b, "g").unwrap();
        contract(&mut graph).unwrap();

        let dot = render_named(&graph, "cond");
        assert!(dot.contains("0 [label=\"x == y\" shape=diamond]"));
        assert!(dot.contains("0 -> 1[label=\"true\"]"));
        assert!(dot.contains("0 -> 2[label=\"false\"]"));
    }

    #[test]
    fn named_node_uses_sanitized_name_as_identifier() {
        let mut graph = FlowGraph::new();
        let entry = graph.add_block("entry");
        let start = graph.add_node(entry, "void do.work()").unwrap();
        graph.node_mut(start).unwrap().name = Some("do.work".into());
        graph.add_node(entry, "ret").unwrap();
        contract(&mut graph).unwrap();

        let dot = render_named(&graph, "named");
        // Name sanitized, used as the node identifier.
        assert!(dot.contains("do_work [label=\"void do.work()\" shape=box]"));
        assert!(dot.contains("do_work -> 1[label=\"\"]"));
    }

    #[test]
    fn graph_name_is_sanitized() {
        let graph = FlowGraph::new();
        let dot = render_named(&graph, "lib.module.func");
        assert!(dot.starts_with("digraph lib_module_func {"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut graph = FlowGraph::new();
        let b = graph.add_block("entry");
        graph.add_node(b, "say \"hi\"\nthen stop").unwrap();

        let dot = render_named(&graph, "esc");
        assert!(dot.contains("[label=\"say \\\"hi\\\"\\nthen stop\""));
    }

    #[test]
    fn empty_graph_renders_header_and_footer() {
        let graph = FlowGraph::new();
        assert_eq!(render_named(&graph, "empty"), "digraph empty {\n}");
    }

    #[test]
    fn options_serde_roundtrip() {
        let options = RenderOptions {
            graph_name: "main".into(),
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: RenderOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.graph_name, "main");
    }
}
