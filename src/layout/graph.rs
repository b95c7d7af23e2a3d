//! GraphIR — a petgraph `DiGraph` view of a `PlaybookGraph` for layout.
//!
//! Nodes are inserted in document order and edges in edge-list order, so
//! `NodeIndex` and `EdgeIndex` order double as the tie-breakers the layout
//! needs.

use std::collections::HashMap;

use petgraph::Direction as EdgeDirection;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{GraphError, Result};
use crate::graph::{NodeKind, PlaybookGraph};

/// Node data stored in the petgraph DiGraph.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: String,
    pub kind: NodeKind,
}

/// Graph intermediate representation used by the layout engine.
pub struct GraphIR {
    /// Edge weights are the playbook edge ids.
    pub digraph: DiGraph<NodeData, String>,
    /// Maps node id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
}

impl GraphIR {
    /// Build the layout graph, rejecting duplicate node ids and edges whose
    /// endpoints are missing.
    pub fn from_playbook(graph: &PlaybookGraph) -> Result<Self> {
        let mut digraph: DiGraph<NodeData, String> =
            DiGraph::with_capacity(graph.node_count(), graph.edge_count());
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();

        for node in graph.nodes() {
            if node_index.contains_key(node.id()) {
                return Err(GraphError::DuplicateId {
                    id: node.id().to_string(),
                });
            }
            let idx = digraph.add_node(NodeData {
                id: node.id().to_string(),
                kind: node.kind(),
            });
            node_index.insert(node.id().to_string(), idx);
        }

        for edge in graph.edges() {
            let lookup = |id: &str| {
                node_index
                    .get(id)
                    .copied()
                    .ok_or_else(|| GraphError::InvalidGraph {
                        edge: edge.id.clone(),
                        missing: id.to_string(),
                    })
            };
            let from = lookup(&edge.source)?;
            let to = lookup(&edge.target)?;
            digraph.add_edge(from, to, edge.id.clone());
        }

        Ok(Self {
            digraph,
            node_index,
        })
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn id(&self, idx: NodeIndex) -> &str {
        &self.digraph[idx].id
    }

    /// Returns true if the graph is a directed acyclic graph (no cycles).
    pub fn is_dag(&self) -> bool {
        !is_cyclic_directed(&self.digraph)
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.digraph
            .edges_directed(idx, EdgeDirection::Incoming)
            .count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.digraph
            .edges_directed(idx, EdgeDirection::Outgoing)
            .count()
    }

    /// Nodes without incoming edges, in document order.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.digraph
            .node_indices()
            .filter(|&idx| self.in_degree(idx) == 0)
            .collect()
    }

    /// Successors of `idx`, one per outgoing edge, in edge-list order.
    ///
    /// petgraph walks adjacency lists newest-first, so the edges are sorted
    /// back into insertion order here.
    pub fn successors_in_order(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .digraph
            .edges_directed(idx, EdgeDirection::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        out.sort_by_key(|(edge, _)| *edge);
        out.into_iter().map(|(_, target)| target).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
