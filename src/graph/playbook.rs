//! `PlaybookGraph` — the owned, editable node/edge model.
//!
//! Mutations keep two invariants at all times: ids are unique, and every edge
//! endpoint names an existing node. A rejected mutation leaves the graph as
//! it was. Graphs read from the exchange format are not checked until
//! `validate()` (or a layout pass) looks at them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{GraphEdge, GraphNode, NodeDetails};
use crate::error::{GraphError, ParseError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookGraph {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

impl PlaybookGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from parts, rejecting anything that breaks the invariants.
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self> {
        let graph = Self { nodes, edges };
        graph.validate()?;
        Ok(graph)
    }

    /// Decode the JSON exchange format and validate it.
    pub fn from_json(src: &str) -> Result<Self, ParseError> {
        let graph: PlaybookGraph = serde_json::from_str(src)?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // ── Read access ──────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Edges leaving `id`, in edge-list order.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Edges entering `id`, in edge-list order.
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    // ── Mutation ─────────────────────────────────────────────────────────────

    pub fn add_node(&mut self, node: GraphNode) -> Result<()> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateId { id: node.id });
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<()> {
        if self.edge(&edge.id).is_some() {
            return Err(GraphError::DuplicateId { id: edge.id });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::DanglingEndpoint {
                    edge: edge.id.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Remove a node together with every edge that references it.
    ///
    /// Returns the removed node and the removed edges (in edge-list order).
    pub fn remove_node(&mut self, id: &str) -> Result<(GraphNode, Vec<GraphEdge>)> {
        let pos = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })?;
        let node = self.nodes.remove(pos);
        let (removed, kept): (Vec<GraphEdge>, Vec<GraphEdge>) =
            self.edges.drain(..).partition(|e| e.touches(id));
        self.edges = kept;
        debug!(node = id, cascaded = removed.len(), "removed node");
        Ok((node, removed))
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<GraphEdge> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GraphError::EdgeNotFound { id: id.to_string() })?;
        Ok(self.edges.remove(pos))
    }

    /// Replace a node's metadata. The node's kind cannot change.
    pub fn update_metadata(&mut self, id: &str, details: NodeDetails) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.kind() != details.kind() {
            return Err(GraphError::KindMismatch {
                id: id.to_string(),
                expected: node.kind(),
                found: details.kind(),
            });
        }
        node.details = details;
        Ok(())
    }

    pub fn set_label(&mut self, id: &str, label: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.label = label.into();
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut GraphNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })
    }

    // ── Id allocation ────────────────────────────────────────────────────────

    /// A `node_N` id not used by any node.
    pub fn next_node_id(&self) -> String {
        next_free_id("node", self.nodes.len(), |id| self.contains_node(id))
    }

    /// An `edge_N` id not used by any edge.
    pub fn next_edge_id(&self) -> String {
        next_free_id("edge", self.edges.len(), |id| self.edge(id).is_some())
    }

    // ── Validation ───────────────────────────────────────────────────────────

    /// Check id uniqueness and that every edge endpoint exists.
    pub fn validate(&self) -> Result<()> {
        let mut node_ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateId {
                    id: node.id.clone(),
                });
            }
        }
        let mut edge_ids: HashSet<&str> = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(GraphError::DuplicateId {
                    id: edge.id.clone(),
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(GraphError::InvalidGraph {
                        edge: edge.id.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn next_free_id(prefix: &str, start: usize, taken: impl Fn(&str) -> bool) -> String {
    let mut n = start;
    loop {
        let candidate = format!("{prefix}_{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_graph_playbook.rs"]
mod tests;
