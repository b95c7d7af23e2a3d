//! Layout types: Point, PositionedNode, LayoutResult.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::LayoutDirection;
use crate::graph::GraphNode;

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── PositionedNode ──────────────────────────────────────────────────────────

/// A graph node with its computed (or pinned) position.
///
/// Serializes as the node's exchange fields plus `x`, `y`, `level`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub x: f64,
    pub y: f64,
    /// BFS distance from the root of the traversal that reached the node.
    pub level: usize,
}

impl PositionedNode {
    pub fn id(&self) -> &str {
        self.node.id()
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ─── LayoutResult ────────────────────────────────────────────────────────────

/// The full output of one layout pass.
///
/// `nodes` keeps the graph's document order; `rows` holds node ids per level
/// in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutResult {
    /// Number of levels.
    pub levels: usize,
    pub nodes: Vec<PositionedNode>,
    #[serde(skip)]
    pub direction: LayoutDirection,
    #[serde(skip)]
    rows: Vec<Vec<String>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LayoutResult {
    pub(crate) fn new(nodes: Vec<PositionedNode>, rows: Vec<Vec<String>>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id().to_string(), i))
            .collect();
        Self {
            levels: rows.len(),
            nodes,
            direction: LayoutDirection::default(),
            rows,
            index,
        }
    }

    pub(crate) fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PositionedNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Node ids on `level`, in discovery order.
    pub fn row(&self, level: usize) -> &[String] {
        self.rows.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Override a node's coordinates, keeping its level. Returns false for
    /// unknown ids.
    pub(crate) fn place(&mut self, id: &str, point: Point) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.nodes[i].x = point.x;
                self.nodes[i].y = point.y;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
