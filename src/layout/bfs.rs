//! Breadth-first level assignment and coordinate placement.
//!
//! Phases:
//!   1. BFS from every in-degree-0 node, in document order
//!   2. Fallback roots: each still-unplaced node, in document order, starts
//!      its own BFS (covers cycles and nodes only reachable from cycles)
//!   3. Coordinates from (level, index within level)

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use tracing::trace;

use super::graph::GraphIR;
use super::types::{LayoutResult, PositionedNode};
use crate::config::LayoutConfig;
use crate::graph::PlaybookGraph;

// ─── Level assignment ────────────────────────────────────────────────────────

/// Per-node levels plus the discovery order within each level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelAssignment {
    /// Level of each node, indexed by `NodeIndex::index()`.
    pub levels: Vec<usize>,
    /// Nodes per level, in discovery order.
    pub rows: Vec<Vec<NodeIndex>>,
}

impl LevelAssignment {
    pub fn level_of(&self, idx: NodeIndex) -> Option<usize> {
        self.levels.get(idx.index()).copied()
    }

    pub fn level_count(&self) -> usize {
        self.rows.len()
    }
}

/// Assign every node a level. Total over any graph: cycles, self-loops and
/// disconnected components included.
pub fn assign_levels(gir: &GraphIR) -> LevelAssignment {
    let mut walk = Walk {
        gir,
        levels: vec![None; gir.node_count()],
        rows: Vec::new(),
    };

    for root in gir.roots() {
        walk.bfs(root);
    }
    for idx in gir.digraph.node_indices() {
        if walk.levels[idx.index()].is_none() {
            trace!(node = gir.id(idx), "fallback root");
            walk.bfs(idx);
        }
    }

    LevelAssignment {
        // Both passes together visit every index.
        levels: walk.levels.into_iter().map(Option::unwrap_or_default).collect(),
        rows: walk.rows,
    }
}

struct Walk<'a> {
    gir: &'a GraphIR,
    levels: Vec<Option<usize>>,
    rows: Vec<Vec<NodeIndex>>,
}

impl Walk<'_> {
    fn place(&mut self, idx: NodeIndex, level: usize) {
        self.levels[idx.index()] = Some(level);
        if self.rows.len() <= level {
            self.rows.resize_with(level + 1, Vec::new);
        }
        self.rows[level].push(idx);
    }

    /// BFS from `root`. Nodes already placed keep their level.
    fn bfs(&mut self, root: NodeIndex) {
        if self.levels[root.index()].is_some() {
            return;
        }
        trace!(root = self.gir.id(root), "bfs");
        self.place(root, 0);
        let mut queue = VecDeque::from([(root, 0usize)]);
        while let Some((current, level)) = queue.pop_front() {
            for next in self.gir.successors_in_order(current) {
                if self.levels[next.index()].is_none() {
                    self.place(next, level + 1);
                    queue.push_back((next, level + 1));
                }
            }
        }
    }
}

// ─── Coordinate assignment ───────────────────────────────────────────────────

/// Turn levels into positioned nodes, keeping the graph's document order.
pub fn assign_coordinates(
    graph: &PlaybookGraph,
    gir: &GraphIR,
    assignment: &LevelAssignment,
    config: &LayoutConfig,
) -> LayoutResult {
    // (level, index within level) per node.
    let mut slots = vec![(0usize, 0usize); gir.node_count()];
    for (level, row) in assignment.rows.iter().enumerate() {
        for (order, idx) in row.iter().enumerate() {
            slots[idx.index()] = (level, order);
        }
    }

    // GraphIR inserts nodes in document order, so node i has NodeIndex i.
    let nodes = graph
        .nodes()
        .iter()
        .zip(slots)
        .map(|(node, (level, order))| {
            let (x, y) = config.position(level, order);
            PositionedNode {
                node: node.clone(),
                x,
                y,
                level,
            }
        })
        .collect();

    let rows = assignment
        .rows
        .iter()
        .map(|row| row.iter().map(|&idx| gir.id(idx).to_string()).collect())
        .collect();

    LayoutResult::new(nodes, rows).with_direction(config.direction)
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_bfs.rs"]
mod tests;
