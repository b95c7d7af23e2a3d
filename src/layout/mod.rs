//! Layout engine — breadth-first auto-layout of playbook graphs.
//!
//! Every node gets exactly one `(x, y, level)`. Layout is a pure function of
//! the graph's node/edge order and the config; it fails only on a graph with
//! a duplicated node id or an edge pointing at a missing node.

pub mod bfs;
pub mod graph;
pub mod session;
pub mod types;

pub use bfs::{LevelAssignment, assign_coordinates, assign_levels};
pub use graph::GraphIR;
pub use session::LayoutSession;
pub use types::{LayoutResult, Point, PositionedNode};

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::PlaybookGraph;

/// Run the layout with default spacing and top-down flow.
pub fn auto_layout(graph: &PlaybookGraph) -> Result<LayoutResult> {
    auto_layout_with_config(graph, &LayoutConfig::default())
}

/// Run the layout with a custom config.
pub fn auto_layout_with_config(
    graph: &PlaybookGraph,
    config: &LayoutConfig,
) -> Result<LayoutResult> {
    let gir = GraphIR::from_playbook(graph)?;
    let assignment = assign_levels(&gir);
    let result = assign_coordinates(graph, &gir, &assignment, config);
    debug!(
        nodes = result.len(),
        levels = result.levels,
        acyclic = gir.is_dag(),
        direction = %config.direction,
        "auto layout"
    );
    Ok(result)
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_engine.rs"]
mod tests;
