//! Layout session: computed layout plus manually pinned positions.
//!
//! A pin overrides a node's coordinates for as long as the session lives; the
//! node keeps its computed level. Sessions are tied to one parsed graph, so a
//! re-parse starts from a fresh session with no pins.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::auto_layout_with_config;
use super::types::{LayoutResult, Point};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::PlaybookGraph;

#[derive(Debug, Clone, Default)]
pub struct LayoutSession {
    config: LayoutConfig,
    pins: BTreeMap<String, Point>,
}

impl LayoutSession {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            pins: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Pin `id` at `(x, y)`, replacing any earlier pin.
    pub fn pin(&mut self, id: impl Into<String>, x: f64, y: f64) {
        self.pins.insert(id.into(), Point::new(x, y));
    }

    pub fn unpin(&mut self, id: &str) -> Option<Point> {
        self.pins.remove(id)
    }

    pub fn clear_pins(&mut self) {
        self.pins.clear();
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pins.contains_key(id)
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Lay out `graph` and apply the pins. Pins for nodes that are no longer
    /// in the graph are dropped.
    pub fn layout(&mut self, graph: &PlaybookGraph) -> Result<LayoutResult> {
        let mut result = auto_layout_with_config(graph, &self.config)?;
        self.pins.retain(|id, _| {
            let keep = graph.contains_node(id);
            if !keep {
                warn!(node = %id, "dropping pin for node no longer in graph");
            }
            keep
        });
        for (id, point) in &self.pins {
            result.place(id, *point);
        }
        debug!(pins = self.pins.len(), "applied pinned positions");
        Ok(result)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_session.rs"]
mod tests;
