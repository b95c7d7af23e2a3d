//! Renderer trait and the text preview renderer.

pub mod ascii;
pub mod canvas;
pub mod charset;
pub mod theme;

pub use ascii::AsciiRenderer;
pub use charset::CharSet;
pub use theme::NodeTheme;

use crate::graph::PlaybookGraph;
use crate::layout::types::LayoutResult;

/// Trait for playbook renderers.
pub trait Renderer {
    /// Render a graph using positions from its layout.
    fn render(&self, graph: &PlaybookGraph, layout: &LayoutResult) -> String;
}
