//! playbook-forge: typed playbook graphs, BFS auto-layout, and the Markdown /
//! Mermaid parsers that feed them.
//!
//! Public API: `parse()`, `auto_layout()`, `render_preview()`.

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod parsers;
pub mod renderers;
pub mod syntax;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{LayoutConfig, LayoutDirection, RenderConfig};
pub use error::{GraphError, ParseError};
pub use graph::{GraphEdge, GraphNode, NodeDetails, NodeKind, PlaybookGraph};
pub use layout::{LayoutResult, LayoutSession, auto_layout, auto_layout_with_config};
pub use parsers::{ParseMetadata, ParsedPlaybook, SourceFormat, parse};

use renderers::{AsciiRenderer, Renderer};

/// Parse playbook text and render a text preview of its layout.
///
/// `direction` overrides the flow the source declares; without either, the
/// preview runs top-down.
pub fn render_preview(
    src: &str,
    format: Option<SourceFormat>,
    render: &RenderConfig,
    direction: Option<LayoutDirection>,
) -> Result<String, ParseError> {
    let parsed = parse(src, format)?;
    let direction = direction
        .or_else(|| parsed.direction.map(LayoutDirection::from))
        .unwrap_or_default();
    let config = LayoutConfig::default().with_direction(direction);
    let layout = auto_layout_with_config(&parsed.graph, &config)?;
    Ok(AsciiRenderer::with_config(render.clone()).render(&parsed.graph, &layout))
}

#[cfg(test)]
#[path = "../tests/rust/test_lib.rs"]
mod tests;
