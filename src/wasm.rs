//! WASM bindings for playbook-forge.
//!
//! Exposes `parse`, `layout` and `preview` to JavaScript via wasm-bindgen.
//! Graphs and layouts cross the boundary as exchange-format JSON.

use wasm_bindgen::prelude::*;

use crate::config::RenderConfig;
use crate::graph::PlaybookGraph;
use crate::parsers::SourceFormat;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Parse Markdown or Mermaid playbook text into graph JSON.
///
/// `format` is "markdown", "mermaid", or an empty string to auto-detect.
#[wasm_bindgen]
pub fn parse(src: &str, format: &str) -> Result<String, JsError> {
    let format = if format.is_empty() {
        None
    } else {
        Some(format.parse::<SourceFormat>().map_err(js_err)?)
    };
    let parsed = crate::parse(src, format).map_err(js_err)?;
    serde_json::to_string(&parsed.graph).map_err(js_err)
}

/// Lay out a graph given as exchange-format JSON; returns layout JSON.
#[wasm_bindgen]
pub fn layout(graph_json: &str) -> Result<String, JsError> {
    let graph = PlaybookGraph::from_json(graph_json).map_err(js_err)?;
    let result = crate::auto_layout(&graph).map_err(js_err)?;
    serde_json::to_string(&result).map_err(js_err)
}

/// Render playbook text to a Unicode preview with default settings.
#[wasm_bindgen]
pub fn preview(src: &str) -> Result<String, JsError> {
    crate::render_preview(src, None, &RenderConfig::default(), None).map_err(js_err)
}
