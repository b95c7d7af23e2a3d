//! ASCII/Unicode text preview of a laid-out playbook.
//!
//! Nodes sit on a character grid by level and discovery order; pinned
//! coordinates do not affect the preview. Edges into a deeper level are drawn
//! as orthogonal lines ending in an arrowhead. Edges that point back up or
//! stay on one level are listed under the drawing as `source ↺ target`.

use std::collections::HashMap;

use super::Renderer;
use super::canvas::{Canvas, Rect};
use super::charset::{BoxChars, CharSet};
use super::theme::NodeTheme;
use crate::config::RenderConfig;
use crate::graph::{GraphEdge, NodeKind, PlaybookGraph};
use crate::layout::types::LayoutResult;

// ─── Geometry constants ──────────────────────────────────────────────────────

pub const H_GAP: usize = 4;
pub const V_GAP: usize = 3;

// ─── Node placement ──────────────────────────────────────────────────────────

struct NodeBox<'a> {
    rect: Rect,
    level: usize,
    kind: NodeKind,
    lines: Vec<&'a str>,
}

/// Label lines plus the box size needed to hold them.
fn measure(label: &str, padding: usize) -> (Vec<&str>, usize, usize) {
    let lines: Vec<&str> = label.lines().collect();
    let text_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let height = lines.len().max(1) + 2;
    (lines, text_w + 2 * padding + 2, height)
}

/// Every node gets a uniform grid cell: (index, level) for top-down flow,
/// (level, index) for left-right. Boxes are centred in their cell.
fn place_boxes(layout: &LayoutResult, padding: usize) -> HashMap<&str, NodeBox<'_>> {
    let measured: Vec<_> = layout
        .nodes
        .iter()
        .map(|n| (n, measure(&n.node.label, padding)))
        .collect();
    let max_w = measured.iter().map(|(_, (_, w, _))| *w).max().unwrap_or(0);
    let max_h = measured.iter().map(|(_, (_, _, h))| *h).max().unwrap_or(0);
    let (cell_w, cell_h) = (max_w + H_GAP, max_h + V_GAP);

    let order: HashMap<&str, usize> = layout
        .rows()
        .iter()
        .flat_map(|row| row.iter().enumerate().map(|(i, id)| (id.as_str(), i)))
        .collect();

    measured
        .into_iter()
        .map(|(node, (lines, w, h))| {
            let index = order.get(node.id()).copied().unwrap_or(0);
            let (col, row) = if layout.direction.is_horizontal() {
                (node.level, index)
            } else {
                (index, node.level)
            };
            let rect = Rect::new(
                col * cell_w + (max_w - w) / 2,
                row * cell_h + (max_h - h) / 2,
                w,
                h,
            );
            let placed = NodeBox {
                rect,
                level: node.level,
                kind: node.node.kind(),
                lines,
            };
            (node.id(), placed)
        })
        .collect()
}

fn paint_node(canvas: &mut Canvas, nb: &NodeBox, bc: &BoxChars) {
    canvas.clear(nb.rect);
    canvas.draw_box(nb.rect, bc);
    let inner_w = nb.rect.width.saturating_sub(2);
    for (i, line) in nb.lines.iter().enumerate() {
        let pad = inner_w.saturating_sub(line.chars().count()) / 2;
        canvas.write_str(nb.rect.x + 1 + pad, nb.rect.y + 1 + i, line);
    }
}

// ─── Edge rendering ──────────────────────────────────────────────────────────

/// Draw a forward edge. `to` is on a deeper level than `from`, so at least
/// one gap row (or column) separates them.
fn paint_edge(
    canvas: &mut Canvas,
    from: &NodeBox,
    to: &NodeBox,
    label: Option<&str>,
    horizontal: bool,
    bc: &BoxChars,
) {
    if horizontal {
        let (sx, sy) = (from.rect.right(), from.rect.center_y());
        let (tx, ty) = (to.rect.x.saturating_sub(1), to.rect.center_y());
        let mid_x = tx.saturating_sub(1).max(sx);
        canvas.polyline(&[(sx, sy), (mid_x, sy), (mid_x, ty), (tx, ty)]);
        canvas.set(tx, ty, bc.arrow_right);
        if let Some(label) = label {
            canvas.write_str(sx + 1, sy.saturating_sub(1), label);
        }
    } else {
        let (sx, sy) = (from.rect.center_x(), from.rect.bottom());
        let (tx, ty) = (to.rect.center_x(), to.rect.y.saturating_sub(1));
        let mid_y = ty.saturating_sub(1).max(sy);
        canvas.polyline(&[(sx, sy), (sx, mid_y), (tx, mid_y), (tx, ty)]);
        canvas.set(tx, ty, bc.arrow_down);
        if let Some(label) = label {
            canvas.write_str(tx + 2, ty, label);
        }
    }
}

fn loop_line(graph: &PlaybookGraph, edge: &GraphEdge, cs: CharSet) -> String {
    let name = |id: &str| {
        graph
            .node(id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let mark = match cs {
        CharSet::Unicode => "↺",
        CharSet::Ascii => "<~",
    };
    let mut line = format!("{} {mark} {}", name(&edge.source), name(&edge.target));
    if let Some(label) = &edge.label {
        line.push_str(&format!(" ({label})"));
    }
    line
}

// ─── Public Renderer ─────────────────────────────────────────────────────────

/// ASCII/Unicode text renderer.
pub struct AsciiRenderer {
    pub config: RenderConfig,
    pub theme: NodeTheme,
}

impl AsciiRenderer {
    pub fn new(unicode: bool) -> Self {
        Self::with_config(RenderConfig {
            unicode,
            ..RenderConfig::default()
        })
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            theme: NodeTheme::standard(),
        }
    }

    pub fn with_theme(mut self, theme: NodeTheme) -> Self {
        self.theme = theme;
        self
    }
}

impl Renderer for AsciiRenderer {
    fn render(&self, graph: &PlaybookGraph, layout: &LayoutResult) -> String {
        if layout.is_empty() {
            return String::new();
        }
        let cs = CharSet::from_unicode(self.config.unicode);
        let boxes = place_boxes(layout, self.config.padding);
        let horizontal = layout.direction.is_horizontal();

        let label_room = graph
            .edges()
            .iter()
            .filter_map(|e| e.label.as_deref())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let width = boxes.values().map(|b| b.rect.right()).max().unwrap_or(0) + H_GAP + label_room;
        let height = boxes.values().map(|b| b.rect.bottom()).max().unwrap_or(0) + 1;
        let mut canvas = Canvas::new(width, height, cs);

        let edge_chars = BoxChars::for_charset(cs);
        let mut loops: Vec<&GraphEdge> = Vec::new();
        for edge in graph.edges() {
            let (Some(from), Some(to)) = (
                boxes.get(edge.source.as_str()),
                boxes.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if to.level > from.level {
                paint_edge(
                    &mut canvas,
                    from,
                    to,
                    edge.label.as_deref(),
                    horizontal,
                    &edge_chars,
                );
            } else {
                loops.push(edge);
            }
        }

        // Boxes last, over any edge passing through their cells.
        for node in &layout.nodes {
            if let Some(nb) = boxes.get(node.id()) {
                paint_node(&mut canvas, nb, &self.theme.box_chars(nb.kind, cs));
            }
        }

        let mut out = canvas.render_to_string();
        if !loops.is_empty() {
            out.push('\n');
            for edge in loops {
                out.push_str(&loop_line(graph, edge, cs));
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_ascii.rs"]
mod tests;
