//! Node themes: which outline each node kind is drawn with.

use std::collections::HashMap;

use super::charset::{BoxChars, CharSet};
use crate::graph::NodeKind;

/// Registry of box outlines per `(NodeKind, CharSet)`.
///
/// Kinds without an entry fall back to the plain box for the charset.
#[derive(Debug, Clone, Default)]
pub struct NodeTheme {
    styles: HashMap<(NodeKind, CharSet), BoxChars>,
}

impl NodeTheme {
    /// Every kind drawn as a plain box.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Phases double-lined, decisions rounded, execute blocks heavy, steps
    /// light, merges dashed.
    pub fn standard() -> Self {
        let uni = BoxChars::unicode();
        let ascii = BoxChars::ascii();
        Self::plain()
            .with_style(
                NodeKind::Phase,
                CharSet::Unicode,
                uni.with_outline(['╔', '╗', '╚', '╝'], '═', '║'),
            )
            .with_style(
                NodeKind::Decision,
                CharSet::Unicode,
                uni.with_outline(['╭', '╮', '╰', '╯'], '─', '│'),
            )
            .with_style(
                NodeKind::Execute,
                CharSet::Unicode,
                uni.with_outline(['┏', '┓', '┗', '┛'], '━', '┃'),
            )
            .with_style(
                NodeKind::Merge,
                CharSet::Unicode,
                uni.with_outline(['┌', '┐', '└', '┘'], '╌', '╎'),
            )
            .with_style(
                NodeKind::Phase,
                CharSet::Ascii,
                ascii.with_outline(['#', '#', '#', '#'], '=', '#'),
            )
            .with_style(
                NodeKind::Decision,
                CharSet::Ascii,
                ascii.with_outline(['/', '\\', '\\', '/'], '-', '|'),
            )
            .with_style(
                NodeKind::Execute,
                CharSet::Ascii,
                ascii.with_outline(['*', '*', '*', '*'], '=', '!'),
            )
            .with_style(
                NodeKind::Merge,
                CharSet::Ascii,
                ascii.with_outline(['+', '+', '+', '+'], '.', ':'),
            )
    }

    /// Register (or replace) the outline for one kind and charset.
    pub fn with_style(mut self, kind: NodeKind, cs: CharSet, chars: BoxChars) -> Self {
        self.styles.insert((kind, cs), chars);
        self
    }

    pub fn box_chars(&self, kind: NodeKind, cs: CharSet) -> BoxChars {
        self.styles
            .get(&(kind, cs))
            .copied()
            .unwrap_or_else(|| BoxChars::for_charset(cs))
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_theme.rs"]
mod tests;
