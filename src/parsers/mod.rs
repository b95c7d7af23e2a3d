//! Parser registry: detect the source format and dispatch to its parser.

pub mod base;
pub mod markdown;
pub mod mermaid;

pub use base::{GraphBuilder, Parser};
pub use markdown::MarkdownParser;
pub use mermaid::MermaidParser;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;
use crate::graph::PlaybookGraph;
use crate::syntax::types::Direction;

static MERMAID_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:flowchart|graph)\s+(?:TD|LR|TB|RL|BT)").expect("valid header regex")
});

// ─── SourceFormat ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Markdown,
    Mermaid,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Markdown => "markdown",
            SourceFormat::Mermaid => "mermaid",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" => Ok(SourceFormat::Markdown),
            "mermaid" => Ok(SourceFormat::Mermaid),
            _ => Err(ParseError::UnknownFormat(s.to_string())),
        }
    }
}

// ─── Parse output ────────────────────────────────────────────────────────────

/// Summary of one parse, alongside the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub format: SourceFormat,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone)]
pub struct ParsedPlaybook {
    pub graph: PlaybookGraph,
    pub metadata: ParseMetadata,
    /// Flow direction declared by the source (Mermaid headers only).
    pub direction: Option<Direction>,
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Mermaid if the content opens with a `flowchart`/`graph` header and a
/// direction, otherwise Markdown.
pub fn detect_format(content: &str) -> SourceFormat {
    if MERMAID_HEADER_RE.is_match(content.trim()) {
        SourceFormat::Mermaid
    } else {
        SourceFormat::Markdown
    }
}

pub fn parser_for(format: SourceFormat) -> &'static dyn Parser {
    match format {
        SourceFormat::Markdown => &MarkdownParser,
        SourceFormat::Mermaid => &MermaidParser,
    }
}

/// Parse playbook text, auto-detecting the format when none is given.
pub fn parse(content: &str, format: Option<SourceFormat>) -> Result<ParsedPlaybook, ParseError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ParseError::EmptyContent);
    }
    let format = format.unwrap_or_else(|| detect_format(content));
    debug!(%format, bytes = content.len(), "parsing playbook");
    parser_for(format).parse(content)
}

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_registry.rs"]
mod tests;
