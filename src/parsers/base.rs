//! Parser trait, shared `Cursor` tokenizer, and the `GraphBuilder` both
//! playbook parsers emit nodes through.

use crate::error::{GraphError, ParseError};
use crate::graph::{GraphEdge, GraphNode, NodeDetails, PlaybookGraph};

use super::{ParsedPlaybook, SourceFormat};

// ─── Parser trait ────────────────────────────────────────────────────────────

/// A playbook source format.
pub trait Parser {
    fn format(&self) -> SourceFormat;

    /// Parse non-empty source text into a graph plus metadata.
    fn parse(&self, src: &str) -> Result<ParsedPlaybook, ParseError>;
}

// ─── GraphBuilder ────────────────────────────────────────────────────────────

/// Appends nodes and edges with sequential `node_N` / `edge_N` ids.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: PlaybookGraph,
    node_counter: usize,
    edge_counter: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        details: NodeDetails,
    ) -> Result<String, GraphError> {
        let id = format!("node_{}", self.node_counter);
        self.node_counter += 1;
        self.graph
            .add_node(GraphNode::new(id.clone(), label, details))?;
        Ok(id)
    }

    /// Add an edge `source → target` and return its id.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        label: Option<String>,
    ) -> Result<String, GraphError> {
        let id = format!("edge_{}", self.edge_counter);
        self.edge_counter += 1;
        let mut edge = GraphEdge::new(id.clone(), source, target);
        edge.label = label;
        self.graph.add_edge(edge)?;
        Ok(id)
    }

    pub fn finish(self) -> PlaybookGraph {
        self.graph
    }
}

// ─── Cursor (stateful tokenizer) ─────────────────────────────────────────────

/// Stateful cursor over the input characters.
pub struct Cursor {
    pub src: Vec<char>,
    pub pos: usize,
}

impl Cursor {
    pub fn new(src: &str) -> Self {
        Self {
            src: src.chars().collect(),
            pos: 0,
        }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The current character, if any.
    pub fn current(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    /// The character `offset` places ahead, if any.
    pub fn ahead(&self, offset: usize) -> Option<char> {
        self.src.get(self.pos + offset).copied()
    }

    /// True at end of input or at a line break.
    pub fn at_eol(&self) -> bool {
        matches!(self.current(), None | Some('\n') | Some('\r'))
    }

    /// Peek whether the next chars match `s` exactly.
    pub fn peek(&self, s: &str) -> bool {
        let mut i = self.pos;
        for ch in s.chars() {
            if self.src.get(i) != Some(&ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Consume `s` if it matches; returns true if consumed.
    pub fn consume(&mut self, s: &str) -> bool {
        if self.peek(s) {
            self.pos += s.chars().count();
            true
        } else {
            false
        }
    }

    /// Consume an ASCII keyword case-insensitively, only at a word boundary.
    pub fn consume_keyword(&mut self, kw: &str) -> bool {
        let len = kw.chars().count();
        if self.pos + len > self.src.len() {
            return false;
        }
        let matches = self.src[self.pos..self.pos + len]
            .iter()
            .zip(kw.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b));
        let boundary = self
            .src
            .get(self.pos + len)
            .is_none_or(|c| !is_id_char(*c));
        if matches && boundary {
            self.pos += len;
            true
        } else {
            false
        }
    }

    /// Skip spaces, tabs, `;` separators, and `%% ...` comments.
    pub fn skip_ws(&mut self) {
        loop {
            match self.current() {
                Some(' ') | Some('\t') | Some(';') => self.pos += 1,
                Some('%') if self.peek("%%") => self.skip_to_eol(),
                _ => break,
            }
        }
    }

    /// Consume a newline (`\r\n`, `\n`, or `\r`). Returns true if consumed.
    pub fn consume_newline(&mut self) -> bool {
        match self.current() {
            Some('\r') => {
                self.pos += 1;
                if self.current() == Some('\n') {
                    self.pos += 1;
                }
                true
            }
            Some('\n') => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Move to the end of the current line (before the line break).
    pub fn skip_to_eol(&mut self) {
        while !self.at_eol() {
            self.pos += 1;
        }
    }

    /// Take the rest of the current line, trimmed.
    pub fn rest_of_line(&mut self) -> String {
        let start = self.pos;
        self.skip_to_eol();
        let text: String = self.src[start..self.pos].iter().collect();
        text.trim().to_string()
    }

    /// Match a node identifier: `[A-Za-z0-9_]+`, with single inner hyphens
    /// (`my-node`) but never `--` or `-.`, which start a connector.
    pub fn match_node_id(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(c) = self.current() {
            if is_id_char(c) {
                self.pos += 1;
            } else if c == '-'
                && self.pos > start
                && self.ahead(1).is_some_and(|n| n.is_ascii_alphanumeric() || n == '_')
            {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return None;
        }
        Some(self.src[start..self.pos].iter().collect())
    }

    /// Parse a double-quoted string, handling `\n`, `\"`, `\\` escapes.
    pub fn parse_quoted_string(&mut self) -> String {
        // Caller must have verified src[pos] == '"'
        self.pos += 1;
        let mut buf = String::new();
        while let Some(ch) = self.current() {
            if ch == '"' {
                self.pos += 1;
                break;
            }
            if ch == '\\' && self.pos + 1 < self.src.len() {
                match self.src[self.pos + 1] {
                    'n' => buf.push('\n'),
                    other => buf.push(other),
                }
                self.pos += 2;
            } else {
                buf.push(ch);
                self.pos += 1;
            }
        }
        buf
    }

    /// Read up to (not including) `terminator` on the current line.
    ///
    /// Returns `None`, leaving the cursor untouched, if the line ends first.
    pub fn take_until(&mut self, terminator: &str) -> Option<String> {
        let start = self.pos;
        while !self.at_eol() {
            if self.peek(terminator) {
                return Some(self.src[start..self.pos].iter().collect());
            }
            self.pos += 1;
        }
        self.pos = start;
        None
    }
}

pub fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_base.rs"]
mod tests;
