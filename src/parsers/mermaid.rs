//! Mermaid flowchart → playbook graph.
//!
//! A recursive descent pass over the `Cursor` produces a `Diagram` of
//! document-ordered statements, which is then lowered into a `PlaybookGraph`:
//! `((circle))` nodes become phases, `{diamond}` nodes decisions, every other
//! shape a step, and each `subgraph` block its own phase node.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::base::{Cursor, GraphBuilder, Parser};
use super::{ParseMetadata, ParsedPlaybook, SourceFormat};
use crate::error::{GraphError, ParseError};
use crate::graph::{DecisionMeta, NodeDetails, PhaseMeta, StepMeta};
use crate::syntax::types::{Diagram, Direction, Edge, Node, NodeShape, Statement};

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*%%[ \t]*(.+?)[ \t\r]*$").expect("valid comment regex"));

/// Parser for `flowchart` / `graph` diagrams.
pub struct MermaidParser;

impl Parser for MermaidParser {
    fn format(&self) -> SourceFormat {
        SourceFormat::Mermaid
    }

    fn parse(&self, src: &str) -> Result<ParsedPlaybook, ParseError> {
        let diagram = Cursor::new(src).parse_diagram();
        if diagram.skipped_lines > 0 {
            warn!(skipped = diagram.skipped_lines, "mermaid lines could not be parsed");
        }
        let graph = lower(&diagram)?.finish();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed mermaid playbook"
        );
        let metadata = ParseMetadata {
            title: diagram.title.clone(),
            description: extract_description(src),
            format: SourceFormat::Mermaid,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        };
        Ok(ParsedPlaybook {
            graph,
            metadata,
            direction: Some(diagram.direction),
        })
    }
}

/// The first `%% comment` line.
pub fn extract_description(src: &str) -> Option<String> {
    COMMENT_RE.captures(src).map(|c| c[1].to_string())
}

// ─── Grammar ─────────────────────────────────────────────────────────────────

impl Cursor {
    /// Match a direction keyword: `TD`, `TB`, `LR`, `RL`, `BT`.
    pub fn match_direction(&mut self) -> Option<Direction> {
        for (token, dir) in [
            ("TD", Direction::TD),
            ("TB", Direction::TD),
            ("LR", Direction::LR),
            ("RL", Direction::RL),
            ("BT", Direction::BT),
        ] {
            if self.consume_keyword(token) {
                return Some(dir);
            }
        }
        None
    }

    /// Skip lines until a `flowchart`/`graph` header and parse it.
    ///
    /// Returns `(direction, title)`, or `None` if no header exists.
    pub fn parse_header(&mut self) -> Option<(Direction, Option<String>)> {
        while !self.eof() {
            self.skip_ws();
            if self.consume_keyword("flowchart") || self.consume_keyword("graph") {
                self.skip_ws();
                let direction = self.match_direction().unwrap_or_default();
                self.skip_ws();
                let title = if self.consume(":") {
                    Some(self.rest_of_line()).filter(|t| !t.is_empty())
                } else {
                    self.skip_to_eol();
                    None
                };
                self.consume_newline();
                return Some((direction, title));
            }
            self.skip_to_eol();
            self.consume_newline();
        }
        None
    }

    /// Parse a node label up to `close`, quoted or bare.
    pub fn parse_node_label(&mut self, close: &str) -> String {
        self.skip_ws();
        if self.current() == Some('"') {
            return self.parse_quoted_string();
        }
        let start = self.pos;
        while !self.at_eol() && !self.peek(close) {
            self.pos += 1;
        }
        let label: String = self.src[start..self.pos].iter().collect();
        label.trim().to_string()
    }

    /// Try to parse a node shape bracket. Returns `(NodeShape, label)` or None.
    pub fn parse_node_shape(&mut self) -> Option<(NodeShape, String)> {
        let (open, close, shape) = if self.peek("((") {
            ("((", "))", NodeShape::Circle)
        } else if self.peek("[[") {
            ("[[", "]]", NodeShape::Subroutine)
        } else if self.peek("{{") {
            ("{{", "}}", NodeShape::Diamond)
        } else if self.peek("(") {
            ("(", ")", NodeShape::Rounded)
        } else if self.peek("{") {
            ("{", "}", NodeShape::Diamond)
        } else if self.peek("[") {
            ("[", "]", NodeShape::Rectangle)
        } else if self.peek(">") {
            (">", "]", NodeShape::Flag)
        } else {
            return None;
        };
        self.consume(open);
        let label = self.parse_node_label(close);
        self.skip_ws();
        self.consume(close);
        Some((shape, label))
    }

    /// Parse a node reference (id + optional shape bracket).
    pub fn parse_node_ref(&mut self) -> Option<Node> {
        self.skip_ws();
        let node_id = self.match_node_id()?;
        match self.parse_node_shape() {
            Some((shape, label)) => Some(Node::new(node_id, label, shape)),
            None => Some(Node::bare(node_id)),
        }
    }

    /// Try to parse an edge connector (solid, dotted or thick; the stroke
    /// does not reach the graph). Returns the inline `--text-->` label, if any.
    pub fn parse_edge_connector(&mut self) -> Option<Option<String>> {
        self.skip_ws();
        let saved = self.pos;
        let parsed = if self.peek("-.") {
            self.parse_dotted_connector()
        } else if self.peek("==") {
            self.parse_run_connector('=')
        } else if self.peek("--") {
            self.parse_run_connector('-')
        } else {
            None
        };
        if parsed.is_none() {
            self.pos = saved;
        }
        parsed
    }

    /// `-.->`, `-.-`, `-.text.->`
    fn parse_dotted_connector(&mut self) -> Option<Option<String>> {
        self.consume("-.");
        if self.consume("->") || self.consume("-") {
            return Some(None);
        }
        let text = self.take_until(".-")?;
        self.consume(".-");
        self.consume(">");
        Some(non_empty(text))
    }

    /// Runs of `-` or `=`: `-->`, `--->`, `---`, `==>`, `===`, plus the
    /// labelled forms `--text-->` and `==text==>`.
    fn parse_run_connector(&mut self, ch: char) -> Option<Option<String>> {
        let run = self.take_run(ch);
        if self.consume(">") || run >= 3 {
            return Some(None);
        }
        // Exactly two: a labelled edge, closed by another run of `ch`.
        let closing: String = [ch, ch].iter().collect();
        let text = self.take_until(&closing)?;
        self.take_run(ch);
        self.consume(">");
        Some(non_empty(text))
    }

    fn take_run(&mut self, ch: char) -> usize {
        let start = self.pos;
        while self.current() == Some(ch) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Try to parse a pipe label `|text|`. Returns label text or None.
    pub fn try_parse_pipe_label(&mut self) -> Option<String> {
        self.skip_ws();
        if !self.consume("|") {
            return None;
        }
        let text = self.take_until("|").unwrap_or_else(|| self.rest_of_line());
        self.consume("|");
        non_empty(text)
    }

    /// Parse `A & B & C`: one or more node references joined by `&`.
    pub fn parse_node_group(&mut self) -> Option<Vec<Node>> {
        let mut group = vec![self.parse_node_ref()?];
        loop {
            let saved = self.pos;
            self.skip_ws();
            if !self.consume("&") {
                self.pos = saved;
                break;
            }
            match self.parse_node_ref() {
                Some(node) => group.push(node),
                None => {
                    self.pos = saved;
                    break;
                }
            }
        }
        Some(group)
    }

    /// Parse an edge chain: `connector [label] targets [connector [label] targets ...]`.
    pub fn parse_edge_chain(&mut self) -> Vec<(Option<String>, Vec<Node>)> {
        let mut segments = Vec::new();
        loop {
            let saved = self.pos;
            let Some(inline_label) = self.parse_edge_connector() else {
                break;
            };
            let label = self.try_parse_pipe_label().or(inline_label);
            let Some(targets) = self.parse_node_group() else {
                self.pos = saved;
                break;
            };
            segments.push((label, targets));
        }
        segments
    }

    /// Parse a node group followed by zero or more edge hops. Each hop links
    /// every node of the previous group to every node of the next.
    pub fn parse_node_or_edges(&mut self) -> Option<Statement> {
        let saved = self.pos;
        let Some(sources) = self.parse_node_group() else {
            self.pos = saved;
            return None;
        };
        let segments = self.parse_edge_chain();
        if segments.is_empty() && sources.len() == 1 {
            return sources.into_iter().next().map(Statement::Node);
        }
        let mut prev: Vec<String> = sources.iter().map(|n| n.id.clone()).collect();
        let mut nodes = sources;
        let mut edges = Vec::new();
        for (label, targets) in segments {
            for from in &prev {
                for to in &targets {
                    let mut e = Edge::new(from.clone(), to.id.clone());
                    e.label = label.clone();
                    edges.push(e);
                }
            }
            prev = targets.iter().map(|n| n.id.clone()).collect();
            nodes.extend(targets);
        }
        Some(Statement::Edges { nodes, edges })
    }

    /// Parse one line's statement. `None` means the line was blank or a
    /// directive with no graph effect.
    fn parse_statement(&mut self) -> Result<Option<Statement>, ()> {
        self.skip_ws();
        if self.at_eol() {
            return Ok(None);
        }
        if self.consume_keyword("subgraph") {
            self.skip_ws();
            let label = if self.current() == Some('"') {
                self.parse_quoted_string()
            } else {
                self.rest_of_line()
            };
            return Ok(Some(Statement::SubgraphStart(label)));
        }
        if self.consume_keyword("end") {
            return Ok(Some(Statement::SubgraphEnd));
        }
        if self.consume_keyword("direction")
            || self.consume_keyword("classDef")
            || self.consume_keyword("class")
            || self.consume_keyword("style")
            || self.consume_keyword("linkStyle")
            || self.consume_keyword("click")
        {
            self.skip_to_eol();
            return Ok(None);
        }
        self.parse_node_or_edges().map(Some).ok_or(())
    }

    /// Parse the full diagram (header + statements).
    pub fn parse_diagram(&mut self) -> Diagram {
        let mut diagram = Diagram::new();
        let Some((direction, title)) = self.parse_header() else {
            return diagram;
        };
        diagram.direction = direction;
        diagram.title = title;
        while !self.eof() {
            // `;` separates several statements on one line.
            loop {
                match self.parse_statement() {
                    Ok(Some(stmt)) => diagram.statements.push(stmt),
                    Ok(None) => {}
                    Err(()) => {
                        let rest = self.rest_of_line();
                        warn!(text = %rest, "skipping unparseable mermaid text");
                        diagram.skipped_lines += 1;
                    }
                }
                self.skip_ws();
                if self.at_eol() {
                    break;
                }
            }
            self.consume_newline();
        }
        diagram
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ─── Lowering ────────────────────────────────────────────────────────────────

/// Lower a diagram into graph nodes and edges, in statement order.
pub fn lower(diagram: &Diagram) -> Result<GraphBuilder, GraphError> {
    let mut lowering = Lowering::default();
    for stmt in &diagram.statements {
        match stmt {
            Statement::SubgraphStart(label) => lowering.open_subgraph(label)?,
            Statement::SubgraphEnd => {
                lowering.subgraph_stack.pop();
            }
            Statement::Node(node) => {
                lowering.ensure_node(node)?;
            }
            Statement::Edges { nodes, edges } => {
                for node in nodes {
                    lowering.ensure_node(node)?;
                }
                for edge in edges {
                    let source = graph_id(&lowering.id_map, &edge.from_id)?;
                    let target = graph_id(&lowering.id_map, &edge.to_id)?;
                    lowering
                        .builder
                        .connect(source, target, edge.label.clone())?;
                }
            }
        }
    }
    Ok(lowering.builder)
}

/// Graph id for a Mermaid id already seen by `ensure_node`.
fn graph_id<'a>(
    id_map: &'a HashMap<String, String>,
    mermaid_id: &str,
) -> Result<&'a str, GraphError> {
    id_map
        .get(mermaid_id)
        .map(String::as_str)
        .ok_or_else(|| GraphError::NodeNotFound {
            id: mermaid_id.to_string(),
        })
}

#[derive(Default)]
struct Lowering {
    builder: GraphBuilder,
    /// Mermaid id → graph node id.
    id_map: HashMap<String, String>,
    /// Graph ids of the open subgraph phases, innermost last.
    subgraph_stack: Vec<String>,
}

impl Lowering {
    fn current_subgraph(&self) -> Option<String> {
        self.subgraph_stack.last().cloned()
    }

    fn open_subgraph(&mut self, label: &str) -> Result<(), GraphError> {
        let depth = u32::try_from(self.subgraph_stack.len()).unwrap_or(u32::MAX);
        let details = NodeDetails::Phase(PhaseMeta {
            level: Some(depth.saturating_add(1)),
            is_subgraph: true,
            subgraph: self.current_subgraph(),
            ..PhaseMeta::default()
        });
        let id = self.builder.add_node(label, details)?;
        self.subgraph_stack.push(id);
        Ok(())
    }

    /// First definition wins: later mentions of a Mermaid id reuse its node.
    fn ensure_node(&mut self, node: &Node) -> Result<(), GraphError> {
        if self.id_map.contains_key(&node.id) {
            return Ok(());
        }
        let mermaid_id = Some(node.id.clone());
        let subgraph = self.current_subgraph();
        let details = match node.shape {
            Some(NodeShape::Circle) => NodeDetails::Phase(PhaseMeta {
                mermaid_id,
                subgraph,
                ..PhaseMeta::default()
            }),
            Some(NodeShape::Diamond) => NodeDetails::Decision(DecisionMeta {
                condition: None,
                mermaid_id,
                subgraph,
            }),
            _ => NodeDetails::Step(StepMeta {
                mermaid_id,
                subgraph,
                ..StepMeta::default()
            }),
        };
        let label = node
            .label
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| node.id.clone());
        let id = self.builder.add_node(label, details)?;
        self.id_map.insert(node.id.clone(), id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_mermaid.rs"]
mod tests;
