//! AST data structures for Mermaid flowchart playbooks.
//!
//! The Mermaid parser produces a flat, document-ordered list of statements;
//! lowering into a `PlaybookGraph` happens in `parsers::mermaid`.

// ─── Direction ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    LR,
    RL,
    #[default]
    TD,
    BT,
}

impl Direction {
    /// True for left-to-right / right-to-left flows.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LR | Direction::RL)
    }
}

// ─── NodeShape ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    #[default]
    Rectangle, // id[Label]
    Rounded,    // id(Label)
    Diamond,    // id{Label}
    Circle,     // id((Label))
    Subroutine, // id[[Label]]
    Flag,       // id>Label]
}

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Mermaid identifier (e.g. "A", "Start", "my_node").
    pub id: String,
    /// Display label. `None` for a bare reference with no shape bracket.
    pub label: Option<String>,
    /// Shape bracket, if one was written.
    pub shape: Option<NodeShape>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            shape: Some(shape),
        }
    }

    /// A bare reference (`A`), with neither label nor shape.
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            shape: None,
        }
    }
}

// ─── Edge ────────────────────────────────────────────────────────────────────

/// One hop of an edge chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from_id: String,
    pub to_id: String,
    /// Inline label from `--text-->` or `-->|text|`.
    pub label: Option<String>,
}

impl Edge {
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            label: None,
        }
    }
}

// ─── Statement ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `subgraph Label`
    SubgraphStart(String),
    /// `end`
    SubgraphEnd,
    /// A standalone node definition or reference.
    Node(Node),
    /// `A --> B --> C`: every node mentioned in order, plus one edge per hop.
    Edges { nodes: Vec<Node>, edges: Vec<Edge> },
}

// ─── Diagram (top-level AST) ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagram {
    pub direction: Direction,
    /// Title from `flowchart TD: Title`.
    pub title: Option<String>,
    pub statements: Vec<Statement>,
    /// Number of lines skipped because they could not be parsed.
    pub skipped_lines: usize,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_syntax_types.rs"]
mod tests;
