//! Node and edge data types for playbook graphs.
//!
//! Node metadata is a closed schema per node kind (`NodeDetails`), so a node's
//! kind and the metadata it carries can never disagree. On the wire a node is
//! `{ id, type, label, metadata? }`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─── NodeKind ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Phase,
    Step,
    Decision,
    Execute,
    /// Join point after a multi-branch decision.
    Merge,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Phase,
        NodeKind::Step,
        NodeKind::Decision,
        NodeKind::Execute,
        NodeKind::Merge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Phase => "phase",
            NodeKind::Step => "step",
            NodeKind::Decision => "decision",
            NodeKind::Execute => "execute",
            NodeKind::Merge => "merge",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown node type '{s}'"))
    }
}

// ─── Per-kind metadata ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseMeta {
    /// Header depth for Markdown phases, nesting depth for Mermaid subgraphs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_type: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_subgraph: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mermaid_id: Option<String>,
    /// Id of the enclosing subgraph phase node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Sequential,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_type: Option<StepType>,
    /// Branch label ("yes"/"no") when the step hangs off a decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mermaid_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionMeta {
    /// The raw condition text the label was derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mermaid_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_type: Option<String>,
}

/// Kind-specific metadata. The variant *is* the node's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDetails {
    Phase(PhaseMeta),
    Step(StepMeta),
    Decision(DecisionMeta),
    Execute(ExecuteMeta),
    Merge(MergeMeta),
}

impl NodeDetails {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeDetails::Phase(_) => NodeKind::Phase,
            NodeDetails::Step(_) => NodeKind::Step,
            NodeDetails::Decision(_) => NodeKind::Decision,
            NodeDetails::Execute(_) => NodeKind::Execute,
            NodeDetails::Merge(_) => NodeKind::Merge,
        }
    }

    /// Empty metadata for the given kind.
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Phase => NodeDetails::Phase(PhaseMeta::default()),
            NodeKind::Step => NodeDetails::Step(StepMeta::default()),
            NodeKind::Decision => NodeDetails::Decision(DecisionMeta::default()),
            NodeKind::Execute => NodeDetails::Execute(ExecuteMeta::default()),
            NodeKind::Merge => NodeDetails::Merge(MergeMeta::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == NodeDetails::empty(self.kind())
    }

    fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            NodeDetails::Phase(m) => serde_json::to_value(m),
            NodeDetails::Step(m) => serde_json::to_value(m),
            NodeDetails::Decision(m) => serde_json::to_value(m),
            NodeDetails::Execute(m) => serde_json::to_value(m),
            NodeDetails::Merge(m) => serde_json::to_value(m),
        }
    }

    fn from_value(kind: NodeKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            NodeKind::Phase => NodeDetails::Phase(serde_json::from_value(value)?),
            NodeKind::Step => NodeDetails::Step(serde_json::from_value(value)?),
            NodeKind::Decision => NodeDetails::Decision(serde_json::from_value(value)?),
            NodeKind::Execute => NodeDetails::Execute(serde_json::from_value(value)?),
            NodeKind::Merge => NodeDetails::Merge(serde_json::from_value(value)?),
        })
    }
}

// ─── GraphNode ───────────────────────────────────────────────────────────────

/// A typed playbook node. `id` and kind are fixed once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct GraphNode {
    pub(crate) id: String,
    pub label: String,
    pub(crate) details: NodeDetails,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, details: NodeDetails) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            details,
        }
    }

    /// A node of `kind` with empty metadata.
    pub fn bare(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeDetails::empty(kind))
    }

    pub fn phase(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::bare(id, NodeKind::Phase, label)
    }

    pub fn step(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::bare(id, NodeKind::Step, label)
    }

    pub fn decision(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::bare(id, NodeKind::Decision, label)
    }

    pub fn execute(
        id: impl Into<String>,
        label: impl Into<String>,
        language: Option<String>,
        code: Option<String>,
    ) -> Self {
        Self::new(id, label, NodeDetails::Execute(ExecuteMeta { language, code }))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.details.kind()
    }

    pub fn details(&self) -> &NodeDetails {
        &self.details
    }
}

/// Wire shape of a node.
#[derive(Serialize, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
}

impl TryFrom<RawNode> for GraphNode {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let details = match raw.metadata {
            None | Some(serde_json::Value::Null) => NodeDetails::empty(raw.kind),
            Some(value) => NodeDetails::from_value(raw.kind, value)?,
        };
        Ok(GraphNode {
            id: raw.id,
            label: raw.label,
            details,
        })
    }
}

impl From<GraphNode> for RawNode {
    fn from(node: GraphNode) -> Self {
        let metadata = if node.details.is_empty() {
            None
        } else {
            // Plain structs of strings and integers always serialize.
            node.details.to_value().ok()
        };
        RawNode {
            id: node.id,
            kind: node.details.kind(),
            label: node.label,
            metadata,
        }
    }
}

// ─── GraphEdge ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GraphEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_graph_types.rs"]
mod tests;
