//! Error types shared by the graph model, parsers, and layout engine.

use thiserror::Error;

use crate::graph::NodeKind;

/// Validation failures raised by the graph model and the layout engine.
///
/// Every mutation that returns one of these leaves the graph unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate id '{id}'")]
    DuplicateId { id: String },

    #[error("edge '{edge}' references missing node '{missing}'")]
    DanglingEndpoint { edge: String, missing: String },

    #[error("invalid graph: edge '{edge}' references missing node '{missing}'")]
    InvalidGraph { edge: String, missing: String },

    #[error("no node with id '{id}'")]
    NodeNotFound { id: String },

    #[error("no edge with id '{id}'")]
    EdgeNotFound { id: String },

    #[error("node '{id}' is a {expected} node, got {found} metadata")]
    KindMismatch {
        id: String,
        expected: NodeKind,
        found: NodeKind,
    },
}

/// Failures while turning source text (or exchange JSON) into a graph.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("content cannot be empty")]
    EmptyContent,

    #[error("invalid format '{0}', must be 'markdown' or 'mermaid'")]
    UnknownFormat(String),

    #[error("malformed graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
