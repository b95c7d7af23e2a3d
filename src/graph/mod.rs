//! Playbook graph model: typed nodes, edges, and the editable graph.

pub mod playbook;
pub mod types;

pub use playbook::PlaybookGraph;
pub use types::{
    DecisionMeta, ExecuteMeta, GraphEdge, GraphNode, MergeMeta, NodeDetails, NodeKind, PhaseMeta,
    StepMeta, StepType,
};
