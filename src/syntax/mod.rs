//! Mermaid flowchart syntax tree.

pub mod types;
