use super::*;
use crate::graph::{GraphNode, NodeKind, PlaybookGraph};
use pretty_assertions::assert_eq;

fn parse_graph(src: &str) -> PlaybookGraph {
    MermaidParser.parse(src).unwrap().graph
}

fn labels(g: &PlaybookGraph) -> Vec<&str> {
    g.nodes().iter().map(|n| n.label.as_str()).collect()
}

fn kinds(g: &PlaybookGraph) -> Vec<NodeKind> {
    g.nodes().iter().map(GraphNode::kind).collect()
}

fn edge_pairs(g: &PlaybookGraph) -> Vec<(String, String)> {
    let label_of = |id: &str| g.node(id).unwrap().label.clone();
    g.edges()
        .iter()
        .map(|e| (label_of(&e.source), label_of(&e.target)))
        .collect()
}

// ── Header ───────────────────────────────────────────────────────────────

#[test]
fn test_no_header_yields_empty_graph() {
    let parsed = MermaidParser.parse("A --> B").unwrap();
    assert!(parsed.graph.is_empty());
}

#[test]
fn test_header_direction_and_title() {
    let mut c = Cursor::new("%% intro\nflowchart LR: Incident Triage\nA --> B");
    let (dir, title) = c.parse_header().unwrap();
    assert_eq!(dir, Direction::LR);
    assert_eq!(title.as_deref(), Some("Incident Triage"));
}

#[test]
fn test_graph_keyword_and_default_direction() {
    let mut c = Cursor::new("graph\nA");
    let (dir, title) = c.parse_header().unwrap();
    assert_eq!(dir, Direction::TD);
    assert!(title.is_none());
}

#[test]
fn test_parse_reports_direction() {
    let parsed = MermaidParser.parse("graph LR\n A[Node A] --> B[Node B]").unwrap();
    assert_eq!(parsed.direction, Some(Direction::LR));
    assert_eq!(parsed.graph.node_count(), 2);
    assert_eq!(parsed.graph.edge_count(), 1);
}

// ── Shapes ───────────────────────────────────────────────────────────────

#[test]
fn test_simple_two_node_graph() {
    let g = parse_graph("flowchart TD\n    A[Start] --> B[End]");
    assert_eq!(labels(&g), vec!["Start", "End"]);
    assert_eq!(kinds(&g), vec![NodeKind::Step, NodeKind::Step]);
    assert_eq!(g.edges()[0].source, g.nodes()[0].id());
    assert_eq!(g.edges()[0].target, g.nodes()[1].id());
}

#[test]
fn test_shape_kinds() {
    let g = parse_graph(
        "flowchart TD\n\
         A((Phase 1)) --> B{Is Valid?}\n\
         B --> C(Rounded)\n\
         C --> D[[Sub]]\n\
         D --> E>Flag]\n\
         E --> F{{Hex}}",
    );
    assert_eq!(
        kinds(&g),
        vec![
            NodeKind::Phase,
            NodeKind::Decision,
            NodeKind::Step,
            NodeKind::Step,
            NodeKind::Step,
            NodeKind::Decision,
        ]
    );
    assert_eq!(labels(&g), vec!["Phase 1", "Is Valid?", "Rounded", "Sub", "Flag", "Hex"]);
}

#[test]
fn test_bare_ids_use_id_as_label() {
    let g = parse_graph("flowchart TD\n    A --> B\n    B --> C");
    assert_eq!(labels(&g), vec!["A", "B", "C"]);
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn test_first_definition_wins() {
    let g = parse_graph("flowchart TD\n A[First] --> B\n A[Second] --> C");
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.nodes()[0].label, "First");
}

#[test]
fn test_quoted_and_special_labels() {
    let g = parse_graph(
        "flowchart TD\n A[\"Step 1: Initialize\"] --> B[Step 2: Run & Test]\n B --> C[Check (quick)]",
    );
    assert_eq!(
        labels(&g),
        vec!["Step 1: Initialize", "Step 2: Run & Test", "Check (quick)"]
    );
}

#[test]
fn test_mermaid_id_metadata() {
    let g = parse_graph("flowchart TD\n Start[Begin] --> Auth{Ok?}");
    match g.nodes()[1].details() {
        NodeDetails::Decision(m) => {
            assert_eq!(m.mermaid_id.as_deref(), Some("Auth"));
            assert!(m.subgraph.is_none());
        }
        other => panic!("expected decision, got {other:?}"),
    }
}

// ── Edges ────────────────────────────────────────────────────────────────

#[test]
fn test_labeled_edges_dash_form() {
    let g = parse_graph(
        "flowchart TD\n A[Start] --Check--> B{Valid?}\n B --Yes--> C[Process]\n B --No--> D[Error]",
    );
    let edge_labels: Vec<Option<&str>> = g.edges().iter().map(|e| e.label.as_deref()).collect();
    assert_eq!(edge_labels, vec![Some("Check"), Some("Yes"), Some("No")]);
}

#[test]
fn test_pipe_labels() {
    let g = parse_graph("flowchart TD\n A -->|retry| B\n B -.->|maybe| C");
    assert_eq!(g.edges()[0].label.as_deref(), Some("retry"));
    assert_eq!(g.edges()[1].label.as_deref(), Some("maybe"));
}

#[test]
fn test_dotted_thick_and_long_edges() {
    let g = parse_graph(
        "flowchart TD\n\
         A[Start] --> B[Step 1]\n\
         B -.-> C[Optional Step]\n\
         B ==> D[Critical Step]\n\
         C ---> E[End]\n\
         D ----> E\n\
         E --- F\n\
         F === G\n\
         G -.- H",
    );
    assert_eq!(g.node_count(), 8);
    assert_eq!(g.edge_count(), 8);
    assert!(g.edges().iter().all(|e| e.label.is_none()));
}

#[test]
fn test_labeled_dotted_and_thick_edges() {
    let g = parse_graph(
        "flowchart TD\n A[Main] -.Optional Path.-> B[Alternative]\n A ==Primary Path==> C[Main Flow]",
    );
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edges()[0].label.as_deref(), Some("Optional Path"));
    assert_eq!(g.edges()[1].label.as_deref(), Some("Primary Path"));
}

#[test]
fn test_chained_edges() {
    let g = parse_graph("flowchart TD\n    A --> B --> C --> D");
    assert_eq!(g.node_count(), 4);
    assert_eq!(
        edge_pairs(&g),
        vec![
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string()),
            ("C".to_string(), "D".to_string()),
        ]
    );
}

#[test]
fn test_no_spaces_around_connectors() {
    let g = parse_graph("flowchart TD\nA-->B\nB-.->C\nC==>D");
    assert_eq!(labels(&g), vec!["A", "B", "C", "D"]);
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn test_semicolon_separated_statements() {
    let g = parse_graph("flowchart TD\nA-->B;B-->C");
    assert_eq!(labels(&g), vec!["A", "B", "C"]);
    assert_eq!(
        edge_pairs(&g),
        vec![
            ("A".to_string(), "B".to_string()),
            ("B".to_string(), "C".to_string()),
        ]
    );
}

#[test]
fn test_ampersand_groups_fan_out_and_in() {
    let g = parse_graph("flowchart TD\n A --> B & C\n B & C --> D");
    assert_eq!(labels(&g), vec!["A", "B", "C", "D"]);
    assert_eq!(
        edge_pairs(&g),
        vec![
            ("A".to_string(), "B".to_string()),
            ("A".to_string(), "C".to_string()),
            ("B".to_string(), "D".to_string()),
            ("C".to_string(), "D".to_string()),
        ]
    );
}

#[test]
fn test_lower_chained_statement() {
    let diagram = Cursor::new("flowchart LR\n A[One] -->|go| B --> C").parse_diagram();
    assert_eq!(diagram.statements.len(), 1);
    let g = lower(&diagram).unwrap().finish();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edges()[0].source, "node_0");
    assert_eq!(g.edges()[0].target, "node_1");
    assert_eq!(g.edges()[0].label.as_deref(), Some("go"));
    assert_eq!(g.edges()[1].source, "node_1");
    assert_eq!(g.edges()[1].target, "node_2");
}

// ── Comments, blanks, junk ───────────────────────────────────────────────

#[test]
fn test_comments_ignored() {
    let g = parse_graph("flowchart TD\n    %% This is a comment\n    A[Start] --> B[End]\n    %% Another");
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn test_style_directives_ignored() {
    let g = parse_graph(
        "flowchart TD\n A --> B\n classDef hot fill:#f00\n class A hot\n style B fill:#fff",
    );
    assert_eq!(g.node_count(), 2);
}

#[test]
fn test_unparseable_lines_skipped() {
    let diagram = Cursor::new("flowchart TD\n A --> B\n ??? what\n B --> C").parse_diagram();
    assert_eq!(diagram.skipped_lines, 1);
    assert_eq!(diagram.statements.len(), 2);
}

#[test]
fn test_trailing_junk_counted_not_dropped() {
    let diagram = Cursor::new("flowchart TD\n A --> B ]] ; C").parse_diagram();
    assert_eq!(diagram.skipped_lines, 1);
    // `]] ; C` is skipped as a whole; the edge before it survives.
    assert_eq!(diagram.statements.len(), 1);
}

// ── Subgraphs ────────────────────────────────────────────────────────────

#[test]
fn test_subgraph_as_phase() {
    let g = parse_graph(
        "flowchart TD\n    subgraph Setup Phase\n        A[Install] --> B[Configure]\n    end\n    B --> C[Run]",
    );
    assert_eq!(labels(&g), vec!["Setup Phase", "Install", "Configure", "Run"]);
    let phase = &g.nodes()[0];
    match phase.details() {
        NodeDetails::Phase(m) => {
            assert!(m.is_subgraph);
            assert_eq!(m.level, Some(1));
        }
        other => panic!("expected phase, got {other:?}"),
    }
    match g.nodes()[1].details() {
        NodeDetails::Step(m) => assert_eq!(m.subgraph.as_deref(), Some(phase.id())),
        other => panic!("expected step, got {other:?}"),
    }
    match g.nodes()[3].details() {
        NodeDetails::Step(m) => assert!(m.subgraph.is_none()),
        other => panic!("expected step, got {other:?}"),
    }
}

#[test]
fn test_nested_subgraphs() {
    let g = parse_graph(
        "flowchart TD\n\
         subgraph Main Phase\n\
             A[Start]\n\
             subgraph Sub Phase\n\
                 B[Step 1] --> C[Step 2]\n\
             end\n\
             A --> B\n\
         end",
    );
    let phases: Vec<&GraphNode> = g.nodes().iter().filter(|n| n.kind() == NodeKind::Phase).collect();
    assert_eq!(phases.len(), 2);
    match phases[1].details() {
        NodeDetails::Phase(m) => {
            assert_eq!(m.level, Some(2));
            assert_eq!(m.subgraph.as_deref(), Some(phases[0].id()));
        }
        other => panic!("expected phase, got {other:?}"),
    }
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn test_quoted_subgraph_label_and_stray_end() {
    let g = parse_graph("flowchart TD\n subgraph \"Critical Path\"\n X\n end\n end\n Y");
    assert_eq!(labels(&g), vec!["Critical Path", "X", "Y"]);
}

// ── Whole documents ──────────────────────────────────────────────────────

#[test]
fn test_incident_response_flowchart() {
    let src = "flowchart TD\n\
        Alert[Receive Alert] --> Verify{Legitimate?}\n\
        Verify --No--> Close[Close Alert]\n\
        Verify --Yes--> Classify{Severity}\n\
        \n\
        subgraph Critical Path\n\
            Classify --Critical--> Escalate[Activate Response Team]\n\
            Escalate --> Investigate[Deep Investigation]\n\
        end\n\
        \n\
        Classify --Low--> Assign[Assign to Engineer]";
    let parsed = MermaidParser.parse(src).unwrap();
    let g = &parsed.graph;
    g.validate().unwrap();
    assert_eq!(g.node_count(), 8);
    assert_eq!(g.edge_count(), 6);
    let ids: std::collections::HashSet<&str> = g.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(ids.len(), g.node_count());
    assert_eq!(parsed.metadata.node_count, 8);
    assert_eq!(parsed.metadata.format, SourceFormat::Mermaid);
}

#[test]
fn test_description_from_comment() {
    assert_eq!(
        extract_description("flowchart TD\n  %% Handles phishing reports\nA-->B").as_deref(),
        Some("Handles phishing reports")
    );
    assert!(extract_description("flowchart TD\nA-->B").is_none());
}
