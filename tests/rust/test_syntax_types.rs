use super::*;

#[test]
fn test_direction_default() {
    assert_eq!(Direction::default(), Direction::TD);
}

#[test]
fn test_direction_is_horizontal() {
    assert!(Direction::LR.is_horizontal());
    assert!(Direction::RL.is_horizontal());
    assert!(!Direction::TD.is_horizontal());
    assert!(!Direction::BT.is_horizontal());
}

#[test]
fn test_node_shape_default() {
    assert_eq!(NodeShape::default(), NodeShape::Rectangle);
}

#[test]
fn test_node_new() {
    let n = Node::new("A", "Hello", NodeShape::Rounded);
    assert_eq!(n.id, "A");
    assert_eq!(n.label.as_deref(), Some("Hello"));
    assert_eq!(n.shape, Some(NodeShape::Rounded));
}

#[test]
fn test_node_bare() {
    let n = Node::bare("B");
    assert_eq!(n.id, "B");
    assert!(n.label.is_none());
    assert!(n.shape.is_none());
}

#[test]
fn test_edge_new() {
    let e = Edge::new("A", "B");
    assert_eq!(e.from_id, "A");
    assert_eq!(e.to_id, "B");
    assert!(e.label.is_none());
}

#[test]
fn test_diagram_new() {
    let d = Diagram::new();
    assert_eq!(d.direction, Direction::TD);
    assert!(d.title.is_none());
    assert!(d.statements.is_empty());
    assert_eq!(d.skipped_lines, 0);
}
