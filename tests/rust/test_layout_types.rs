use super::*;
use crate::graph::GraphNode;
use pretty_assertions::assert_eq;

fn positioned(id: &str, x: f64, y: f64, level: usize) -> PositionedNode {
    PositionedNode {
        node: GraphNode::step(id, id.to_uppercase()),
        x,
        y,
        level,
    }
}

fn sample() -> LayoutResult {
    LayoutResult::new(
        vec![
            positioned("a", 0.0, 0.0, 0),
            positioned("b", 0.0, 150.0, 1),
            positioned("c", 250.0, 150.0, 1),
        ],
        vec![vec!["a".into()], vec!["b".into(), "c".into()]],
    )
}

#[test]
fn test_point_new() {
    let p = Point::new(1.5, 2.0);
    assert_eq!(p.x, 1.5);
    assert_eq!(p.y, 2.0);
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn test_result_lookup() {
    let r = sample();
    assert_eq!(r.len(), 3);
    assert_eq!(r.levels, 2);
    assert_eq!(r.get("c").map(PositionedNode::point), Some(Point::new(250.0, 150.0)));
    assert!(r.get("zzz").is_none());
    assert_eq!(r.row(1), ["b".to_string(), "c".to_string()]);
    assert!(r.row(7).is_empty());
    assert_eq!(r.get("b").map(PositionedNode::point), Some(Point::new(0.0, 150.0)));
}

#[test]
fn test_place_keeps_level() {
    let mut r = sample();
    assert!(r.place("b", Point::new(-10.0, 42.0)));
    let b = r.get("b").unwrap();
    assert_eq!((b.x, b.y, b.level), (-10.0, 42.0, 1));
    assert!(!r.place("nope", Point::new(1.0, 1.0)));
}

#[test]
fn test_empty_result() {
    let r = LayoutResult::default();
    assert!(r.is_empty());
    assert_eq!(r.levels, 0);
    assert!(r.rows().is_empty());
}

#[test]
fn test_serializes_flat_nodes() {
    let r = LayoutResult::new(
        vec![positioned("s1", 0.0, 150.0, 1)],
        vec![vec![], vec!["s1".into()]],
    );
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "levels": 2,
            "nodes": [
                {"id": "s1", "type": "step", "label": "S1", "x": 0.0, "y": 150.0, "level": 1}
            ]
        })
    );
}
