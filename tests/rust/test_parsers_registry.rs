use super::*;
use crate::graph::NodeKind;

#[test]
fn test_detect_mermaid_headers() {
    assert_eq!(detect_format("flowchart TD\nA-->B"), SourceFormat::Mermaid);
    assert_eq!(detect_format("  graph lr\n A --> B"), SourceFormat::Mermaid);
    assert_eq!(detect_format("FLOWCHART BT\nA"), SourceFormat::Mermaid);
}

#[test]
fn test_detect_markdown_fallback() {
    assert_eq!(detect_format("# Playbook\n- step"), SourceFormat::Markdown);
    // A header without a direction is not enough.
    assert_eq!(detect_format("flowchart\nA-->B"), SourceFormat::Markdown);
    assert_eq!(detect_format("Some flowchart TD notes"), SourceFormat::Markdown);
}

#[test]
fn test_source_format_from_str() {
    assert_eq!("markdown".parse::<SourceFormat>().unwrap(), SourceFormat::Markdown);
    assert_eq!("Mermaid".parse::<SourceFormat>().unwrap(), SourceFormat::Mermaid);
    let err = "yaml".parse::<SourceFormat>().unwrap_err();
    assert!(matches!(err, ParseError::UnknownFormat(ref f) if f == "yaml"));
    assert_eq!(
        err.to_string(),
        "invalid format 'yaml', must be 'markdown' or 'mermaid'"
    );
}

#[test]
fn test_source_format_display_and_serde() {
    assert_eq!(SourceFormat::Mermaid.to_string(), "mermaid");
    assert_eq!(
        serde_json::to_string(&SourceFormat::Markdown).unwrap(),
        "\"markdown\""
    );
}

#[test]
fn test_parser_for_dispatch() {
    for format in [SourceFormat::Markdown, SourceFormat::Mermaid] {
        assert_eq!(parser_for(format).format(), format);
    }
}

#[test]
fn test_parse_rejects_blank_content() {
    assert!(matches!(parse("", None), Err(ParseError::EmptyContent)));
    assert!(matches!(
        parse("  \n\t \n", Some(SourceFormat::Mermaid)),
        Err(ParseError::EmptyContent)
    ));
}

#[test]
fn test_parse_auto_detects() {
    let parsed = parse("\n\nflowchart LR\n  A((Start)) --> B{Ok?}\n", None).unwrap();
    assert_eq!(parsed.metadata.format, SourceFormat::Mermaid);
    assert_eq!(parsed.direction, Some(Direction::LR));
    assert_eq!(parsed.graph.nodes()[0].kind(), NodeKind::Phase);

    let parsed = parse("# Title\n1. One\n2. Two", None).unwrap();
    assert_eq!(parsed.metadata.format, SourceFormat::Markdown);
    assert_eq!(parsed.metadata.edge_count, 2);
}

#[test]
fn test_explicit_format_overrides_detection() {
    // Mermaid text forced through the Markdown parser yields no graph items.
    let parsed = parse("flowchart TD\nA --> B", Some(SourceFormat::Markdown)).unwrap();
    assert_eq!(parsed.metadata.format, SourceFormat::Markdown);
    assert!(parsed.graph.is_empty());
}

#[test]
fn test_metadata_serializes() {
    let parsed = parse("# Deploy\nShip it.\n- Build", None).unwrap();
    let json = serde_json::to_value(&parsed.metadata).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Deploy",
            "description": "Ship it.",
            "format": "markdown",
            "node_count": 2,
            "edge_count": 1,
        })
    );
}
