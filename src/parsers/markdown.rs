//! Structured Markdown → playbook graph.
//!
//! Headers become phases, numbered items sequential steps, bullets steps or
//! (when they read like a condition) decisions with indented branches, and
//! fenced code blocks execute nodes. Each top-level item is linked from the
//! one before it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::base::{GraphBuilder, Parser};
use super::{ParseMetadata, ParsedPlaybook, SourceFormat};
use crate::error::{GraphError, ParseError};
use crate::graph::{
    DecisionMeta, ExecuteMeta, MergeMeta, NodeDetails, PhaseMeta, StepMeta, StepType,
};

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*(.+)$").expect("valid numbered-item regex"));
static NUMBERED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid numbered-prefix regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t\r]*$").expect("valid title regex"));

const DECISION_KEYWORDS: [&str; 6] = ["if ", "when ", "else", "otherwise", "or if", "elif"];
const CONDITION_PREFIXES: [&str; 6] = ["if ", "when ", "else ", "otherwise ", "or if ", "elif "];
const BRANCH_PREFIXES: [&str; 4] = ["  -", "  *", "    -", "    *"];

/// Parser for Markdown playbooks.
pub struct MarkdownParser;

impl Parser for MarkdownParser {
    fn format(&self) -> SourceFormat {
        SourceFormat::Markdown
    }

    fn parse(&self, src: &str) -> Result<ParsedPlaybook, ParseError> {
        let lines: Vec<&str> = src.lines().collect();
        let mut state = MarkdownState::default();
        let mut i = 0;
        while i < lines.len() {
            i = state.line(&lines, i)?;
        }
        let graph = state.builder.finish();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed markdown playbook"
        );
        let metadata = ParseMetadata {
            title: extract_title(src),
            description: extract_description(src),
            format: SourceFormat::Markdown,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
        };
        Ok(ParsedPlaybook {
            graph,
            metadata,
            direction: None,
        })
    }
}

/// Text of the first `# ` header.
pub fn extract_title(src: &str) -> Option<String> {
    TITLE_RE.captures(src).map(|c| c[1].to_string())
}

/// The first non-header, non-blank line after the first header.
pub fn extract_description(src: &str) -> Option<String> {
    src.lines()
        .map(str::trim)
        .skip_while(|l| !l.starts_with('#'))
        .skip(1)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
}

/// Turn decision text into a question: drop a leading keyword, capitalize,
/// and end with `?`.
pub fn extract_condition(content: &str) -> String {
    let mut text = content;
    for prefix in CONDITION_PREFIXES {
        if text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        {
            text = text[prefix.len()..].trim();
            break;
        }
    }
    let mut chars = text.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !out.ends_with('?') {
        out.push('?');
    }
    out
}

fn is_decision(content: &str) -> bool {
    let lower = content.to_lowercase();
    DECISION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[derive(Default)]
struct MarkdownState {
    builder: GraphBuilder,
    /// Node the next top-level item links from.
    last: Option<String>,
}

impl MarkdownState {
    /// Handle the line at `i`; returns the index of the next unhandled line.
    fn line(&mut self, lines: &[&str], i: usize) -> Result<usize, GraphError> {
        let stripped = lines[i].trim();
        if stripped.is_empty() {
            return Ok(i + 1);
        }
        if stripped.starts_with("```") {
            return self.code_block(lines, i);
        }
        if stripped.starts_with('#') {
            self.header(stripped)?;
            return Ok(i + 1);
        }
        if NUMBERED_PREFIX_RE.is_match(stripped) {
            if let Some(caps) = NUMBERED_RE.captures(stripped) {
                let details = NodeDetails::Step(StepMeta {
                    step_type: Some(StepType::Sequential),
                    ..StepMeta::default()
                });
                self.append(caps[1].trim(), details)?;
            }
            return Ok(i + 1);
        }
        if let Some(content) = stripped
            .strip_prefix('-')
            .or_else(|| stripped.strip_prefix('*'))
        {
            let content = content.trim();
            if is_decision(content) {
                return self.decision(lines, i, content);
            }
            let details = NodeDetails::Step(StepMeta {
                step_type: Some(StepType::Bullet),
                ..StepMeta::default()
            });
            self.append(content, details)?;
            return Ok(i + 1);
        }
        Ok(i + 1)
    }

    /// Add a node linked from the previous item and make it the new tail.
    fn append(&mut self, label: &str, details: NodeDetails) -> Result<String, GraphError> {
        let id = self.builder.add_node(label, details)?;
        if let Some(prev) = &self.last {
            self.builder.connect(prev, &id, None)?;
        }
        self.last = Some(id.clone());
        Ok(id)
    }

    fn header(&mut self, line: &str) -> Result<(), GraphError> {
        let depth = line.chars().take_while(|c| *c == '#').count();
        let level = u32::try_from(depth).unwrap_or(u32::MAX);
        let label = line.trim_start_matches('#').trim();
        let details = NodeDetails::Phase(PhaseMeta {
            level: Some(level),
            header_type: Some(format!("h{level}")),
            ..PhaseMeta::default()
        });
        self.append(label, details)?;
        Ok(())
    }

    /// A decision bullet plus the indented branch bullets right below it.
    fn decision(&mut self, lines: &[&str], start: usize, content: &str) -> Result<usize, GraphError> {
        let details = NodeDetails::Decision(DecisionMeta {
            condition: Some(content.to_string()),
            ..DecisionMeta::default()
        });
        let decision_id = self.append(&extract_condition(content), details)?;

        let lower = content.to_lowercase();
        let negative = lower.contains("else") || lower.contains("otherwise");
        let mut branches: Vec<(&str, &str)> = Vec::new();
        let mut idx = start + 1;
        while let Some(line) = lines.get(idx) {
            if !BRANCH_PREFIXES.iter().any(|p| line.starts_with(p)) {
                break;
            }
            let branch_content = line.trim()[1..].trim();
            let label = if negative || !branches.is_empty() {
                "no"
            } else {
                "yes"
            };
            branches.push((label, branch_content));
            idx += 1;
        }

        let mut merge_id: Option<String> = None;
        for (label, branch_content) in &branches {
            let details = NodeDetails::Step(StepMeta {
                branch: Some((*label).to_string()),
                ..StepMeta::default()
            });
            let branch_id = self.builder.add_node(*branch_content, details)?;
            self.builder
                .connect(&decision_id, &branch_id, Some((*label).to_string()))?;
            if merge_id.is_none() && branches.len() > 1 {
                let details = NodeDetails::Merge(MergeMeta {
                    merge_type: Some("decision".to_string()),
                });
                merge_id = Some(self.builder.add_node("Continue", details)?);
            }
            if let Some(merge) = &merge_id {
                self.builder.connect(&branch_id, merge, None)?;
            }
        }

        self.last = Some(merge_id.unwrap_or(decision_id));
        Ok(idx)
    }

    /// A fenced code block; an unterminated fence runs to the end of input.
    fn code_block(&mut self, lines: &[&str], start: usize) -> Result<usize, GraphError> {
        let language = lines[start].trim()[3..].trim();
        let mut idx = start + 1;
        let mut code: Vec<&str> = Vec::new();
        while let Some(line) = lines.get(idx) {
            if line.trim().starts_with("```") {
                break;
            }
            code.push(line);
            idx += 1;
        }
        let label = if language.is_empty() {
            "Execute code".to_string()
        } else {
            format!("Execute {language}")
        };
        let details = NodeDetails::Execute(ExecuteMeta {
            language: Some(language.to_string()),
            code: Some(code.join("\n")),
        });
        self.append(&label, details)?;
        Ok(idx + 1)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_parsers_markdown.rs"]
mod tests;
