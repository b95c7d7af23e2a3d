//! playbook-forge CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use playbook_forge::config::{LayoutConfig, LayoutDirection, RenderConfig};
use playbook_forge::error::ParseError;
use playbook_forge::graph::PlaybookGraph;
use playbook_forge::layout::auto_layout_with_config;
use playbook_forge::parsers::{self, SourceFormat};
use playbook_forge::renderers::{AsciiRenderer, Renderer};
use playbook_forge::syntax::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Markdown,
    Mermaid,
    /// Graph exchange JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Emit {
    /// Graph exchange JSON
    Graph,
    /// Positioned nodes as JSON
    Layout,
    /// Text drawing of the layout
    #[default]
    Preview,
}

/// Playbook (Markdown / Mermaid) to graph, layout, or text preview.
#[derive(Parser, Debug)]
#[command(
    name = "playbook-forge",
    version = env!("PLAYBOOK_FORGE_VERSION"),
    about = "Playbook (Markdown / Mermaid) to graph, layout, or text preview"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Input format (auto-detected between markdown and mermaid if omitted)
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<InputFormat>,

    /// What to write
    #[arg(short = 'e', long = "emit", value_enum, default_value_t = Emit::Preview)]
    emit: Emit,

    /// Spacing between siblings (top-down) or levels (left-right)
    #[arg(long = "hspacing")]
    hspacing: Option<f64>,

    /// Spacing between levels (top-down) or siblings (left-right)
    #[arg(long = "vspacing")]
    vspacing: Option<f64>,

    /// Override direction (TD, LR; TB, BT and RL are accepted as aliases)
    #[arg(short = 'd', long = "direction")]
    direction: Option<String>,

    /// Use plain ASCII instead of Unicode box-drawing characters
    #[arg(short = 'a', long = "ascii")]
    use_ascii: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Parsed graph plus the direction its source declared, if any.
fn load(
    text: &str,
    format: Option<InputFormat>,
) -> Result<(PlaybookGraph, Option<Direction>), ParseError> {
    let source = match format {
        Some(InputFormat::Json) => return Ok((PlaybookGraph::from_json(text)?, None)),
        Some(InputFormat::Markdown) => Some(SourceFormat::Markdown),
        Some(InputFormat::Mermaid) => Some(SourceFormat::Mermaid),
        None => None,
    };
    let parsed = parsers::parse(text, source)?;
    info!(
        format = %parsed.metadata.format,
        nodes = parsed.metadata.node_count,
        edges = parsed.metadata.edge_count,
        title = parsed.metadata.title.as_deref().unwrap_or(""),
        "parsed playbook"
    );
    Ok((parsed.graph, parsed.direction))
}

fn run(cli: &Cli, text: &str, direction: Option<LayoutDirection>) -> Result<String, ParseError> {
    let (graph, declared) = load(text, cli.format)?;

    let mut config = LayoutConfig::default().with_direction(
        direction
            .or_else(|| declared.map(LayoutDirection::from))
            .unwrap_or_default(),
    );
    if let Some(h) = cli.hspacing {
        config = config.with_horizontal_spacing(h);
    }
    if let Some(v) = cli.vspacing {
        config = config.with_vertical_spacing(v);
    }

    match cli.emit {
        Emit::Graph => {
            graph.validate()?;
            Ok(graph.to_json_pretty()? + "\n")
        }
        Emit::Layout => {
            let layout = auto_layout_with_config(&graph, &config)?;
            Ok(serde_json::to_string_pretty(&layout)? + "\n")
        }
        Emit::Preview => {
            let layout = auto_layout_with_config(&graph, &config)?;
            let renderer = AsciiRenderer::with_config(RenderConfig {
                unicode: !cli.use_ascii,
                ..RenderConfig::default()
            });
            Ok(renderer.render(&graph, &layout))
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let direction = match cli.direction.as_deref().map(str::parse::<LayoutDirection>) {
        None => None,
        Some(Ok(d)) => Some(d),
        Some(Err(e)) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let rendered = match run(&cli, &text, direction) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
