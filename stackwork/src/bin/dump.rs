//! stackwork-dump - lay out a definition file and print its frames.
//!
//! Reads an element definition (JSON), optional bound values, and prints
//! the root and leaf frames for each requested width as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stackwork::{LayoutConfig, LayoutEngine, Rect, Template};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// One pretty-printed JSON document
    #[default]
    Json,
    /// One compact JSON object per width, one per line
    Lines,
}

#[derive(Parser)]
#[command(name = "stackwork-dump")]
#[command(about = "Lay out an element definition and print its frames", long_about = None)]
struct Cli {
    /// Element definition file (JSON)
    definition: PathBuf,

    /// Bound values file: a JSON object of name -> string | {width, height} | null
    #[arg(short, long)]
    bindings: Option<PathBuf>,

    /// Widths to lay out at
    #[arg(short, long, value_delimiter = ',', default_value = "320")]
    widths: Vec<f32>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cache key; layouts are repeated through the cache to check round-trips
    #[arg(short, long)]
    key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct WidthOutput {
    width: f32,
    root: Rect,
    leaves: Vec<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_round_trip: Option<bool>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let template = Template::load(&cli.definition)
        .with_context(|| format!("failed to load definition {}", cli.definition.display()))?;

    let mut root = template.instantiate();
    if let Some(path) = &cli.bindings {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read bindings {}", path.display()))?;
        let values = template
            .values_from_json(&json)
            .with_context(|| format!("failed to bind values from {}", path.display()))?;
        root.bind(&values);
    }

    tracing::info!(
        leaves = root.leaf_count(),
        bindings = template.bindings().len(),
        "loaded definition"
    );

    let mut engine = LayoutEngine::new(root, config);
    let mut outputs = Vec::with_capacity(cli.widths.len());
    for &width in &cli.widths {
        let key = cli.key.as_deref();
        let root = engine.layout(width, key);
        let leaves = engine.leaf_frames();

        // A second run at the same width is served from the cache.
        let cache_round_trip = key.map(|_| {
            let cached_root = engine.layout(width, key);
            cached_root == root && engine.leaf_frames() == leaves
        });

        outputs.push(WidthOutput {
            width,
            root,
            leaves,
            cache_round_trip,
        });
    }

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
        OutputFormat::Lines => {
            for output in &outputs {
                println!("{}", serde_json::to_string(output)?);
            }
        }
    }
    Ok(())
}
