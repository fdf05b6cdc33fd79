// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation
//!
//! rasterview: headless demo host
//!
//! Renders a text file into a recording surface and prints the draw commands
//! of the resulting frame.
//!
//! ```text
//! rasterview <file> [line[:col]] [--find <text>]
//! ```
//!
//! Set `RUST_LOG=rasterview_view=debug` to see render decisions.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rasterview::lines::Position;
use rasterview::view::ViewConfig;
use rasterview::{render_text, DemoOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "rasterview", about = "Render a text file and print its draw commands", version)]
struct Cli {
    /// File to render
    file: PathBuf,

    /// Scroll to this 1-based `line` or `line:col` and put a cursor there
    #[arg(value_parser = parse_position)]
    target: Option<Position>,

    /// Highlight every occurrence of this text
    #[arg(short, long)]
    find: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rasterview=info,rasterview_view=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let options = DemoOptions {
        scroll_to: cli.target,
        find: cli.find,
        config: ViewConfig::load_default(),
        ..DemoOptions::default()
    };
    let output = render_text(&text, &options).context("failed to create view")?;

    let viewport = output.viewport;
    println!(
        "# viewport lines {}..={} chars {}..{}",
        viewport.line_start, viewport.line_end, viewport.char_start, viewport.char_end
    );
    for command in &output.commands {
        println!("{command}");
    }
    Ok(())
}

/// Parses a 1-based `line` or `line:col` argument.
fn parse_position(arg: &str) -> Result<Position, String> {
    let (line, col) = match arg.split_once(':') {
        Some((line, col)) => (line, Some(col)),
        None => (arg, None),
    };
    let line: usize = line.parse().map_err(|_| format!("invalid line: {line}"))?;
    let col: usize = match col {
        Some(col) => col.parse().map_err(|_| format!("invalid column: {col}"))?,
        None => 1,
    };
    Ok(Position::new(line.saturating_sub(1), col.saturating_sub(1)))
}
