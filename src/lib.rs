// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation

//! rasterview: a viewport-relative raster rendering front-end.
//!
//! The rendering core lives in the workspace crates and is re-exported here:
//!
//! - [`lines`]: the line data model and provider interfaces
//! - [`view`]: viewport state, hit-testing and the render pipeline
//!
//! This crate adds a headless host that wires the core to an in-memory line
//! cache, fixed-advance font metrics and a recording surface, the same way a
//! windowed host would wire it to a real engine and canvas.
//!
//! # Example
//!
//! ```
//! use rasterview::{render_text, DemoOptions};
//!
//! let output = render_text("alpha\nbeta\n", &DemoOptions::default()).unwrap();
//! assert_eq!(output.viewport.line_end, 1);
//! assert!(output.commands.iter().any(|c| c.starts_with("text \"beta\"")));
//! ```

use std::ops::Range;

use rasterview_lines::{Line, LineCache, LineSource, Position, StyleId, StyleSpan, StyleTable};
use rasterview_view::{
    connect_line_cache, create_event_channel, CanvasView, DrawCommand, EventDrainLoop,
    MonospaceMetrics, RecordingSurface, RenderContext, ViewBackend, ViewConfig, ViewError,
    Viewport,
};
use tracing::{debug, info};

pub use rasterview_lines as lines;
pub use rasterview_view as view;

/// Host settings for a headless render.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Canvas width in CSS pixels
    pub width: f32,
    /// Canvas height in CSS pixels
    pub height: f32,
    pub device_pixel_ratio: f32,
    /// Font size in CSS pixels
    pub font_size: f32,
    /// Scroll this position into view and put a cursor there
    pub scroll_to: Option<Position>,
    /// Highlight every occurrence of this string
    pub find: Option<String>,
    pub config: ViewConfig,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            device_pixel_ratio: 1.0,
            font_size: 16.0,
            scroll_to: None,
            find: None,
            config: ViewConfig::default(),
        }
    }
}

/// What a headless render produced.
#[derive(Debug, Clone)]
pub struct DemoOutput {
    /// Draw commands of the final frame, one line each
    pub commands: Vec<String>,
    pub viewport: Viewport,
    /// `compute_missing` requests the view issued
    pub missing: Vec<Range<usize>>,
}

/// Renders `text` in a headless view and returns the final frame.
pub fn render_text(text: &str, options: &DemoOptions) -> Result<DemoOutput, ViewError> {
    let cursor = options.scroll_to;
    let mut cache = LineCache::new();
    let lines: Vec<Line> = text
        .lines()
        .enumerate()
        .map(|(n, s)| build_line(s, options.find.as_deref(), cursor.filter(|p| p.line == n)))
        .collect();
    cache.insert_lines(0, lines);
    info!(lines = cache.height(), "document loaded");

    let metrics = MonospaceMetrics::new("monospace", options.font_size);
    let styles = StyleTable::new();
    let (sender, receiver) = create_event_channel(|| {});
    let subscription = connect_line_cache(&mut cache, &sender);

    let view = CanvasView::new(
        RecordingSurface::new(),
        options.config.clone(),
        options.device_pixel_ratio,
    )?;
    let mut drain = EventDrainLoop::new(view, receiver, sender.clone());
    drain.view_mut().surface_mut().clear();

    // Host events go through the same queue as provider updates.
    let _ = sender.send_resize(options.width, options.height);
    if let Some(pos) = cursor {
        let _ = sender.send_scroll_to(pos);
    }
    let ctx = RenderContext::new(&cache, &metrics, &styles);
    let kind = drain.process_pending_events(ctx);
    debug!(?kind, "initial frame");

    let viewport = drain.view().viewport(ctx);
    let missing = cache.take_missing_requests();
    let commands = drain
        .view_mut()
        .surface_mut()
        .take_commands()
        .iter()
        .map(format_command)
        .collect();
    cache.unsubscribe(subscription);

    Ok(DemoOutput {
        commands,
        viewport,
        missing,
    })
}

/// Builds a line with find-highlight spans and an optional cursor.
fn build_line(text: &str, find: Option<&str>, cursor: Option<Position>) -> Line {
    let spans = match find {
        Some(needle) if !needle.is_empty() => text
            .match_indices(needle)
            .map(|(start, m)| StyleSpan::new(StyleId::FIND_HIGHLIGHT, start, m.len()))
            .collect(),
        _ => Vec::new(),
    };
    let line = Line::new(text);
    let cursors = cursor
        .map(|p| vec![p.col.min(line.char_count())])
        .unwrap_or_default();
    // Spans come from match_indices and cursors are clamped, so both are in range.
    line.clone()
        .with_styles(spans)
        .and_then(|l| l.with_cursors(cursors))
        .unwrap_or(line)
}

/// One-line, human-readable form of a draw command.
pub fn format_command(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Configure {
            width_px,
            height_px,
            scale,
        } => format!("configure {width_px}x{height_px} @{scale}"),
        DrawCommand::Save => "save".to_string(),
        DrawCommand::Restore => "restore".to_string(),
        DrawCommand::Clip(r) => format!("clip {} {} {} {}", r.x, r.y, r.width, r.height),
        DrawCommand::SetFont(font) => format!("font {font}"),
        DrawCommand::SetFill(color) => format!("fill {color}"),
        DrawCommand::FillRect(r) => format!("rect {} {} {} {}", r.x, r.y, r.width, r.height),
        DrawCommand::FillText { text, x, y } => format!("text {text:?} {x} {y}"),
    }
}
