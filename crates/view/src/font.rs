// Chunk: docs/chunks/font_metrics - Font metrics provider
//!
//! Font metrics for layout and hit-testing.
//!
//! The renderer only needs five things from a font: the fixed glyph advance,
//! the line height, the baseline offset within a line, a descriptor string to
//! hand to the surface, and the pixel width of an arbitrary substring. The
//! `FontMetrics` trait is that boundary; the host supplies whatever measures
//! its real font.
//!
//! `MonospaceMetrics` is the built-in implementation for a fixed-advance
//! font. For a monospace font, layout is trivial:
//! - x = cells * advance_width
//! - y = row * line_height
//!
//! where `cells` is the terminal display width (wide CJK characters take two
//! cells, combining marks take none).

use rasterview_lines::{Style, SubscriptionId, Subscribers};
use unicode_width::UnicodeWidthChar;

/// Glyph advance as a fraction of the font size
const ADVANCE_RATIO: f32 = 0.6;
/// Line height as a fraction of the font size
const LINE_HEIGHT_RATIO: f32 = 1.5;
/// Ascent as a fraction of the font size
const ASCENT_RATIO: f32 = 0.8;

/// Read access to the active font's metrics.
pub trait FontMetrics {
    /// Width of one monospace cell in CSS pixels.
    fn ascii_width(&self) -> f32;
    /// Height of one line in CSS pixels.
    fn line_height(&self) -> f32;
    /// Distance from the top of a line to the text baseline.
    fn baseline(&self) -> f32;
    /// Font descriptor for the surface, e.g. `"14px monospace"`.
    fn font_string(&self) -> String;
    /// Pixel width of `text` when drawn in the active font.
    fn text_width(&self, text: &str) -> f32;
}

/// Metrics for a fixed-advance font.
#[derive(Debug)]
pub struct MonospaceMetrics {
    family: String,
    size_px: f32,
    ascii_width: f32,
    line_height: f32,
    baseline: f32,
    subscribers: Subscribers<()>,
}

impl MonospaceMetrics {
    /// Derives metrics from a family name and a size in CSS pixels.
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        let mut metrics = Self {
            family: family.into(),
            size_px: 0.0,
            ascii_width: 0.0,
            line_height: 0.0,
            baseline: 0.0,
            subscribers: Subscribers::new(),
        };
        metrics.apply_size(size_px);
        metrics
    }

    /// Uses an exact advance and line height, deriving the rest.
    pub fn fixed(ascii_width: f32, line_height: f32) -> Self {
        let size_px = line_height / LINE_HEIGHT_RATIO;
        Self {
            family: "monospace".to_string(),
            size_px,
            ascii_width,
            line_height,
            baseline: baseline_for(size_px, line_height),
            subscribers: Subscribers::new(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Switches font and notifies subscribers.
    pub fn set_font(&mut self, family: impl Into<String>, size_px: f32) {
        self.family = family.into();
        self.apply_size(size_px);
        self.subscribers.emit(&());
    }

    /// Registers a callback invoked once per font change.
    pub fn on_update(&mut self, callback: impl Fn(&()) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn apply_size(&mut self, size_px: f32) {
        let size_px = if size_px.is_finite() { size_px.max(0.0) } else { 0.0 };
        self.size_px = size_px;
        self.ascii_width = (size_px * ADVANCE_RATIO).round();
        self.line_height = (size_px * LINE_HEIGHT_RATIO).round();
        self.baseline = baseline_for(size_px, self.line_height);
    }
}

/// Baseline with the glyph box centered vertically in the line.
fn baseline_for(size_px: f32, line_height: f32) -> f32 {
    ((line_height - size_px) / 2.0 + size_px * ASCENT_RATIO).round()
}

/// Number of monospace cells `c` occupies.
pub fn char_cells(c: char) -> usize {
    c.width().unwrap_or(0)
}

impl FontMetrics for MonospaceMetrics {
    fn ascii_width(&self) -> f32 {
        self.ascii_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn baseline(&self) -> f32 {
        self.baseline
    }

    fn font_string(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }

    fn text_width(&self, text: &str) -> f32 {
        let cells: usize = text.chars().map(char_cells).sum();
        cells as f32 * self.ascii_width
    }
}

/// Font descriptor for a text style: the base descriptor with `italic` and
/// `bold` prefixes as the style requires.
pub fn font_for_style(metrics: &dyn FontMetrics, style: Option<&Style>) -> String {
    let base = metrics.font_string();
    match style {
        Some(s) if s.italic && s.bold => format!("italic bold {base}"),
        Some(s) if s.italic => format!("italic {base}"),
        Some(s) if s.bold => format!("bold {base}"),
        _ => base,
    }
}
