// Subsystem: docs/subsystems/viewport_scroll - Viewport mapping & scroll arithmetic
// Chunk: docs/chunks/viewport_scroll - Two-axis scroll state
// Chunk: docs/chunks/partial_rerender - DirtyLines to screen rows
//!
//! Scroll and viewport state for the raster view.
//!
//! `ViewportState` owns the scroll offsets (CSS pixels), the canvas size (CSS
//! pixels) and the device pixel ratio. Everything else it needs (line height,
//! glyph advance, gutter width, document height, content width) is passed in
//! as a `LayoutMetrics` on each call, because those values belong to the
//! providers and change independently of scrolling.
//!
//! Mutators (`resize`, `scroll_by`, `scroll_to`, `clamp`) always clamp before
//! returning, so `viewport()` never observes an out-of-range offset. The
//! accessor is a pure function of the state and the metrics.
//!
//! Vertical clamp: the offset may not exceed
//! `(total_lines - floor(height / line_height)) * line_height`, i.e. the last
//! fully visible page. With scroll-past-end enabled the limit is
//! `total_lines * line_height`.
//!
//! Horizontal clamp: the offset may not exceed
//! `content_width - (width - gutter_width)`.

use std::ops::Range;

use rasterview_lines::{DirtyLines, Position};

use crate::dirty_region::DirtyRegion;
use crate::scroller::AxisScroller;

/// The visible line/char rectangle over the logical document.
///
/// `line_start..=line_end` are the lines touched by the canvas (the last one
/// may be partially visible). `char_start..char_end` are the columns of the
/// content area left of the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub line_start: usize,
    pub line_end: usize,
    pub char_start: usize,
    pub char_end: usize,
}

impl Viewport {
    /// Returns true if `pos` lies inside the viewport bounds (inclusive).
    pub fn contains(&self, pos: Position) -> bool {
        (self.line_start..=self.line_end).contains(&pos.line)
            && (self.char_start..=self.char_end).contains(&pos.col)
    }
}

/// Provider-derived inputs to the scroll arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub line_height: f32,
    pub ascii_width: f32,
    pub gutter_width: f32,
    pub total_lines: usize,
    /// Width of the widest known line, including horizontal editor padding
    pub content_width: f32,
    pub scroll_past_end: bool,
}

/// Scroll offsets, canvas size and device pixel ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    x: AxisScroller,
    y: AxisScroller,
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
}

impl ViewportState {
    /// Creates a zero-sized state at scroll (0, 0).
    pub fn new(device_pixel_ratio: f32) -> Self {
        Self {
            x: AxisScroller::new(),
            y: AxisScroller::new(),
            width: 0.0,
            height: 0.0,
            device_pixel_ratio: sanitize_ratio(device_pixel_ratio),
        }
    }

    /// Canvas width in CSS pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in CSS pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Horizontal scroll offset in CSS pixels.
    pub fn scroll_x(&self) -> f32 {
        self.x.offset_px()
    }

    /// Vertical scroll offset in CSS pixels.
    pub fn scroll_y(&self) -> f32 {
        self.y.offset_px()
    }

    /// Backing-store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        let scale = |v: f32| (v * self.device_pixel_ratio).round() as u32;
        (scale(self.width), scale(self.height))
    }

    /// Changes the device pixel ratio. CSS dimensions are unchanged.
    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.device_pixel_ratio = sanitize_ratio(ratio);
    }

    /// Sets the canvas size in CSS pixels and re-clamps the scroll offsets.
    ///
    /// Zero is allowed and yields an empty viewport. Negative or NaN sizes are
    /// treated as zero.
    pub fn resize(&mut self, width: f32, height: f32, metrics: &LayoutMetrics) {
        self.width = sanitize_len(width);
        self.height = sanitize_len(height);
        self.clamp(metrics);
    }

    /// Width of the content area to the right of the gutter.
    pub fn content_view_width(&self, metrics: &LayoutMetrics) -> f32 {
        (self.width - metrics.gutter_width).max(0.0)
    }

    /// Largest allowed vertical offset.
    pub fn max_scroll_y(&self, metrics: &LayoutMetrics) -> f32 {
        if metrics.line_height <= 0.0 {
            return 0.0;
        }
        if metrics.scroll_past_end {
            return metrics.total_lines as f32 * metrics.line_height;
        }
        let visible_lines = (self.height / metrics.line_height).floor() as usize;
        metrics.total_lines.saturating_sub(visible_lines) as f32 * metrics.line_height
    }

    /// Largest allowed horizontal offset.
    pub fn max_scroll_x(&self, metrics: &LayoutMetrics) -> f32 {
        (metrics.content_width - self.content_view_width(metrics)).max(0.0)
    }

    /// Re-clamps both offsets. Returns true if either moved.
    pub fn clamp(&mut self, metrics: &LayoutMetrics) -> bool {
        let moved_x = self.x.clamp(self.max_scroll_x(metrics));
        let moved_y = self.y.clamp(self.max_scroll_y(metrics));
        moved_x || moved_y
    }

    /// Adds signed pixel deltas, then clamps. Returns true if either offset changed.
    pub fn scroll_by(&mut self, dx: f32, dy: f32, metrics: &LayoutMetrics) -> bool {
        let moved_x = self.x.scroll_by(dx, self.max_scroll_x(metrics));
        let moved_y = self.y.scroll_by(dy, self.max_scroll_y(metrics));
        moved_x || moved_y
    }

    /// Scrolls the minimum distance that makes `pos` visible.
    ///
    /// Lines past the end of the document are clamped to the last line. The
    /// caller is responsible for making `metrics.content_width` wide enough
    /// to include `pos.col`, otherwise the horizontal clamp may cut it off.
    /// Returns true if either offset changed.
    pub fn scroll_to(&mut self, pos: Position, metrics: &LayoutMetrics) -> bool {
        let mut moved = false;

        if metrics.line_height > 0.0 && metrics.total_lines > 0 {
            let line = pos.line.min(metrics.total_lines - 1) as f32;
            let top = line * metrics.line_height;
            moved |= self.y.ensure_visible(
                top,
                top + metrics.line_height,
                self.height,
                self.max_scroll_y(metrics),
            );
        }

        if metrics.ascii_width > 0.0 {
            let left = pos.col as f32 * metrics.ascii_width;
            moved |= self.x.ensure_visible(
                left,
                left + metrics.ascii_width,
                self.content_view_width(metrics),
                self.max_scroll_x(metrics),
            );
        }

        moved
    }

    /// Returns the visible line/char rectangle.
    pub fn viewport(&self, metrics: &LayoutMetrics) -> Viewport {
        let mut viewport = Viewport::default();

        if metrics.line_height > 0.0 {
            let y = self.y.offset_px();
            let last_line = metrics.total_lines.saturating_sub(1);
            let line_end = ((y + self.height) / metrics.line_height).floor() as usize;
            viewport.line_end = line_end.min(last_line);
            let line_start = (y / metrics.line_height).floor() as usize;
            viewport.line_start = line_start.min(viewport.line_end);
        }

        if metrics.ascii_width > 0.0 {
            let x = self.x.offset_px();
            viewport.char_start = (x / metrics.ascii_width).floor() as usize;
            let right = x + self.content_view_width(metrics);
            viewport.char_end = (right / metrics.ascii_width).floor() as usize;
        }

        viewport
    }

    /// Line slots under the canvas, `floor(y / lh) ..= ceil((y + h) / lh)`,
    /// whether or not the document reaches that far.
    pub fn canvas_rows(&self, metrics: &LayoutMetrics) -> Range<usize> {
        if metrics.line_height <= 0.0 {
            return 0..0;
        }
        let y = self.y.offset_px();
        let first = (y / metrics.line_height).floor() as usize;
        let last = ((y + self.height) / metrics.line_height).ceil() as usize;
        first..last + 1
    }

    /// Lines touched by the canvas: `canvas_rows` clamped to the document.
    pub fn expanded_lines(&self, metrics: &LayoutMetrics) -> Range<usize> {
        if metrics.total_lines == 0 {
            return 0..0;
        }
        let rows = self.canvas_rows(metrics);
        let end = rows.end.min(metrics.total_lines);
        rows.start.min(end)..end
    }

    /// Top edge of `line` relative to the canvas, before editor padding.
    pub fn line_top(&self, line: usize, metrics: &LayoutMetrics) -> f32 {
        line as f32 * metrics.line_height - self.y.offset_px()
    }

    /// Converts a line-data update to the canvas rows that need repainting.
    ///
    /// Rows are counted from the first slot of `canvas_rows`. Slots past the
    /// document end count too: after the document shrinks, the update names
    /// lines that no longer exist and their rows still show old text. Lines
    /// off screen produce `DirtyRegion::None`; a `FromLineToEnd` at or above
    /// the first row produces `FullViewport`.
    pub fn dirty_lines_to_region(&self, dirty: &DirtyLines, metrics: &LayoutMetrics) -> DirtyRegion {
        let canvas = self.canvas_rows(metrics);
        if canvas.is_empty() {
            return DirtyRegion::None;
        }
        if let DirtyLines::FromLineToEnd(line) = dirty {
            if *line <= canvas.start {
                return DirtyRegion::FullViewport;
            }
        }
        match dirty.clip_to(canvas.clone()) {
            Some(rows) => DirtyRegion::line_range(rows.start - canvas.start, rows.end - canvas.start),
            None => DirtyRegion::None,
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn sanitize_len(len: f32) -> f32 {
    if len.is_finite() && len > 0.0 {
        len
    } else {
        0.0
    }
}
