// Chunk: docs/chunks/raster_surface - Workspace + raster surface foundation
// Chunk: docs/chunks/render_passes - Background, foreground and gutter passes
// Chunk: docs/chunks/partial_rerender - Row-band repaint on line updates
//!
//! Raster render pipeline
//!
//! `CanvasView` turns the scroll state and the provider data into drawing
//! commands on a `RasterSurface`. Each paint runs three ordered passes over
//! the lines touched by the canvas:
//!
//! 1. backgrounds: find highlights, then selection on top
//! 2. foreground: cursor bars, then styled text runs
//! 3. gutter: background, separator, right-aligned line numbers
//!
//! Passes 1 and 2 are clipped to the content area right of the gutter.
//! Lines the provider has not delivered yet are skipped in every pass; the
//! provider's update notification triggers a repaint once they arrive.
//!
//! The view never owns provider data. Every call that reads it takes a
//! `RenderContext` of borrowed providers.
//!
//! ## Module Organization
//!
//! - `clip` - Clip rect helpers
//! - `background` - Selection and highlight rectangles
//! - `foreground` - Cursor bars and text runs
//! - `gutter` - Line-number gutter

mod background;
mod clip;
mod foreground;
mod gutter;

use std::ops::Range;
use std::path::Path;

use rasterview_lines::{DirtyLines, LineSource, Position, Rgba, StyleLookup};
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::coords::{col_at_canvas_x, line_at_y, prefix_width};
use crate::dirty_region::{DirtyRegion, InvalidationKind};
use crate::error::ViewError;
use crate::font::FontMetrics;
use crate::gutter::{measure_gutter, GutterGeometry};
use crate::line_widths::LineWidthCache;
use crate::surface::{RasterSurface, Rect};
use crate::view_event::ViewEvent;
use crate::viewport::{LayoutMetrics, Viewport, ViewportState};

// =============================================================================
// RenderContext
// =============================================================================

/// Borrowed, read-only access to the external providers.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub lines: &'a dyn LineSource,
    pub metrics: &'a dyn FontMetrics,
    pub styles: &'a dyn StyleLookup,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        lines: &'a dyn LineSource,
        metrics: &'a dyn FontMetrics,
        styles: &'a dyn StyleLookup,
    ) -> Self {
        Self {
            lines,
            metrics,
            styles,
        }
    }
}

// =============================================================================
// ViewBackend
// =============================================================================

/// The capability interface a rendering backend exposes to its controller.
///
/// Mutators apply their state change and then repaint before returning.
/// Sizes, scroll deltas and points are in CSS pixels unless a method says
/// otherwise; pointer events that arrive in backing-store pixels go through
/// `pos_from_device_coords`.
pub trait ViewBackend {
    fn resize(&mut self, ctx: RenderContext<'_>, width: f32, height: f32);
    fn scroll_by(&mut self, ctx: RenderContext<'_>, dx: f32, dy: f32);
    fn scroll_to(&mut self, ctx: RenderContext<'_>, pos: Position);
    /// Maps a point in CSS pixels to a logical position.
    fn pos_from_coords(&self, ctx: RenderContext<'_>, x: f32, y: f32) -> Position;
    /// Maps a point in device pixels (CSS pixels times the device pixel
    /// ratio) to a logical position.
    fn pos_from_device_coords(&self, ctx: RenderContext<'_>, x: f32, y: f32) -> Position;
    fn viewport(&self, ctx: RenderContext<'_>) -> Viewport;
    fn render(&mut self, ctx: RenderContext<'_>);
}

// =============================================================================
// CanvasView
// =============================================================================

/// The surface's current font and fill, so repeated values are not reissued.
#[derive(Debug, Default)]
struct Pen {
    font: Option<String>,
    fill: Option<Rgba>,
}

/// Raster rendering backend.
pub struct CanvasView<S: RasterSurface> {
    surface: S,
    /// False after a failed `configure`; paints are skipped until one succeeds
    surface_ready: bool,
    config: ViewConfig,
    state: ViewportState,
    gutter: GutterGeometry,
    widths: LineWidthCache,
    pen: Pen,
}

impl<S: RasterSurface> CanvasView<S> {
    /// Creates a view over `surface`.
    ///
    /// Fails if the surface cannot be configured, which is how a missing
    /// drawing context shows up.
    pub fn new(mut surface: S, config: ViewConfig, device_pixel_ratio: f32) -> Result<Self, ViewError> {
        let state = ViewportState::new(device_pixel_ratio);
        surface
            .configure(0, 0, state.device_pixel_ratio())
            .map_err(ViewError::SurfaceUnavailable)?;
        debug!(ratio = state.device_pixel_ratio(), "canvas view created");

        Ok(Self {
            surface,
            surface_ready: true,
            config,
            state,
            gutter: GutterGeometry::default(),
            widths: LineWidthCache::new(),
            pen: Pen::default(),
        })
    }

    /// Creates a view configured from a JSON config file.
    pub fn from_config_file(surface: S, path: &Path, device_pixel_ratio: f32) -> Result<Self, ViewError> {
        let config = ViewConfig::load(path)?;
        Self::new(surface, config, device_pixel_ratio)
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn gutter(&self) -> GutterGeometry {
        self.gutter
    }

    pub fn line_widths(&self) -> &LineWidthCache {
        &self.widths
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Current inputs to the scroll arithmetic.
    pub fn layout(&self, ctx: RenderContext<'_>) -> LayoutMetrics {
        LayoutMetrics {
            line_height: ctx.metrics.line_height(),
            ascii_width: ctx.metrics.ascii_width(),
            gutter_width: self.gutter.width,
            total_lines: ctx.lines.height(),
            content_width: self.widths.max_width() + self.config.editor_padding[0],
            scroll_past_end: self.config.scroll_past_end,
        }
    }

    // =========================================================================
    // State mutation
    // =========================================================================

    /// Applies one event to the view state and reports what must be repainted.
    ///
    /// Nothing is drawn; pass the (merged) result to `render_invalidation`.
    pub fn apply(&mut self, ctx: RenderContext<'_>, event: &ViewEvent) -> InvalidationKind {
        match event {
            ViewEvent::Scroll { dx, dy } => {
                let layout = self.sync_layout(ctx).0;
                moved_to_invalidation(self.state.scroll_by(*dx, *dy, &layout))
            }
            ViewEvent::Resize { width, height } => {
                let layout = self.sync_layout(ctx).0;
                self.state.resize(*width, *height, &layout);
                self.configure_surface()
            }
            ViewEvent::ScrollTo(pos) => self.apply_scroll_to(ctx, *pos),
            ViewEvent::LinesUpdated(dirty) => self.apply_lines_updated(ctx, dirty),
            ViewEvent::FontChanged => {
                self.widths.clear();
                let layout = self.sync_layout(ctx).0;
                self.state.clamp(&layout);
                InvalidationKind::Layout
            }
            ViewEvent::DevicePixelRatio(ratio) => {
                self.state.set_device_pixel_ratio(*ratio);
                self.configure_surface()
            }
        }
    }

    fn apply_scroll_to(&mut self, ctx: RenderContext<'_>, pos: Position) -> InvalidationKind {
        let layout = self.sync_layout(ctx).0;
        if layout.total_lines > 0 {
            // Make room for targets past the measured end of their line.
            let line = pos.line.min(layout.total_lines - 1);
            self.widths
                .reserve(line, (pos.col + 1) as f32 * layout.ascii_width);
        }
        let layout = self.layout(ctx);
        moved_to_invalidation(self.state.scroll_to(pos, &layout))
    }

    fn apply_lines_updated(&mut self, ctx: RenderContext<'_>, dirty: &DirtyLines) -> InvalidationKind {
        self.widths.invalidate(dirty);
        let (layout, gutter_changed) = self.sync_layout(ctx);
        let moved = self.state.clamp(&layout);
        if gutter_changed || moved {
            return InvalidationKind::Layout;
        }
        match self.state.dirty_lines_to_region(dirty, &layout) {
            DirtyRegion::None => InvalidationKind::None,
            region => InvalidationKind::Content(region),
        }
    }

    /// Remeasures the gutter and drops widths past the document end.
    /// Returns the fresh layout and whether the gutter width changed.
    fn sync_layout(&mut self, ctx: RenderContext<'_>) -> (LayoutMetrics, bool) {
        let total_lines = ctx.lines.height();
        self.widths.truncate(total_lines);
        let gutter = measure_gutter(&self.config, ctx.metrics, total_lines);
        let changed = gutter.width != self.gutter.width;
        self.gutter = gutter;
        (self.layout(ctx), changed)
    }

    fn configure_surface(&mut self) -> InvalidationKind {
        let (width_px, height_px) = self.state.device_size();
        match self
            .surface
            .configure(width_px, height_px, self.state.device_pixel_ratio())
        {
            Ok(()) => {
                self.surface_ready = true;
                InvalidationKind::Layout
            }
            Err(e) => {
                warn!(error = %e, width_px, height_px, "surface configure failed, skipping render");
                self.surface_ready = false;
                InvalidationKind::None
            }
        }
    }

    // =========================================================================
    // Provider notifications
    // =========================================================================

    /// Repaints after the line provider delivered new data.
    ///
    /// Only the rows that are both dirty and on screen are repainted, unless
    /// the update changed the gutter width or the scroll clamp.
    pub fn on_lines_updated(&mut self, ctx: RenderContext<'_>, dirty: DirtyLines) {
        let kind = self.apply(ctx, &ViewEvent::LinesUpdated(dirty));
        self.render_invalidation(ctx, kind);
    }

    /// Repaints everything after the font changed.
    pub fn on_font_changed(&mut self, ctx: RenderContext<'_>) {
        let kind = self.apply(ctx, &ViewEvent::FontChanged);
        self.render_invalidation(ctx, kind);
    }

    // =========================================================================
    // Hit-testing
    // =========================================================================

    fn hit_test(&self, ctx: RenderContext<'_>, x: f32, y: f32) -> Position {
        let doc_y = y + self.state.scroll_y() - self.config.editor_padding[1];
        let Some(line_no) = line_at_y(doc_y, ctx.metrics.line_height(), ctx.lines.height()) else {
            return Position::default();
        };
        let Some(line) = ctx.lines.get(line_no) else {
            // Not fetched yet
            return Position::default();
        };
        let col = col_at_canvas_x(line, ctx.metrics, self.text_origin_x(), x);
        Position::new(line_no, col)
    }

    /// Canvas x (CSS pixels) of the left edge of `col` on `line`.
    ///
    /// Falls back to fixed-advance geometry when the line is not loaded.
    pub fn x_for_col(&self, ctx: RenderContext<'_>, line: usize, col: usize) -> f32 {
        let offset = match ctx.lines.get(line) {
            Some(l) => prefix_width(l, ctx.metrics, col),
            None => col as f32 * ctx.metrics.ascii_width(),
        };
        self.text_origin_x() + offset
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paints whatever `kind` says is stale.
    pub fn render_invalidation(&mut self, ctx: RenderContext<'_>, kind: InvalidationKind) {
        match kind {
            InvalidationKind::None | InvalidationKind::Content(DirtyRegion::None) => {}
            InvalidationKind::Layout | InvalidationKind::Content(DirtyRegion::FullViewport) => {
                self.render_full(ctx)
            }
            InvalidationKind::Content(DirtyRegion::Lines { from, to }) => {
                self.render_rows(ctx, from..to)
            }
        }
    }

    fn render_full(&mut self, ctx: RenderContext<'_>) {
        if !self.surface_ready {
            debug!("surface not configured, skipping render");
            return;
        }
        // State mutation precedes the reads used for drawing.
        let layout = self.sync_layout(ctx).0;
        self.state.clamp(&layout);

        let lines = self.state.expanded_lines(&layout);
        if !lines.is_empty() {
            ctx.lines.compute_missing(lines.clone());
        }
        let band = clip::full_canvas_rect(self.state.width(), self.state.height());
        debug!(first = lines.start, end = lines.end, "full render");
        self.paint(ctx, &layout, lines, band);
    }

    /// Repaints screen rows `rows`, counted from the first canvas row.
    ///
    /// Rows below the last line are cleared and left empty.
    fn render_rows(&mut self, ctx: RenderContext<'_>, rows: Range<usize>) {
        if !self.surface_ready {
            return;
        }
        let layout = self.layout(ctx);
        let canvas = self.state.canvas_rows(&layout);
        let start = (canvas.start + rows.start).min(canvas.end);
        let end = (canvas.start + rows.end).min(canvas.end);
        if start >= end {
            return;
        }
        let lines = start.min(layout.total_lines)..end.min(layout.total_lines);
        if !lines.is_empty() {
            ctx.lines.compute_missing(lines.clone());
        }

        let band = clip::row_band_rect(
            self.line_top(start, &layout),
            end - start,
            layout.line_height,
            self.state.width(),
            self.state.height(),
        );
        debug!(first = start, end, "partial render");
        self.paint(ctx, &layout, lines, band);
    }

    /// Clears `band` and runs all three passes over `lines` inside it.
    fn paint(&mut self, ctx: RenderContext<'_>, layout: &LayoutMetrics, lines: Range<usize>, band: Rect) {
        self.surface.save();
        self.pen = Pen::default();
        self.surface.clip(band);
        self.use_fill(self.config.theme.background);
        self.surface.fill_rect(band);

        self.surface.save();
        self.surface.clip(clip::content_rect(
            self.gutter.width,
            self.state.width(),
            self.state.height(),
        ));
        self.draw_backgrounds(ctx, layout, lines.clone());
        self.draw_foreground(ctx, layout, lines.clone());
        self.surface.restore();
        self.pen = Pen::default();

        if self.config.draw_gutter {
            self.draw_gutter(ctx, layout, lines, band);
        }
        self.surface.restore();
        self.pen = Pen::default();
    }

    /// Canvas x of the start of every line's text.
    fn text_origin_x(&self) -> f32 {
        self.gutter.width + self.config.editor_padding[0] - self.state.scroll_x()
    }

    /// Canvas y of the top of `line`.
    fn line_top(&self, line: usize, layout: &LayoutMetrics) -> f32 {
        self.state.line_top(line, layout) + self.config.editor_padding[1]
    }

    fn use_font(&mut self, font: &str) {
        if self.pen.font.as_deref() != Some(font) {
            self.surface.set_font(font);
            self.pen.font = Some(font.to_string());
        }
    }

    fn use_fill(&mut self, color: Rgba) {
        if self.pen.fill != Some(color) {
            self.surface.set_fill(color);
            self.pen.fill = Some(color);
        }
    }
}

fn moved_to_invalidation(moved: bool) -> InvalidationKind {
    if moved {
        InvalidationKind::Layout
    } else {
        InvalidationKind::None
    }
}

impl<S: RasterSurface> ViewBackend for CanvasView<S> {
    fn resize(&mut self, ctx: RenderContext<'_>, width: f32, height: f32) {
        let kind = self.apply(ctx, &ViewEvent::Resize { width, height });
        self.render_invalidation(ctx, kind);
    }

    fn scroll_by(&mut self, ctx: RenderContext<'_>, dx: f32, dy: f32) {
        let kind = self.apply(ctx, &ViewEvent::Scroll { dx, dy });
        self.render_invalidation(ctx, kind);
    }

    fn scroll_to(&mut self, ctx: RenderContext<'_>, pos: Position) {
        let kind = self.apply(ctx, &ViewEvent::ScrollTo(pos));
        self.render_invalidation(ctx, kind);
    }

    fn pos_from_coords(&self, ctx: RenderContext<'_>, x: f32, y: f32) -> Position {
        self.hit_test(ctx, x, y)
    }

    fn pos_from_device_coords(&self, ctx: RenderContext<'_>, x: f32, y: f32) -> Position {
        let ratio = self.state.device_pixel_ratio();
        self.hit_test(ctx, x / ratio, y / ratio)
    }

    fn viewport(&self, ctx: RenderContext<'_>) -> Viewport {
        self.state.viewport(&self.layout(ctx))
    }

    fn render(&mut self, ctx: RenderContext<'_>) {
        self.render_full(ctx);
    }
}
