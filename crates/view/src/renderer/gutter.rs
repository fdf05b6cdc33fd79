// Chunk: docs/chunks/gutter - Line-number gutter rendering

//! Gutter pass: background, separator and line numbers.
//!
//! Numbers are right-aligned by left-padding them to the gutter's digit
//! count and drawing them half the horizontal padding in from the left edge.
//! Lines that have not been delivered yet get no number.

use std::ops::Range;

use tracing::trace;

use crate::gutter::format_line_number;
use crate::surface::{RasterSurface, Rect};
use crate::viewport::LayoutMetrics;

use super::{CanvasView, RenderContext};

/// Width of the gutter/content separator in CSS pixels
const SEPARATOR_WIDTH: f32 = 1.0;

impl<S: RasterSurface> CanvasView<S> {
    pub(super) fn draw_gutter(
        &mut self,
        ctx: RenderContext<'_>,
        layout: &LayoutMetrics,
        lines: Range<usize>,
        band: Rect,
    ) {
        trace!(pass = "gutter", first = lines.start, end = lines.end);
        let gutter = self.gutter;
        if gutter.width <= 0.0 {
            return;
        }
        let theme = self.config.theme;

        self.use_fill(theme.gutter_background);
        self.surface
            .fill_rect(Rect::new(0.0, band.y, gutter.width, band.height));
        self.use_fill(theme.gutter_separator);
        self.surface.fill_rect(Rect::new(
            gutter.width - SEPARATOR_WIDTH,
            band.y,
            SEPARATOR_WIDTH,
            band.height,
        ));

        self.use_font(&ctx.metrics.font_string());
        self.use_fill(theme.gutter_foreground);
        let x = self.config.gutter_padding[0] / 2.0;
        let baseline = ctx.metrics.baseline();
        for line_no in lines {
            if ctx.lines.get(line_no).is_none() {
                continue;
            }
            let y = self.line_top(line_no, layout) + baseline;
            self.surface
                .fill_text(&format_line_number(line_no, gutter.chars), x, y);
        }
    }
}
