// Chunk: docs/chunks/render_passes - Background, foreground and gutter passes

//! Background pass: find-match highlights and selection rectangles.
//!
//! Only reserved-style spans are painted here. Highlights go down first so a
//! selection over a match stays readable. Rectangles span the full line
//! height and the pixel width of the span's characters.

use std::ops::Range;

use rasterview_lines::{Rgba, StyleId, StyleSpan};
use tracing::trace;

use crate::coords::prefix_width;
use crate::surface::{RasterSurface, Rect};
use crate::viewport::LayoutMetrics;

use super::{CanvasView, RenderContext};

impl<S: RasterSurface> CanvasView<S> {
    pub(super) fn draw_backgrounds(
        &mut self,
        ctx: RenderContext<'_>,
        layout: &LayoutMetrics,
        lines: Range<usize>,
    ) {
        trace!(pass = "background", first = lines.start, end = lines.end);
        let x0 = self.text_origin_x();
        let view_left = self.gutter.width;
        let view_right = self.state.width();

        for line_no in lines {
            let Some(line) = ctx.lines.get(line_no) else {
                continue;
            };
            let (selections, highlights): (Vec<&StyleSpan>, Vec<&StyleSpan>) = line
                .styles()
                .iter()
                .filter(|span| span.style.is_reserved())
                .partition(|span| span.style == StyleId::SELECTION);
            if selections.is_empty() && highlights.is_empty() {
                continue;
            }

            let top = self.line_top(line_no, layout);
            for span in highlights.into_iter().chain(selections) {
                let cols = line.cols_for_bytes(span.range);
                let left = x0 + prefix_width(line, ctx.metrics, cols.start);
                let right = x0 + prefix_width(line, ctx.metrics, cols.end);
                if right <= left || right <= view_left || left >= view_right {
                    continue;
                }
                let color = ctx
                    .styles
                    .style(span.style)
                    .and_then(|style| style.bg)
                    .unwrap_or_else(|| self.marker_color(span.style));
                self.use_fill(color);
                self.surface
                    .fill_rect(Rect::new(left, top, right - left, layout.line_height));
            }
        }
    }

    /// Theme fill for a reserved style with no background of its own.
    fn marker_color(&self, style: StyleId) -> Rgba {
        if style == StyleId::SELECTION {
            self.config.theme.selection
        } else {
            self.config.theme.find_highlight
        }
    }
}
