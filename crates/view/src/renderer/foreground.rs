// Chunk: docs/chunks/render_passes - Background, foreground and gutter passes

//! Foreground pass: cursor bars, then text.
//!
//! Each line's text is split into runs: one per non-reserved style span, plus
//! unstyled runs for the gaps between them, so every character is drawn
//! exactly once. Span byte ranges are widened to whole characters through
//! the line's index table before slicing. Runs that fall entirely outside
//! the content area are skipped.
//!
//! The measured width of every painted line is recorded for the horizontal
//! scroll limit.

use std::ops::Range;

use rasterview_lines::{Line, StyleId};
use tracing::trace;

use crate::coords::prefix_width;
use crate::font::font_for_style;
use crate::surface::{RasterSurface, Rect};
use crate::viewport::LayoutMetrics;

use super::{CanvasView, RenderContext};

/// Underline thickness in CSS pixels
const UNDERLINE_THICKNESS: f32 = 1.0;

/// A column range drawn with one style (`None` = theme defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextRun {
    pub style: Option<StyleId>,
    pub cols: Range<usize>,
}

/// Splits a line into left-to-right text runs covering every column.
///
/// Reserved spans are ignored. Where spans overlap, the earlier-starting span
/// keeps the overlapped columns.
pub(crate) fn text_runs(line: &Line) -> Vec<TextRun> {
    let mut spans: Vec<_> = line
        .styles()
        .iter()
        .filter(|span| !span.style.is_reserved())
        .collect();
    spans.sort_by_key(|span| span.range.start);

    let mut runs = Vec::with_capacity(spans.len() * 2 + 1);
    let mut next_col = 0;
    for span in spans {
        let cols = line.cols_for_bytes(span.range);
        let start = cols.start.max(next_col);
        if start >= cols.end {
            continue;
        }
        if start > next_col {
            runs.push(TextRun {
                style: None,
                cols: next_col..start,
            });
        }
        runs.push(TextRun {
            style: Some(span.style),
            cols: start..cols.end,
        });
        next_col = cols.end;
    }
    if next_col < line.char_count() {
        runs.push(TextRun {
            style: None,
            cols: next_col..line.char_count(),
        });
    }
    runs
}

impl<S: RasterSurface> CanvasView<S> {
    pub(super) fn draw_foreground(
        &mut self,
        ctx: RenderContext<'_>,
        layout: &LayoutMetrics,
        lines: Range<usize>,
    ) {
        trace!(pass = "foreground", first = lines.start, end = lines.end);
        let x0 = self.text_origin_x();

        for line_no in lines {
            let Some(line) = ctx.lines.get(line_no) else {
                continue;
            };
            let top = self.line_top(line_no, layout);
            self.draw_cursors(ctx, line, x0, top, layout.line_height);
            self.draw_text_runs(ctx, line, x0, top);

            let mut width = ctx.metrics.text_width(line.text());
            if let Some(&last) = line.cursors().last() {
                width = width.max(prefix_width(line, ctx.metrics, last) + ctx.metrics.ascii_width());
            }
            self.widths.record(line_no, width);
        }
    }

    fn draw_cursors(&mut self, ctx: RenderContext<'_>, line: &Line, x0: f32, top: f32, line_height: f32) {
        if line.cursors().is_empty() {
            return;
        }
        self.use_fill(self.config.theme.cursor);
        for &col in line.cursors() {
            let x = x0 + prefix_width(line, ctx.metrics, col);
            self.surface
                .fill_rect(Rect::new(x, top, self.config.cursor_width, line_height));
        }
    }

    fn draw_text_runs(&mut self, ctx: RenderContext<'_>, line: &Line, x0: f32, top: f32) {
        let view_left = self.gutter.width;
        let view_right = self.state.width();
        let baseline = top + ctx.metrics.baseline();

        for run in text_runs(line) {
            let left = x0 + prefix_width(line, ctx.metrics, run.cols.start);
            let right = x0 + prefix_width(line, ctx.metrics, run.cols.end);
            if right <= view_left || left >= view_right {
                continue;
            }

            let style = run.style.and_then(|id| ctx.styles.style(id));
            let font = font_for_style(ctx.metrics, style);
            let fill = style
                .and_then(|s| s.fg)
                .unwrap_or(self.config.theme.foreground);
            self.use_font(&font);
            self.use_fill(fill);
            self.surface
                .fill_text(line.slice_cols(run.cols.clone()), left, baseline);

            if style.is_some_and(|s| s.underline) {
                self.surface.fill_rect(Rect::new(
                    left,
                    baseline + UNDERLINE_THICKNESS,
                    right - left,
                    UNDERLINE_THICKNESS,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterview_lines::StyleSpan;

    fn run(style: Option<u32>, cols: Range<usize>) -> TextRun {
        TextRun {
            style: style.map(StyleId),
            cols,
        }
    }

    #[test]
    fn test_unstyled_line_is_one_run() {
        assert_eq!(text_runs(&Line::new("hello")), vec![run(None, 0..5)]);
        assert!(text_runs(&Line::new("")).is_empty());
    }

    #[test]
    fn test_gaps_filled_with_default_runs() {
        let line = Line::new("let x = 1;")
            .with_styles(vec![
                StyleSpan::new(StyleId(4), 0, 3),
                StyleSpan::new(StyleId(5), 8, 1),
            ])
            .unwrap();
        assert_eq!(
            text_runs(&line),
            vec![
                run(Some(4), 0..3),
                run(None, 3..8),
                run(Some(5), 8..9),
                run(None, 9..10),
            ]
        );
    }

    #[test]
    fn test_reserved_spans_do_not_split_text() {
        let line = Line::new("abcdef")
            .with_styles(vec![StyleSpan::new(StyleId::SELECTION, 1, 3)])
            .unwrap();
        assert_eq!(text_runs(&line), vec![run(None, 0..6)]);
    }

    #[test]
    fn test_unsorted_and_overlapping_spans() {
        let line = Line::new("abcdefgh")
            .with_styles(vec![
                StyleSpan::new(StyleId(7), 4, 4),
                StyleSpan::new(StyleId(6), 0, 6),
            ])
            .unwrap();
        assert_eq!(text_runs(&line), vec![run(Some(6), 0..6), run(Some(7), 6..8)]);
    }

    #[test]
    fn test_multibyte_span_widened_to_characters() {
        // "aé😀b": bytes a=0 é=1..3 😀=3..7 b=7
        // A span starting inside é and ending inside 😀 covers both characters.
        let line = Line::new("aé😀b")
            .with_styles(vec![StyleSpan::new(StyleId(3), 2, 3)])
            .unwrap();
        let runs = text_runs(&line);
        assert_eq!(runs, vec![run(None, 0..1), run(Some(3), 1..3), run(None, 3..4)]);
        assert_eq!(line.slice_cols(runs[1].cols.clone()), "é😀");
    }
}
