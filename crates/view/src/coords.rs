// Chunk: docs/chunks/hit_testing - Pixel to (line, column) mapping
//!
//! Mapping between pixel x offsets and character columns within a line.
//!
//! Column geometry comes from the font's substring measurement, not from
//! `col * ascii_width`, so wide and zero-width characters land where the
//! renderer actually drew them. Prefixes are always cut at `ch_to_8` entries,
//! which keeps every slice on a character boundary.
//!
//! `col_at_x` scans columns left to right, so it is linear in the line
//! length. Interactive hit-testing calls it once per pointer event, which is
//! cheap enough for editor-sized lines.

use rasterview_lines::Line;

use crate::font::FontMetrics;

/// Pixel width of the first `col` characters of `line`.
pub fn prefix_width(line: &Line, metrics: &dyn FontMetrics, col: usize) -> f32 {
    metrics.text_width(&line.text()[..line.byte_offset(col)])
}

/// Column whose pixel interval `[left, right)` contains `x`, where `x` is
/// measured from the start of the line's text.
///
/// Points left of the text map to column 0 and points right of it map to
/// `char_count()`, the position after the last character.
pub fn col_at_x(line: &Line, metrics: &dyn FontMetrics, x: f32) -> usize {
    col_at_canvas_x(line, metrics, 0.0, x)
}

/// Like [`col_at_x`], for text whose first column starts at canvas x
/// `origin_x`.
///
/// Column edges are computed as `origin_x + prefix_width(..)`, the same sums
/// the renderer draws at, so the left edge of a column maps back to that
/// column. Points within a few ulps left of an edge count as on it; that
/// absorbs the rounding of a CSS to device pixel round trip.
pub fn col_at_canvas_x(line: &Line, metrics: &dyn FontMetrics, origin_x: f32, x: f32) -> usize {
    if x.is_nan() {
        return 0;
    }
    let char_count = line.char_count();
    (0..char_count)
        .find(|&col| {
            let right = origin_x + prefix_width(line, metrics, col + 1);
            x < right - edge_slack(right, x)
        })
        .unwrap_or(char_count)
}

fn edge_slack(edge: f32, x: f32) -> f32 {
    edge.abs().max(x.abs()) * f32::EPSILON * 4.0
}

/// Line index for a y offset measured from the top of the document content.
///
/// Uses `round(y / line_height - 0.5)`, which is `floor` for every point
/// strictly inside a row. Returns `None` for an empty document or a
/// degenerate line height.
pub fn line_at_y(y: f32, line_height: f32, total_lines: usize) -> Option<usize> {
    if total_lines == 0 || line_height <= 0.0 || y.is_nan() {
        return None;
    }
    let line = (y / line_height - 0.5).round().max(0.0) as usize;
    Some(line.min(total_lines - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MonospaceMetrics;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics::fixed(10.0, 24.0)
    }

    #[test]
    fn test_prefix_width_ascii() {
        let m = metrics();
        let line = Line::new("hello");
        assert_eq!(prefix_width(&line, &m, 0), 0.0);
        assert_eq!(prefix_width(&line, &m, 3), 30.0);
        assert_eq!(prefix_width(&line, &m, 99), 50.0);
    }

    #[test]
    fn test_col_at_x_ascii() {
        let m = metrics();
        let line = Line::new("hello");
        assert_eq!(col_at_x(&line, &m, 0.0), 0);
        assert_eq!(col_at_x(&line, &m, 9.9), 0);
        assert_eq!(col_at_x(&line, &m, 10.0), 1);
        assert_eq!(col_at_x(&line, &m, 45.0), 4);
    }

    #[test]
    fn test_col_at_x_outside_text() {
        let m = metrics();
        let line = Line::new("abc");
        assert_eq!(col_at_x(&line, &m, -5.0), 0);
        assert_eq!(col_at_x(&line, &m, 31.0), 3);
        assert_eq!(col_at_x(&Line::new(""), &m, 12.0), 0);
    }

    #[test]
    fn test_col_at_x_wide_chars() {
        let m = metrics();
        // "a漢b": a=[0,10) 漢=[10,30) b=[30,40)
        let line = Line::new("a漢b");
        assert_eq!(col_at_x(&line, &m, 15.0), 1);
        assert_eq!(col_at_x(&line, &m, 29.0), 1);
        assert_eq!(col_at_x(&line, &m, 30.0), 2);
        assert_eq!(prefix_width(&line, &m, 2), 30.0);
    }

    #[test]
    fn test_col_at_x_multibyte_slices_on_boundaries() {
        let m = metrics();
        let line = Line::new("é😀x");
        for col in 0..=line.char_count() {
            // Would panic on a non-boundary slice
            let _ = prefix_width(&line, &m, col);
        }
        assert_eq!(col_at_x(&line, &m, 5.0), 0);
    }

    #[test]
    fn test_fractional_left_edges_map_to_their_column() {
        let m = MonospaceMetrics::fixed(7.3, 17.1);
        let line = Line::new("abcdefghij中klmnop");
        for origin in [39.6f32, 35.9, 24.77, -1210.3] {
            for col in 0..line.char_count() {
                let x = origin + prefix_width(&line, &m, col);
                assert_eq!(col_at_canvas_x(&line, &m, origin, x), col, "origin {origin}");
                // Through device pixels and back
                let back = (x * 1.5) / 1.5;
                assert_eq!(col_at_canvas_x(&line, &m, origin, back), col, "origin {origin}");
            }
        }
    }

    #[test]
    fn test_canvas_x_left_of_origin_is_column_zero() {
        let m = metrics();
        let line = Line::new("abc");
        assert_eq!(col_at_canvas_x(&line, &m, 40.0, 12.0), 0);
        assert_eq!(col_at_canvas_x(&line, &m, 40.0, 49.9), 0);
        assert_eq!(col_at_canvas_x(&line, &m, 40.0, 50.0), 1);
        assert_eq!(col_at_canvas_x(&line, &m, 40.0, f32::NAN), 0);
    }

    #[test]
    fn test_line_at_y() {
        assert_eq!(line_at_y(0.0, 24.0, 100), Some(0));
        assert_eq!(line_at_y(23.9, 24.0, 100), Some(0));
        assert_eq!(line_at_y(24.0, 24.0, 100), Some(1));
        assert_eq!(line_at_y(60.0, 24.0, 100), Some(2));
        assert_eq!(line_at_y(-40.0, 24.0, 100), Some(0));
        assert_eq!(line_at_y(1e6, 24.0, 100), Some(99));
        assert_eq!(line_at_y(10.0, 24.0, 0), None);
        assert_eq!(line_at_y(10.0, 0.0, 5), None);
    }
}
