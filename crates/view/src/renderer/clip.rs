// Chunk: docs/chunks/render_passes - Clip rect helpers for the render passes

//! Clip rect helpers for restricting drawing to regions of the canvas.
//!
//! - Full canvas (full repaint)
//! - Row band (partial repaint of a few lines)
//! - Content area (everything right of the gutter)

use crate::surface::Rect;

/// A rect covering the whole canvas.
pub(super) fn full_canvas_rect(view_width: f32, view_height: f32) -> Rect {
    Rect::new(0.0, 0.0, view_width.max(0.0), view_height.max(0.0))
}

// Chunk: docs/chunks/partial_rerender - Row band clipping
/// A full-width band covering `rows` lines whose first line starts at `top`.
///
/// The band is constrained to the canvas, so a partially visible first or
/// last row yields a shorter band.
pub(super) fn row_band_rect(
    top: f32,
    rows: usize,
    line_height: f32,
    view_width: f32,
    view_height: f32,
) -> Rect {
    let y = top.clamp(0.0, view_height.max(0.0));
    let bottom = (top + rows as f32 * line_height).clamp(y, view_height.max(y));
    Rect::new(0.0, y, view_width.max(0.0), bottom - y)
}

/// The content area right of the gutter.
///
/// Text, cursors and highlights are clipped to this rect so horizontally
/// scrolled content never bleeds into the gutter.
pub(super) fn content_rect(gutter_width: f32, view_width: f32, view_height: f32) -> Rect {
    let x = gutter_width.clamp(0.0, view_width.max(0.0));
    Rect::new(x, 0.0, view_width.max(0.0) - x, view_height.max(0.0))
}
