// Subsystem: docs/subsystems/viewport_scroll - Viewport mapping & scroll arithmetic
// Chunk: docs/chunks/viewport_scroll - Two-axis scroll state
//!
//! Scroll arithmetic for one pixel axis.
//!
//! `AxisScroller` tracks a scroll offset in CSS pixels and keeps it inside
//! `[0, max]`. The maximum is passed in on every mutation rather than stored,
//! because it depends on things the scroller does not own (document height,
//! longest line, gutter width) and those change between calls.
//!
//! `ViewportState` owns two of these, one per axis.

/// Pixel scroll offset for a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisScroller {
    /// Distance from the content origin to the viewport edge, in CSS pixels
    offset_px: f32,
}

impl AxisScroller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current offset in pixels.
    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    /// Sets the offset, clamped to `[0, max_px]`.
    ///
    /// A negative `max_px` is treated as 0, and a NaN offset resets to 0.
    pub fn set_offset_px(&mut self, px: f32, max_px: f32) {
        let max_px = max_px.max(0.0);
        self.offset_px = if px.is_nan() { 0.0 } else { px.clamp(0.0, max_px) };
    }

    /// Adds a signed delta, then clamps. Returns true if the offset changed.
    pub fn scroll_by(&mut self, delta_px: f32, max_px: f32) -> bool {
        let old = self.offset_px;
        self.set_offset_px(self.offset_px + delta_px, max_px);
        self.offset_px != old
    }

    /// Re-clamps the current offset against a new maximum.
    pub fn clamp(&mut self, max_px: f32) -> bool {
        let old = self.offset_px;
        self.set_offset_px(self.offset_px, max_px);
        self.offset_px != old
    }

    /// Scrolls the minimum distance that brings `[start_px, end_px)` inside a
    /// window of `extent_px` pixels. Returns true if scrolling occurred.
    ///
    /// If the target is above the window it is aligned to the top edge, if it
    /// is below it is aligned to the bottom edge. A target larger than the
    /// window is aligned to the top.
    pub fn ensure_visible(
        &mut self,
        start_px: f32,
        end_px: f32,
        extent_px: f32,
        max_px: f32,
    ) -> bool {
        let old = self.offset_px;
        let extent_px = extent_px.max(0.0);

        let target = if extent_px < end_px - start_px || start_px < self.offset_px {
            start_px
        } else if end_px > self.offset_px + extent_px {
            end_px - extent_px
        } else {
            self.offset_px
        };
        self.set_offset_px(target, max_px);

        self.offset_px != old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Clamping ====================

    #[test]
    fn test_new_starts_at_zero() {
        assert_eq!(AxisScroller::new().offset_px(), 0.0);
    }

    #[test]
    fn test_set_offset_clamps_both_ends() {
        let mut s = AxisScroller::new();
        s.set_offset_px(-50.0, 100.0);
        assert_eq!(s.offset_px(), 0.0);
        s.set_offset_px(500.0, 100.0);
        assert_eq!(s.offset_px(), 100.0);
    }

    #[test]
    fn test_negative_max_pins_to_zero() {
        let mut s = AxisScroller::new();
        s.set_offset_px(30.0, -10.0);
        assert_eq!(s.offset_px(), 0.0);
    }

    #[test]
    fn test_nan_resets_to_zero() {
        let mut s = AxisScroller::new();
        s.set_offset_px(40.0, 100.0);
        s.set_offset_px(f32::NAN, 100.0);
        assert_eq!(s.offset_px(), 0.0);
    }

    // ==================== scroll_by ====================

    #[test]
    fn test_scroll_by_reports_change() {
        let mut s = AxisScroller::new();
        assert!(s.scroll_by(24.0, 600.0));
        assert!(!s.scroll_by(0.0, 600.0));
        assert!(s.scroll_by(-100.0, 600.0));
        assert_eq!(s.offset_px(), 0.0);
        assert!(!s.scroll_by(-100.0, 600.0));
    }

    #[test]
    fn test_scroll_by_huge_delta_hits_max() {
        let mut s = AxisScroller::new();
        s.scroll_by(10_000.0, 600.0);
        assert_eq!(s.offset_px(), 600.0);
    }

    #[test]
    fn test_clamp_after_max_shrinks() {
        let mut s = AxisScroller::new();
        s.set_offset_px(500.0, 600.0);
        assert!(s.clamp(240.0));
        assert_eq!(s.offset_px(), 240.0);
    }

    // ==================== ensure_visible ====================

    #[test]
    fn test_ensure_visible_already_visible() {
        let mut s = AxisScroller::new();
        s.set_offset_px(240.0, 1000.0);
        assert!(!s.ensure_visible(264.0, 288.0, 600.0, 1000.0));
        assert_eq!(s.offset_px(), 240.0);
    }

    #[test]
    fn test_ensure_visible_above_aligns_top() {
        let mut s = AxisScroller::new();
        s.set_offset_px(240.0, 1000.0);
        assert!(s.ensure_visible(48.0, 72.0, 600.0, 1000.0));
        assert_eq!(s.offset_px(), 48.0);
    }

    #[test]
    fn test_ensure_visible_below_aligns_bottom() {
        let mut s = AxisScroller::new();
        assert!(s.ensure_visible(960.0, 984.0, 600.0, 2000.0));
        assert_eq!(s.offset_px(), 384.0);
    }

    #[test]
    fn test_ensure_visible_larger_than_window() {
        let mut s = AxisScroller::new();
        assert!(s.ensure_visible(96.0, 120.0, 10.0, 2000.0));
        assert_eq!(s.offset_px(), 96.0);
    }

    #[test]
    fn test_ensure_visible_is_idempotent() {
        let mut s = AxisScroller::new();
        s.ensure_visible(960.0, 984.0, 600.0, 2000.0);
        let first = s.offset_px();
        assert!(!s.ensure_visible(960.0, 984.0, 600.0, 2000.0));
        assert_eq!(s.offset_px(), first);
    }
}
