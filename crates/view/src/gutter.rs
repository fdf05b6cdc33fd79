// Chunk: docs/chunks/gutter - Line-number gutter geometry
//!
//! Gutter geometry.
//!
//! The gutter is as wide as the largest line number plus horizontal padding.
//! Its width shifts the whole content area, so it is remeasured whenever the
//! document height or the font changes.

use crate::config::ViewConfig;
use crate::font::FontMetrics;

/// Character count and pixel width of the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GutterGeometry {
    /// Digits in the largest line number
    pub chars: usize,
    /// Width in CSS pixels, 0 when the gutter is disabled
    pub width: f32,
}

/// Number of decimal digits in `n`. `digit_count(0)` is 1.
pub fn digit_count(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Measures the gutter for a document of `total_lines` lines.
pub fn measure_gutter(
    config: &ViewConfig,
    metrics: &dyn FontMetrics,
    total_lines: usize,
) -> GutterGeometry {
    let chars = digit_count(total_lines);
    let width = if config.draw_gutter {
        chars as f32 * metrics.ascii_width() + config.gutter_padding[0]
    } else {
        0.0
    };
    GutterGeometry { chars, width }
}

/// The 1-based label for 0-based `line`, right-aligned to `chars` columns.
pub fn format_line_number(line: usize, chars: usize) -> String {
    format!("{:>width$}", line + 1, width = chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MonospaceMetrics;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
        assert_eq!(digit_count(usize::MAX), 20);
    }

    #[test]
    fn test_measure_gutter_grows_with_digits() {
        let config = ViewConfig::default();
        let metrics = MonospaceMetrics::fixed(10.0, 24.0);
        let nine = measure_gutter(&config, &metrics, 9);
        let ten = measure_gutter(&config, &metrics, 10);
        assert_eq!(nine, GutterGeometry { chars: 1, width: 30.0 });
        assert_eq!(ten, GutterGeometry { chars: 2, width: 40.0 });
    }

    #[test]
    fn test_disabled_gutter_has_zero_width() {
        let config = ViewConfig {
            draw_gutter: false,
            ..ViewConfig::default()
        };
        let metrics = MonospaceMetrics::fixed(10.0, 24.0);
        let gutter = measure_gutter(&config, &metrics, 1000);
        assert_eq!(gutter.width, 0.0);
        assert_eq!(gutter.chars, 4);
    }

    #[test]
    fn test_format_line_number_pads_left() {
        assert_eq!(format_line_number(0, 3), "  1");
        assert_eq!(format_line_number(98, 3), " 99");
        assert_eq!(format_line_number(999, 3), "1000");
    }
}
