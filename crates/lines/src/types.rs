// Chunk: docs/chunks/line_model - Line data model + provider interfaces
// Chunk: docs/chunks/partial_rerender - Dirty line payloads for cache-update notifications

use std::ops::Range;

/// Logical position in the document as (line, column) where both are 0-indexed.
///
/// The column counts characters (Unicode scalar values), not bytes and not
/// UTF-16 code units. The per-line index tables convert between the spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Lines touched by one line-data update.
///
/// Every cache-update notification carries one of these. The view intersects
/// it with the expanded visible lines to pick the rows it repaints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyLines {
    None,
    Single(usize),
    /// Lines `[from, to)`.
    Range { from: usize, to: usize },
    /// The given line and every line after it. Inserts, removals and
    /// height changes shift later lines, so they report this.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// The whole document.
    pub fn all() -> Self {
        DirtyLines::FromLineToEnd(0)
    }

    /// `[from, to)`, normalized to `None` or `Single` where possible.
    pub fn range(from: usize, to: usize) -> Self {
        if from >= to {
            DirtyLines::None
        } else if to - from == 1 {
            DirtyLines::Single(from)
        } else {
            DirtyLines::Range { from, to }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// First dirty line, or `None` for an empty update.
    pub fn start_line(&self) -> Option<usize> {
        self.bounds().map(|(from, _)| from)
    }

    /// Half-open `(from, to)` bounds, with `to == usize::MAX` for
    /// open-ended updates.
    fn bounds(&self) -> Option<(usize, usize)> {
        match *self {
            DirtyLines::None => None,
            DirtyLines::Single(line) => Some((line, line.saturating_add(1))),
            DirtyLines::Range { from, to } => Some((from, to)),
            DirtyLines::FromLineToEnd(line) => Some((line, usize::MAX)),
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        self.bounds()
            .is_some_and(|(from, to)| line >= from && (to == usize::MAX || line < to))
    }

    /// Intersects the update with the half-open line range `lines`.
    ///
    /// Returns `None` when nothing in `lines` is dirty.
    pub fn clip_to(&self, lines: Range<usize>) -> Option<Range<usize>> {
        let (from, to) = self.bounds()?;
        let start = from.max(lines.start);
        let end = to.min(lines.end);
        (start < end).then_some(start..end)
    }

    /// Widens `self` to also cover `other`.
    ///
    /// The result is the bounding span of both updates. Open-ended updates
    /// stay open-ended, and a merged span of one line collapses to `Single`.
    pub fn merge(&mut self, other: DirtyLines) {
        let merged = match (self.bounds(), other.bounds()) {
            (None, _) => other,
            (_, None) => return,
            (Some((a_from, a_to)), Some((b_from, b_to))) => {
                let from = a_from.min(b_from);
                match a_to.max(b_to) {
                    usize::MAX => DirtyLines::FromLineToEnd(from),
                    to => DirtyLines::range(from, to),
                }
            }
        };
        *self = merged;
    }
}

impl Default for DirtyLines {
    fn default() -> Self {
        DirtyLines::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(mut a: DirtyLines, b: DirtyLines) -> DirtyLines {
        a.merge(b);
        a
    }

    #[test]
    fn test_empty_update_is_neutral_on_either_side() {
        assert_eq!(merged(DirtyLines::None, DirtyLines::Single(7)), DirtyLines::Single(7));
        assert_eq!(merged(DirtyLines::range(2, 6), DirtyLines::None), DirtyLines::range(2, 6));
        assert_eq!(merged(DirtyLines::None, DirtyLines::None), DirtyLines::None);
    }

    #[test]
    fn test_same_line_twice_stays_single() {
        assert_eq!(merged(DirtyLines::Single(9), DirtyLines::Single(9)), DirtyLines::Single(9));
    }

    #[test]
    fn test_far_apart_lines_cover_the_gap() {
        // Lines 20 and 2 were edited between two frames
        assert_eq!(
            merged(DirtyLines::Single(20), DirtyLines::Single(2)),
            DirtyLines::Range { from: 2, to: 21 }
        );
        assert_eq!(
            merged(DirtyLines::range(0, 3), DirtyLines::range(10, 14)),
            DirtyLines::Range { from: 0, to: 14 }
        );
    }

    #[test]
    fn test_line_inside_range_changes_nothing() {
        let range = DirtyLines::Range { from: 4, to: 12 };
        assert_eq!(merged(range.clone(), DirtyLines::Single(8)), range);
        assert_eq!(
            merged(DirtyLines::Single(12), range),
            DirtyLines::Range { from: 4, to: 13 }
        );
    }

    #[test]
    fn test_open_ended_update_wins() {
        assert_eq!(
            merged(DirtyLines::Single(1), DirtyLines::FromLineToEnd(30)),
            DirtyLines::FromLineToEnd(1)
        );
        assert_eq!(
            merged(DirtyLines::FromLineToEnd(6), DirtyLines::range(10, 40)),
            DirtyLines::FromLineToEnd(6)
        );
        assert_eq!(
            merged(DirtyLines::FromLineToEnd(6), DirtyLines::all()),
            DirtyLines::all()
        );
    }

    #[test]
    fn test_range_constructor_normalizes() {
        assert_eq!(DirtyLines::range(4, 4), DirtyLines::None);
        assert_eq!(DirtyLines::range(6, 2), DirtyLines::None);
        assert_eq!(DirtyLines::range(4, 5), DirtyLines::Single(4));
        assert_eq!(DirtyLines::range(4, 9), DirtyLines::Range { from: 4, to: 9 });
    }

    #[test]
    fn test_membership_and_start() {
        assert!(!DirtyLines::None.contains(0));
        assert!(DirtyLines::Single(3).contains(3));
        assert!(!DirtyLines::Single(3).contains(4));
        assert!(DirtyLines::range(2, 4).contains(3));
        assert!(!DirtyLines::range(2, 4).contains(4));
        assert!(DirtyLines::FromLineToEnd(7).contains(usize::MAX));
        assert_eq!(DirtyLines::FromLineToEnd(7).start_line(), Some(7));
        assert_eq!(DirtyLines::None.start_line(), None);
    }

    #[test]
    fn test_clip_to_visible_lines() {
        assert_eq!(DirtyLines::Single(5).clip_to(0..10), Some(5..6));
        assert_eq!(DirtyLines::Single(15).clip_to(0..10), None);
        assert_eq!(DirtyLines::range(2, 20).clip_to(10..15), Some(10..15));
        assert_eq!(DirtyLines::FromLineToEnd(12).clip_to(10..15), Some(12..15));
        assert_eq!(DirtyLines::None.clip_to(0..10), None);
    }

    #[test]
    fn test_positions_sort_by_line_first() {
        let mut positions = vec![Position::new(2, 0), Position::new(1, 9), Position::new(2, 3)];
        positions.sort();
        assert_eq!(
            positions,
            vec![Position::new(1, 9), Position::new(2, 0), Position::new(2, 3)]
        );
        assert_eq!(Position::default(), Position::new(0, 0));
    }
}
