// Chunk: docs/chunks/partial_rerender - Screen-row dirty tracking
//!
//! What the next frame has to repaint
//!
//! [`DirtyRegion`] counts canvas rows from the first rendered row (the row
//! under the top edge of the canvas), so it can be turned into a clip band
//! without knowing the scroll offset. `ViewportState::dirty_lines_to_region`
//! converts a provider's `DirtyLines` into one.
//!
//! [`InvalidationKind`] is the value the drain loop folds events into
//! between two renders.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirtyRegion {
    #[default]
    None,
    /// Canvas rows `[from, to)`
    Lines { from: usize, to: usize },
    FullViewport,
}

impl DirtyRegion {
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyRegion::None)
    }

    pub fn single_line(row: usize) -> Self {
        Self::line_range(row, row + 1)
    }

    /// Rows `[from, to)`; an empty range is `None`.
    pub fn line_range(from: usize, to: usize) -> Self {
        if to > from {
            DirtyRegion::Lines { from, to }
        } else {
            DirtyRegion::None
        }
    }

    /// Grows `self` to the bounding band of both regions. A full-viewport
    /// region swallows any other.
    pub fn merge(&mut self, other: DirtyRegion) {
        match (*self, other) {
            (Self::FullViewport, _) | (_, Self::None) => {}
            (Self::None, _) | (_, Self::FullViewport) => *self = other,
            (Self::Lines { from: a, to: b }, Self::Lines { from: c, to: d }) => {
                *self = Self::Lines {
                    from: a.min(c),
                    to: b.max(d),
                };
            }
        }
    }
}

// =============================================================================
// InvalidationKind
// =============================================================================

/// Repaint requirement accumulated from one or more events.
///
/// `Layout` outranks `Content`, which outranks `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationKind {
    #[default]
    None,
    /// Line data changed but nothing moved; only these rows are repainted.
    Content(DirtyRegion),
    /// Scroll, size, font or gutter width changed and every row is repainted.
    Layout,
}

impl InvalidationKind {
    pub fn is_none(&self) -> bool {
        matches!(self, InvalidationKind::None)
    }

    pub fn merge(&mut self, other: InvalidationKind) {
        match (*self, other) {
            (Self::Layout, _) | (_, Self::None) => {}
            (Self::None, _) | (_, Self::Layout) => *self = other,
            (Self::Content(mut rows), Self::Content(more)) => {
                rows.merge(more);
                *self = Self::Content(rows);
            }
        }
    }
}
