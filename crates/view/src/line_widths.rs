// Chunk: docs/chunks/line_widths - Per-line width cache for horizontal scroll bounds
//!
//! Measured line widths, for the horizontal scroll limit.
//!
//! The horizontal scroll limit depends on the widest line in the document,
//! but the view only ever measures the lines it renders. `LineWidthCache`
//! stores the last measured width of each rendered line, keyed by line index,
//! and the content width is the maximum over the stored entries.
//!
//! # Invalidation
//!
//! Entries are dropped by the same `DirtyLines` payloads that trigger
//! re-render:
//! - `DirtyLines::Single(line)`: clears that line
//! - `DirtyLines::Range { from, to }`: clears lines in `[from, to)`
//! - `DirtyLines::FromLineToEnd(line)`: truncates at that line, since line
//!   insertion/deletion shifts all subsequent line indices
//!
//! Because edited lines are re-measured on the next render, the content width
//! shrinks when the longest line is made shorter.
//!
//! # Reservations
//!
//! `scroll_to` may target a column past the measured end of its line. The
//! room it needs is held as a reservation next to the measurements, so the
//! render that follows the scroll does not overwrite it. A reservation lasts
//! until its line is invalidated, the document is cut above it, or the next
//! `reserve` replaces it.

use rasterview_lines::DirtyLines;

/// Cache of measured line widths in CSS pixels, keyed by line index.
#[derive(Debug, Clone, Default)]
pub struct LineWidthCache {
    /// `None` means the line has not been measured since it last changed
    widths: Vec<Option<f32>>,
    /// `(line, width)` held open for the last scroll target
    reservation: Option<(usize, f32)>,
}

impl LineWidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Width the horizontal limit uses for `line`: the measurement, widened
    /// by a reservation on that line.
    pub fn get(&self, line: usize) -> Option<f32> {
        let measured = self.widths.get(line).copied().flatten();
        match self.reservation {
            Some((reserved_line, width)) if reserved_line == line => {
                Some(measured.map_or(width, |w| w.max(width)))
            }
            _ => measured,
        }
    }

    pub fn reservation(&self) -> Option<(usize, f32)> {
        self.reservation
    }

    /// Stores a fresh measurement, replacing any previous one. A reservation
    /// on the same line is kept.
    pub fn record(&mut self, line: usize, width: f32) {
        *self.slot(line) = Some(width);
    }

    /// Holds `line` at least `width` wide until the line changes, replacing
    /// any earlier reservation.
    pub fn reserve(&mut self, line: usize, width: f32) {
        self.reservation = Some((line, width));
    }

    /// Widest stored entry or reservation, or 0 when there is neither.
    pub fn max_width(&self) -> f32 {
        let measured = self.widths.iter().flatten().fold(0.0, |acc: f32, &w| acc.max(w));
        self.reservation.map_or(measured, |(_, w)| measured.max(w))
    }

    /// Drops entries for the changed lines.
    pub fn invalidate(&mut self, dirty: &DirtyLines) {
        if self.reservation.is_some_and(|(line, _)| dirty.contains(line)) {
            self.reservation = None;
        }
        match dirty {
            DirtyLines::None => {}
            DirtyLines::Single(line) => {
                if let Some(slot) = self.widths.get_mut(*line) {
                    *slot = None;
                }
            }
            DirtyLines::Range { from, to } => {
                let to = (*to).min(self.widths.len());
                let from = (*from).min(to);
                for slot in &mut self.widths[from..to] {
                    *slot = None;
                }
            }
            DirtyLines::FromLineToEnd(line) => {
                self.widths.truncate(*line);
            }
        }
    }

    /// Drops entries past the end of a document with `line_count` lines.
    pub fn truncate(&mut self, line_count: usize) {
        self.widths.truncate(line_count);
        if self.reservation.is_some_and(|(line, _)| line >= line_count) {
            self.reservation = None;
        }
    }

    /// Clears every entry and the reservation, e.g. after a font change.
    pub fn clear(&mut self) {
        self.widths.clear();
        self.reservation = None;
    }

    fn slot(&mut self, line: usize) -> &mut Option<f32> {
        if line >= self.widths.len() {
            self.widths.resize(line + 1, None);
        }
        &mut self.widths[line]
    }
}
