// Chunk: docs/chunks/line_model - Line data model + provider interfaces
// Chunk: docs/chunks/partial_rerender - Dirty line payloads for cache-update notifications
//!
//! The line data provider interface and an in-memory implementation.
//!
//! [`LineSource`] is the read-only view the renderer has of the editor
//! engine's line cache. It is deliberately synchronous: `get` returns
//! whatever the cache holds right now, and `compute_missing` is a
//! fire-and-forget prefetch hint. When the cache later receives data it
//! notifies its subscribers, and the view repaints.

use std::cell::RefCell;
use std::ops::Range;

use crate::line::Line;
use crate::notify::{SubscriptionId, Subscribers};
use crate::types::DirtyLines;

/// Read access to logical line data.
pub trait LineSource {
    /// Returns the line at `line`, or `None` if it has not been fetched yet
    /// or is past the end of the document.
    fn get(&self, line: usize) -> Option<&Line>;

    /// Total number of lines in the document.
    fn height(&self) -> usize;

    /// Requests that lines in `range` be made available.
    ///
    /// Best-effort and non-blocking. Implementations may record the request,
    /// forward it to the engine, or ignore lines they already hold.
    fn compute_missing(&self, range: Range<usize>);
}

/// A sparse in-memory line cache.
///
/// Lines that have not been inserted read as `None`. Requests for missing
/// lines are queued and can be drained with [`LineCache::take_missing_requests`],
/// which is how a host would forward them to the engine.
#[derive(Debug, Default)]
pub struct LineCache {
    lines: Vec<Option<Line>>,
    missing_requests: RefCell<Vec<Range<usize>>>,
    subscribers: Subscribers<DirtyLines>,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully populated cache from plain text lines.
    pub fn from_text_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|s| Some(Line::new(s))).collect(),
            ..Self::default()
        }
    }

    /// Sets the document height, dropping lines past the new end.
    pub fn set_height(&mut self, height: usize) {
        let old = self.lines.len();
        if old == height {
            return;
        }
        self.lines.resize_with(height, || None);
        self.subscribers
            .emit(&DirtyLines::FromLineToEnd(old.min(height)));
    }

    /// Stores `data` for `line`, growing the document if needed.
    pub fn insert(&mut self, line: usize, data: Line) {
        let grew = line >= self.lines.len();
        if grew {
            self.lines.resize_with(line + 1, || None);
        }
        self.lines[line] = Some(data);
        let dirty = if grew {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        };
        self.subscribers.emit(&dirty);
    }

    /// Stores a batch of consecutive lines starting at `start`, emitting one
    /// update for the whole batch.
    pub fn insert_lines(&mut self, start: usize, lines: Vec<Line>) {
        if lines.is_empty() {
            return;
        }
        let end = start + lines.len();
        let grew = end > self.lines.len();
        if grew {
            self.lines.resize_with(end, || None);
        }
        for (slot, line) in self.lines[start..end].iter_mut().zip(lines) {
            *slot = Some(line);
        }
        let dirty = if grew {
            DirtyLines::FromLineToEnd(start)
        } else {
            DirtyLines::range(start, end)
        };
        self.subscribers.emit(&dirty);
    }

    /// Drops cached data for the given lines without changing the height.
    pub fn invalidate(&mut self, dirty: DirtyLines) {
        let height = self.lines.len();
        let Some(range) = dirty.clip_to(0..height) else {
            return;
        };
        for slot in &mut self.lines[range] {
            *slot = None;
        }
        self.subscribers.emit(&dirty);
    }

    /// Returns true if data for `line` is present.
    pub fn is_loaded(&self, line: usize) -> bool {
        matches!(self.lines.get(line), Some(Some(_)))
    }

    /// Drains the queued `compute_missing` requests.
    pub fn take_missing_requests(&self) -> Vec<Range<usize>> {
        std::mem::take(&mut *self.missing_requests.borrow_mut())
    }

    /// Registers a callback invoked once per cache update.
    pub fn on_update(&mut self, callback: impl Fn(&DirtyLines) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl LineSource for LineCache {
    fn get(&self, line: usize) -> Option<&Line> {
        self.lines.get(line).and_then(Option::as_ref)
    }

    fn height(&self) -> usize {
        self.lines.len()
    }

    fn compute_missing(&self, range: Range<usize>) {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        // Only queue the tight span that is actually missing.
        let first = (start..end).find(|&l| self.lines[l].is_none());
        let Some(first) = first else {
            return;
        };
        let last = (first..end)
            .rev()
            .find(|&l| self.lines[l].is_none())
            .unwrap_or(first);
        self.missing_requests.borrow_mut().push(first..last + 1);
    }
}
