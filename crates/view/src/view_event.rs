// Chunk: docs/chunks/event_queue - Unified view event queue
//! View event types for the event queue.
//!
//! Scroll and resize events from the host and update notifications from the
//! providers all arrive as `ViewEvent`s on one channel. The drain loop owns
//! the view and applies them one at a time, so the view never needs shared
//! ownership and never renders re-entrantly.

use rasterview_lines::{DirtyLines, Position};

/// Everything that can change what the view draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Wheel or trackpad scroll, in CSS pixels
    Scroll { dx: f32, dy: f32 },

    /// Canvas resized, in CSS pixels
    Resize { width: f32, height: f32 },

    /// Bring a logical position into view
    ScrollTo(Position),

    /// The line provider has new data for these lines
    LinesUpdated(DirtyLines),

    /// The font metrics provider switched fonts
    FontChanged,

    /// The canvas moved to a display with a different pixel density
    DevicePixelRatio(f32),
}

impl ViewEvent {
    /// Returns true if this event came from a provider rather than the host.
    pub fn is_provider_update(&self) -> bool {
        matches!(self, ViewEvent::LinesUpdated(_) | ViewEvent::FontChanged)
    }
}
