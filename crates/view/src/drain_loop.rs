// Chunk: docs/chunks/event_queue - Event drain loop (single ownership of the view)
//! Event drain loop for processing the view event queue.
//!
//! `EventDrainLoop` owns the `CanvasView` directly. Host callbacks and
//! provider subscriptions never touch the view; they post through the
//! `ViewEventSender` and the host calls `process_pending_events` when woken.
//!
//! ```text
//! host resize / scroll ─────────┐
//! LineCache::on_update ─────────┤──→ ViewEventSender ──→ mpsc channel
//! MonospaceMetrics::on_update ──┘
//!                                               │
//!                                               ▼
//!                          EventDrainLoop::process_pending_events()
//!                                               │
//!                                               ▼
//!                          CanvasView::apply (per event), one render
//! ```
//!
//! A burst of events between two drains therefore costs one paint, sized to
//! the union of what each event invalidated.

use tracing::trace;

use crate::dirty_region::InvalidationKind;
use crate::event_channel::{ViewEventReceiver, ViewEventSender};
use crate::renderer::{CanvasView, RenderContext};
use crate::surface::RasterSurface;
use crate::view_event::ViewEvent;

/// The drain loop that owns the view.
pub struct EventDrainLoop<S: RasterSurface> {
    view: CanvasView<S>,
    receiver: ViewEventReceiver,
    /// Kept for clearing the font-change debounce flag
    sender: ViewEventSender,
}

impl<S: RasterSurface> EventDrainLoop<S> {
    pub fn new(view: CanvasView<S>, receiver: ViewEventReceiver, sender: ViewEventSender) -> Self {
        Self {
            view,
            receiver,
            sender,
        }
    }

    pub fn view(&self) -> &CanvasView<S> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CanvasView<S> {
        &mut self.view
    }

    /// Returns a sender feeding this loop's queue.
    pub fn sender(&self) -> ViewEventSender {
        self.sender.clone()
    }

    /// Applies every queued event, then renders once.
    ///
    /// Returns the merged invalidation that was rendered.
    pub fn process_pending_events(&mut self, ctx: RenderContext<'_>) -> InvalidationKind {
        let events: Vec<ViewEvent> = self.receiver.drain().collect();
        if events.is_empty() {
            return InvalidationKind::None;
        }

        let mut kind = InvalidationKind::None;
        let mut font_changed = false;
        for event in &events {
            font_changed |= matches!(event, ViewEvent::FontChanged);
            kind.merge(self.view.apply(ctx, event));
        }
        if font_changed {
            self.sender.clear_font_change_pending();
        }

        trace!(events = events.len(), ?kind, "drained view events");
        self.view.render_invalidation(ctx, kind);
        kind
    }
}
