// Chunk: docs/chunks/event_queue - Event channel for the view event queue
//! Event channel for the view event queue.
//!
//! This module provides the sender/receiver pair for view events. Host
//! callbacks and provider subscriptions send through the cloneable
//! `ViewEventSender`; the drain loop owns the `ViewEventReceiver` and
//! processes events sequentially.
//!
//! # Design
//!
//! We use `std::sync::mpsc`:
//! - `mpsc::Sender` is `Send`, so a provider fed from a background thread can
//!   post updates
//! - `mpsc::Receiver` stays with the thread that owns the surface
//!
//! Font changes carry no payload, so repeated font notifications between two
//! drains are debounced into one event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::sync::Arc;

use rasterview_lines::{DirtyLines, LineCache, Position, SubscriptionId};

use crate::font::MonospaceMetrics;
use crate::view_event::ViewEvent;

/// Sender half of the event channel.
///
/// Cloneable, so it can be captured by any number of provider subscriptions
/// and host callbacks.
#[derive(Clone)]
pub struct ViewEventSender {
    inner: Arc<SenderInner>,
}

struct SenderInner {
    sender: Sender<ViewEvent>,
    /// Called after every send so the host can schedule a drain
    waker: Box<dyn Fn() + Send + Sync>,
    /// Whether a `FontChanged` is already queued
    font_change_pending: AtomicBool,
}

/// Receiver half of the event channel.
pub struct ViewEventReceiver {
    receiver: Receiver<ViewEvent>,
}

/// Creates a new event channel pair.
///
/// `waker` is invoked after each send; hosts use it to schedule a call to
/// `EventDrainLoop::process_pending_events`. Pass `|| {}` when draining is
/// driven some other way.
pub fn create_event_channel(
    waker: impl Fn() + Send + Sync + 'static,
) -> (ViewEventSender, ViewEventReceiver) {
    let (sender, receiver) = mpsc::channel();

    let event_sender = ViewEventSender {
        inner: Arc::new(SenderInner {
            sender,
            waker: Box::new(waker),
            font_change_pending: AtomicBool::new(false),
        }),
    };

    (event_sender, ViewEventReceiver { receiver })
}

impl ViewEventSender {
    fn send(&self, event: ViewEvent) -> Result<(), SendError<ViewEvent>> {
        let result = self.inner.sender.send(event);
        (self.inner.waker)();
        result
    }

    pub fn send_scroll(&self, dx: f32, dy: f32) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Scroll { dx, dy })
    }

    pub fn send_resize(&self, width: f32, height: f32) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Resize { width, height })
    }

    pub fn send_scroll_to(&self, pos: Position) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::ScrollTo(pos))
    }

    pub fn send_lines_updated(&self, dirty: DirtyLines) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::LinesUpdated(dirty))
    }

    pub fn send_device_pixel_ratio(&self, ratio: f32) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::DevicePixelRatio(ratio))
    }

    /// Sends a font change, unless one is already queued.
    pub fn send_font_changed(&self) -> Result<(), SendError<ViewEvent>> {
        if self.inner.font_change_pending.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.send(ViewEvent::FontChanged)
    }

    /// Clears the font change flag.
    ///
    /// Called by the drain loop after processing a `FontChanged` event.
    pub fn clear_font_change_pending(&self) {
        self.inner.font_change_pending.store(false, Ordering::SeqCst);
    }
}

impl ViewEventReceiver {
    /// Receives an event without blocking.
    pub fn try_recv(&self) -> Option<ViewEvent> {
        self.receiver.try_recv().ok()
    }

    /// Drains all pending events without blocking.
    pub fn drain(&self) -> impl Iterator<Item = ViewEvent> + '_ {
        std::iter::from_fn(|| self.try_recv())
    }
}

// =============================================================================
// Provider wiring
// =============================================================================

/// Forwards every line cache update into the channel.
pub fn connect_line_cache(cache: &mut LineCache, sender: &ViewEventSender) -> SubscriptionId {
    let sender = sender.clone();
    cache.on_update(move |dirty| {
        // The channel only closes during shutdown
        let _ = sender.send_lines_updated(dirty.clone());
    })
}

/// Forwards every font change into the channel.
pub fn connect_font_metrics(
    metrics: &mut MonospaceMetrics,
    sender: &ViewEventSender,
) -> SubscriptionId {
    let sender = sender.clone();
    metrics.on_update(move |_| {
        let _ = sender.send_font_changed();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterview_lines::Line;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_send_scroll_event() {
        let (sender, receiver) = create_event_channel(|| {});
        sender.send_scroll(0.0, 24.0).unwrap();
        assert_eq!(
            receiver.try_recv(),
            Some(ViewEvent::Scroll { dx: 0.0, dy: 24.0 })
        );
        assert_eq!(receiver.try_recv(), None);
    }

    #[test]
    fn test_every_send_calls_waker() {
        let woken = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&woken);
        let (sender, _receiver) = create_event_channel(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sender.send_resize(800.0, 600.0).unwrap();
        sender.send_scroll_to(Position::new(3, 4)).unwrap();
        sender.send_device_pixel_ratio(2.0).unwrap();

        assert_eq!(woken.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_font_change_debouncing() {
        let (sender, receiver) = create_event_channel(|| {});
        sender.send_font_changed().unwrap();
        sender.send_font_changed().unwrap();
        sender.send_font_changed().unwrap();
        assert_eq!(receiver.drain().count(), 1);

        sender.clear_font_change_pending();
        sender.send_font_changed().unwrap();
        assert_eq!(receiver.drain().count(), 1);
    }

    #[test]
    fn test_drain_preserves_order() {
        let (sender, receiver) = create_event_channel(|| {});
        sender.send_scroll(1.0, 0.0).unwrap();
        sender.send_lines_updated(DirtyLines::Single(4)).unwrap();
        sender.send_resize(10.0, 10.0).unwrap();

        let events: Vec<_> = receiver.drain().collect();
        assert_eq!(
            events,
            vec![
                ViewEvent::Scroll { dx: 1.0, dy: 0.0 },
                ViewEvent::LinesUpdated(DirtyLines::Single(4)),
                ViewEvent::Resize {
                    width: 10.0,
                    height: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_connect_line_cache_forwards_updates() {
        let (sender, receiver) = create_event_channel(|| {});
        let mut cache = LineCache::new();
        connect_line_cache(&mut cache, &sender);

        cache.set_height(3);
        cache.insert(1, Line::new("x"));

        let events: Vec<_> = receiver.drain().collect();
        assert_eq!(
            events,
            vec![
                ViewEvent::LinesUpdated(DirtyLines::FromLineToEnd(0)),
                ViewEvent::LinesUpdated(DirtyLines::Single(1)),
            ]
        );
    }

    #[test]
    fn test_connect_font_metrics_forwards_changes() {
        let (sender, receiver) = create_event_channel(|| {});
        let mut metrics = MonospaceMetrics::fixed(10.0, 24.0);
        connect_font_metrics(&mut metrics, &sender);

        metrics.set_font("Menlo", 18.0);
        let event = receiver.try_recv();
        assert_eq!(event, Some(ViewEvent::FontChanged));
        assert!(event.is_some_and(|e| e.is_provider_update()));
        assert_eq!(receiver.try_recv(), None);
    }
}
