// Chunk: docs/chunks/event_queue - Provider update notifications
//!
//! Explicit callback registration for provider update notifications.
//!
//! Providers (line cache, font metrics) own a `Subscribers<T>` and call
//! [`Subscribers::emit`] once per update. Delivery is synchronous and follows
//! registration order, so two subscribers always observe an update in the
//! same order. Nothing is promised about ordering across different
//! providers; consumers treat re-render as idempotent instead.
//!
//! Subscribers normally forward into the view's event channel rather than
//! touching the view directly, which keeps the view single-owner.

use std::fmt;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An ordered list of update callbacks.
pub struct Subscribers<T> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Box<dyn Fn(&T)>)>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    /// Registers a callback, returning its id.
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Delivers `update` to every subscriber exactly once, in registration order.
    pub fn emit(&self, update: &T) {
        for (_, callback) in &self.callbacks {
            callback(update);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
