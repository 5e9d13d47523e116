//! Publisher trait for log event destinations

use super::event::Event;
use parking_lot::Mutex;
use std::fmt;

/// Receives every event a logger lets through.
///
/// Publishing is fire-and-forget: the logger calls `publish` synchronously
/// and never learns whether delivery succeeded.
pub trait Publisher: Send + Sync {
    fn publish(&self, event: Event);
}

impl<F> Publisher for F
where
    F: Fn(Event) + Send + Sync,
{
    fn publish(&self, event: Event) {
        self(event)
    }
}

impl fmt::Debug for dyn Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Publisher")
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl Publisher for NoopPublisher {
    fn publish(&self, _event: Event) {}
}

/// Keeps every published event in memory, in publish order.
///
/// # Example
///
/// ```
/// use rust_event_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemoryPublisher::new());
/// let logger = Logger::new(Level::Debug, "svc", Vec::new(), sink.clone());
///
/// logger.info("ready", &[]);
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.events()[0].message, "ready");
/// ```
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    events: Mutex<Vec<Event>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Publisher for MemoryPublisher {
    fn publish(&self, event: Event) {
        self.events.lock().push(event);
    }
}
