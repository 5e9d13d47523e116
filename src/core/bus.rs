//! In-process publish/subscribe bus for log events
//!
//! Each [`Subscription`] owns a bounded queue. Publishing offers the event to
//! every subscription whose level filter it passes; what happens when a queue
//! is full is decided by the bus's [`OverflowPolicy`].

use super::{
    error::{LoggerError, Result},
    event::Event,
    level::Level,
    metrics::BusMetrics,
    overflow_policy::{OverflowCallback, OverflowPolicy},
    publisher::Publisher,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender, TrySendError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Default queue capacity used by [`EventBus::subscribe_default`]
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 1024;

/// `dropped` is the bus-wide total, not the count for `subscriber`.
fn overflow_warning(subscriber: u64, dropped: u64) -> String {
    format!(
        "[LOGGER WARNING] Subscriber #{} queue full, {} events dropped across subscribers. \
         Consider increasing its capacity or using a different overflow policy.",
        subscriber, dropped
    )
}

#[derive(Clone)]
struct Slot {
    id: u64,
    min_level: Level,
    sender: Sender<Arc<Event>>,
}

struct BusInner {
    // Copy-on-write so publishers can send without holding the lock.
    subscribers: RwLock<Arc<Vec<Slot>>>,
    next_id: AtomicU64,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    metrics: BusMetrics,
}

impl BusInner {
    fn publish(&self, event: Event) {
        self.metrics.record_published();

        let subscribers = Arc::clone(&self.subscribers.read());
        if subscribers.is_empty() {
            return;
        }

        let event = Arc::new(event);
        for slot in subscribers.iter().filter(|s| event.level >= s.min_level) {
            match slot.sender.try_send(Arc::clone(&event)) {
                Ok(()) => {
                    self.metrics.record_delivered();
                }
                Err(TrySendError::Full(event)) => {
                    self.handle_overflow(slot, event);
                }
                Err(TrySendError::Disconnected(_)) => {
                    // Subscription is mid-drop
                }
            }
        }
    }

    fn handle_overflow(&self, slot: &Slot, event: Arc<Event>) {
        self.metrics.record_queue_full();

        match &self.overflow_policy {
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped();
            }

            OverflowPolicy::Block => {
                self.metrics.record_block();
                if slot.sender.send(event).is_ok() {
                    self.metrics.record_delivered();
                }
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match slot.sender.send_timeout(event, *timeout) {
                    Ok(()) => {
                        self.metrics.record_delivered();
                    }
                    Err(SendTimeoutError::Timeout(_)) => {
                        self.alert_and_drop(slot.id);
                    }
                    Err(SendTimeoutError::Disconnected(_)) => {}
                }
            }

            OverflowPolicy::AlertAndDrop => {
                self.alert_and_drop(slot.id);
            }
        }
    }

    /// Drop a delivery, alerting on the first drop and every 1000th after
    fn alert_and_drop(&self, subscriber: u64) {
        let dropped_count = self.metrics.record_dropped() + 1;

        if dropped_count == 1 || dropped_count % 1000 == 0 {
            eprintln!("{}", overflow_warning(subscriber, dropped_count));

            if let Some(ref callback) = self.on_overflow {
                callback(dropped_count);
            }
        }
    }

    fn unsubscribe(&self, id: u64) {
        let mut subscribers = self.subscribers.write();
        Arc::make_mut(&mut subscribers).retain(|slot| slot.id != id);
    }
}

/// Publish/subscribe bus for [`Event`]s
///
/// Cloning an `EventBus` yields another handle to the same bus.
///
/// # Example
///
/// ```
/// use rust_event_logger::prelude::*;
///
/// let bus = EventBus::new();
/// let subscription = bus.subscribe(16);
///
/// let logger = Logger::new(Level::Info, "api", Vec::new(), std::sync::Arc::new(bus.clone()));
/// logger.info("listening", &[Field::new("port", 8080)]);
///
/// let event = subscription.try_recv().expect("event delivered");
/// assert_eq!(event.message, "listening");
/// assert_eq!(bus.metrics().delivered(), 1);
/// ```
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OverflowPolicy::default(), None)
    }

    #[must_use]
    pub fn with_policy(overflow_policy: OverflowPolicy) -> Self {
        Self::with_config(overflow_policy, None)
    }

    /// Create a bus with custom overflow configuration
    #[must_use]
    pub fn with_config(
        overflow_policy: OverflowPolicy,
        on_overflow: Option<OverflowCallback>,
    ) -> Self {
        Self {
            inner: Arc::new(BusInner {
                subscribers: RwLock::new(Arc::new(Vec::new())),
                next_id: AtomicU64::new(1),
                overflow_policy,
                on_overflow,
                metrics: BusMetrics::new(),
            }),
        }
    }

    /// Subscribe to every event
    pub fn subscribe(&self, capacity: usize) -> Subscription {
        self.subscribe_filtered(capacity, Level::Min)
    }

    /// Subscribe with [`DEFAULT_SUBSCRIBER_CAPACITY`]
    pub fn subscribe_default(&self) -> Subscription {
        self.subscribe(DEFAULT_SUBSCRIBER_CAPACITY)
    }

    /// Subscribe to events at `min_level` or above
    ///
    /// A zero capacity is raised to one.
    pub fn subscribe_filtered(&self, capacity: usize, min_level: Level) -> Subscription {
        let (sender, receiver) = bounded(capacity.max(1));
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        {
            let mut subscribers = self.inner.subscribers.write();
            Arc::make_mut(&mut subscribers).push(Slot {
                id,
                min_level,
                sender,
            });
        }

        Subscription {
            id,
            min_level,
            receiver,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, event: Event) {
        self.inner.publish(event);
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    pub fn overflow_policy(&self) -> &OverflowPolicy {
        &self.inner.overflow_policy
    }

    pub fn metrics(&self) -> &BusMetrics {
        &self.inner.metrics
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("overflow_policy", &self.inner.overflow_policy)
            .field("metrics", &self.inner.metrics)
            .finish()
    }
}

impl Publisher for EventBus {
    fn publish(&self, event: Event) {
        self.inner.publish(event);
    }
}

/// Receiving end of an [`EventBus`] subscription
///
/// Dropping it unregisters the subscription from the bus.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    min_level: Level,
    receiver: Receiver<Arc<Event>>,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Wait for the next event
    ///
    /// Fails with [`LoggerError::SubscriptionClosed`] once the bus is dropped
    /// and the queue is drained.
    pub fn recv(&self) -> Result<Arc<Event>> {
        self.receiver
            .recv()
            .map_err(|_| LoggerError::SubscriptionClosed)
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Arc<Event>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(event),
            Err(RecvTimeoutError::Timeout) => Err(LoggerError::RecvTimeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(LoggerError::SubscriptionClosed),
        }
    }

    pub fn try_recv(&self) -> Option<Arc<Event>> {
        self.receiver.try_recv().ok()
    }

    /// Take everything currently queued without blocking
    pub fn drain(&self) -> Vec<Arc<Event>> {
        self.receiver.try_iter().collect()
    }

    /// Blocking iterator that ends when the bus is dropped
    pub fn iter(&self) -> impl Iterator<Item = Arc<Event>> + '_ {
        self.receiver.iter()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}
